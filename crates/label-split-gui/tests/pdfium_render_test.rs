//! Renders a split label page through PDFium.
//!
//! Needs the PDFium library the build script places in vendor/pdfium; run
//! with `--ignored` once it is there.

use label_split::{GridConfig, split_document};
use lopdf::{Dictionary, Document, Object, Stream};
use pdfium_render::prelude::*;

fn create_test_pdf() -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    // A filled square under the first label position
    let content_id = doc.add_object(Stream::new(
        Dictionary::new(),
        b"0 0 0 rg 34 722 212 85 re f".to_vec(),
    ));
    let page_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Page".to_vec())),
        ("Parent", Object::Reference(pages_id)),
        (
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(595),
                Object::Integer(842),
            ]),
        ),
        ("Resources", Object::Dictionary(Dictionary::new())),
        ("Contents", Object::Reference(content_id)),
    ]));

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(vec![Object::Reference(page_id)])),
        ("Count", Object::Integer(1)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    doc
}

#[test]
#[ignore = "needs the PDFium library in vendor/pdfium"]
fn test_label_page_renders_source_content() {
    let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let workspace_root = manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("Failed to find workspace root");
    let pdfium_lib_path = workspace_root.join("vendor/pdfium/lib");

    let pdfium = Pdfium::new(
        Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&pdfium_lib_path))
            .expect("Failed to bind to Pdfium library"),
    );

    let mut labels = split_document(&create_test_pdf(), &GridConfig::default()).unwrap();
    let mut bytes = Vec::new();
    labels.save_to(&mut bytes).unwrap();

    let document = pdfium
        .load_pdf_from_byte_slice(&bytes, None)
        .expect("Failed to load split PDF");
    assert_eq!(document.pages().len(), 14);

    let page = document.pages().get(0).expect("Failed to get first label");
    let config = PdfRenderConfig::new().set_target_width(212);
    let bitmap = page
        .render_with_config(&config)
        .expect("Failed to render label");

    // The first label is cut from the filled square, so it renders mostly dark
    let image = bitmap.as_image().into_luma8();
    let dark = image.pixels().filter(|p| p.0[0] < 128).count();
    assert!(dark * 2 > image.pixels().count());
}
