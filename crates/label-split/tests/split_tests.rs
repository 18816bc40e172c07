use label_split::*;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use tempfile::tempdir;

const A4: (i64, i64) = (595, 842);

fn create_test_pdf(num_pages: usize) -> Document {
    create_test_pdf_sized(num_pages, A4.0, A4.1)
}

fn create_test_pdf_sized(num_pages: usize, width: i64, height: i64) -> Document {
    let mut doc = Document::with_version("1.7");

    // Create page tree root ID
    let pages_id = doc.new_object_id();

    // Shared font resource
    let font_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Helvetica".to_vec())),
    ]));

    let mut kids = Vec::new();
    for i in 0..num_pages {
        let content = format!("BT /F1 24 Tf 72 720 Td (Sheet {}) Tj ET", i + 1);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let mut fonts = Dictionary::new();
        fonts.set("F1", Object::Reference(font_id));
        let mut resources = Dictionary::new();
        resources.set("Font", Object::Dictionary(fonts));

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(width),
                    Object::Integer(height),
                ]),
            ),
            ("Resources", Object::Dictionary(resources)),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(num_pages as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));

    doc.trailer.set("Root", catalog_id);

    doc
}

fn write_test_pdf(doc: &mut Document, path: &std::path::Path) {
    let mut writer = Vec::new();
    doc.save_to(&mut writer).unwrap();
    std::fs::write(path, writer).unwrap();
}

fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().values().copied().collect()
}

fn media_box(doc: &Document, page_id: ObjectId) -> Vec<f32> {
    doc.get_dictionary(page_id)
        .unwrap()
        .get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_float().unwrap())
        .collect()
}

fn source_xobject(doc: &Document, page_id: ObjectId) -> ObjectId {
    doc.get_dictionary(page_id)
        .unwrap()
        .get(b"Resources")
        .unwrap()
        .as_dict()
        .unwrap()
        .get(b"XObject")
        .unwrap()
        .as_dict()
        .unwrap()
        .get(b"Src")
        .unwrap()
        .as_reference()
        .unwrap()
}

fn page_content(doc: &Document, page_id: ObjectId) -> String {
    let content_id = doc
        .get_dictionary(page_id)
        .unwrap()
        .get(b"Contents")
        .unwrap()
        .as_reference()
        .unwrap();
    let stream = doc.get_object(content_id).unwrap().as_stream().unwrap();
    String::from_utf8(stream.content.clone()).unwrap()
}

#[test]
fn test_split_single_page_uses_last_page_rows() {
    let source = create_test_pdf(1);
    let output = split_document(&source, &GridConfig::default()).unwrap();

    // The only page is also the last page: 7 rows x 2 cols
    assert_eq!(output.get_pages().len(), 14);
}

#[test]
fn test_split_single_page_without_override() {
    let source = create_test_pdf(1);
    let config = GridConfig {
        last_page_rows: None,
        ..GridConfig::default()
    };

    let output = split_document(&source, &config).unwrap();
    assert_eq!(output.get_pages().len(), 18);
}

fn set_rotation(doc: &mut Document, page_id: ObjectId, degrees: i64) {
    if let Ok(Object::Dictionary(page)) = doc.get_object_mut(page_id) {
        page.set("Rotate", Object::Integer(degrees));
    }
}

fn content_tokens(content: &str) -> Vec<String> {
    content.split_whitespace().map(str::to_string).collect()
}

#[test]
fn test_split_measures_rotated_page_as_displayed() {
    let config = GridConfig {
        last_page_rows: None,
        ..GridConfig::default()
    };

    // A4 portrait sheet stored landscape
    let upright = create_test_pdf_sized(1, A4.1, A4.0);
    assert_eq!(split_document(&upright, &config).unwrap().get_pages().len(), 12);

    let mut rotated = create_test_pdf_sized(1, A4.1, A4.0);
    let page_id = page_ids(&rotated)[0];
    set_rotation(&mut rotated, page_id, 90);

    let output = split_document(&rotated, &config).unwrap();
    let ids = page_ids(&output);
    assert_eq!(ids.len(), 18);

    // q 0 0 w h re W n a b c d e f cm: a quarter-turn matrix has a = d = 0
    let tokens = content_tokens(&page_content(&output, ids[0]));
    assert_eq!(tokens[8], "0");
    assert_eq!(tokens[11], "0");
    assert!(tokens[9].starts_with('-'));
    assert!(!tokens[10].starts_with('-'));
    assert_eq!(tokens[14], "cm");
}

#[test]
fn test_split_upside_down_page_keeps_grid() {
    let mut source = create_test_pdf(1);
    let page_id = page_ids(&source)[0];
    set_rotation(&mut source, page_id, 180);

    let output = split_document(&source, &GridConfig::default()).unwrap();
    let ids = page_ids(&output);
    assert_eq!(ids.len(), 14);

    let tokens = content_tokens(&page_content(&output, ids[0]));
    assert!(tokens[8].starts_with('-'));
    assert!(tokens[11].starts_with('-'));
}

#[test]
fn test_split_multiple_pages() {
    let source = create_test_pdf(3);
    let output = split_document(&source, &GridConfig::default()).unwrap();

    // 18 + 18 + 14
    assert_eq!(output.get_pages().len(), 50);
}

#[test]
fn test_labels_share_source_xobject() {
    let source = create_test_pdf(2);
    let output = split_document(&source, &GridConfig::default()).unwrap();
    let ids = page_ids(&output);

    // The first 18 labels come from page 1, the rest from page 2
    let first = source_xobject(&output, ids[0]);
    assert!(ids[..18].iter().all(|&id| source_xobject(&output, id) == first));
    let second = source_xobject(&output, ids[18]);
    assert_ne!(first, second);
    assert!(ids[18..].iter().all(|&id| source_xobject(&output, id) == second));

    // Both XObjects point at the same copied font
    let font_of = |xobject: ObjectId| {
        output
            .get_object(xobject)
            .unwrap()
            .as_stream()
            .unwrap()
            .dict
            .get(b"Resources")
            .unwrap()
            .as_dict()
            .unwrap()
            .get(b"Font")
            .unwrap()
            .as_dict()
            .unwrap()
            .get(b"F1")
            .unwrap()
            .as_reference()
            .unwrap()
    };
    assert_eq!(font_of(first), font_of(second));
    let font = output.get_dictionary(font_of(first)).unwrap();
    assert_eq!(font.get(b"BaseFont").unwrap().as_name().unwrap(), b"Helvetica");
}

#[test]
fn test_label_page_size() {
    let source = create_test_pdf(1);
    let config = GridConfig::default();
    let output = split_document(&source, &config).unwrap();

    for id in page_ids(&output) {
        let mbox = media_box(&output, id);
        assert_eq!(
            mbox,
            vec![0.0, 0.0, config.label_width_pt(), config.label_height_pt()]
        );
    }
}

#[test]
fn test_label_page_content_clips_and_places_source() {
    let source = create_test_pdf(1);
    let output = split_document(&source, &GridConfig::default()).unwrap();
    let ids = page_ids(&output);

    let content = page_content(&output, ids[0]);
    assert!(content.starts_with("q 0 0 "));
    assert!(content.contains(" re W n "));
    assert!(content.contains(" cm /Src Do Q"));
}

#[test]
fn test_xobject_bbox_is_crop_box() {
    let mut source = create_test_pdf(1);
    let page_id = page_ids(&source)[0];
    if let Ok(Object::Dictionary(page)) = source.get_object_mut(page_id) {
        page.set(
            "CropBox",
            Object::Array(vec![
                Object::Integer(10),
                Object::Integer(20),
                Object::Integer(595),
                Object::Integer(862),
            ]),
        );
        page.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(600),
                Object::Integer(900),
            ]),
        );
    }

    let output = split_document(&source, &GridConfig::default()).unwrap();
    let ids = page_ids(&output);
    assert_eq!(ids.len(), 14);

    let xobject = output
        .get_object(source_xobject(&output, ids[0]))
        .unwrap()
        .as_stream()
        .unwrap();
    let bbox: Vec<f32> = xobject
        .dict
        .get(b"BBox")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_float().unwrap())
        .collect();
    assert_eq!(bbox, vec![10.0, 20.0, 595.0, 862.0]);
}

#[test]
fn test_inherited_media_box() {
    let mut source = create_test_pdf(1);
    let page_id = page_ids(&source)[0];

    // Move the MediaBox from the page to the page tree root
    let pages_id = source
        .get_dictionary(page_id)
        .unwrap()
        .get(b"Parent")
        .unwrap()
        .as_reference()
        .unwrap();
    if let Ok(Object::Dictionary(page)) = source.get_object_mut(page_id) {
        page.remove(b"MediaBox");
    }
    if let Ok(Object::Dictionary(pages)) = source.get_object_mut(pages_id) {
        pages.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ]),
        );
    }

    let config = GridConfig {
        last_page_rows: None,
        ..GridConfig::default()
    };
    let output = split_document(&source, &config).unwrap();

    // Letter height drops the ninth row
    assert_eq!(output.get_pages().len(), 16);
}

#[test]
fn test_small_page_yields_no_labels() {
    let source = create_test_pdf_sized(2, 100, 100);
    let output = split_document(&source, &GridConfig::default()).unwrap();
    assert_eq!(output.get_pages().len(), 0);
}

#[test]
fn test_degenerate_config_yields_empty_document() {
    let source = create_test_pdf(2);
    let config = GridConfig {
        label_width_mm: 0.0,
        ..GridConfig::default()
    };

    let output = split_document(&source, &config).unwrap();
    assert_eq!(output.get_pages().len(), 0);
}

#[test]
fn test_empty_source_yields_empty_document() {
    let source = create_test_pdf(0);
    let output = split_document(&source, &GridConfig::default()).unwrap();
    assert_eq!(output.get_pages().len(), 0);
}

#[tokio::test]
async fn test_split_async() {
    let source = create_test_pdf(2);
    let output = split(&source, &GridConfig::default()).await.unwrap();
    assert_eq!(output.get_pages().len(), 32);
}

#[tokio::test]
async fn test_split_rejects_negative_margin() {
    let source = create_test_pdf(1);
    let config = GridConfig {
        margins: Margins {
            left_mm: -1.0,
            ..Margins::default()
        },
        ..GridConfig::default()
    };

    let result = split(&source, &config).await;
    assert!(matches!(result, Err(LabelSplitError::Config(_))));
}

#[tokio::test]
async fn test_split_into_tiles() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("sheet.pdf");
    let output = dir.path().join("sheet_split.pdf");
    write_test_pdf(&mut create_test_pdf(2), &input);

    let stats = split_into_tiles(&input, &output, &GridConfig::default())
        .await
        .unwrap();

    assert_eq!(stats.source_pages, 2);
    assert_eq!(stats.labels, 32);
    assert_eq!(stats.candidate_cells, 32);
    assert_eq!(stats.skipped, 0);

    let written = load_pdf(&output).await.unwrap();
    assert_eq!(written.get_pages().len(), 32);
}

#[tokio::test]
async fn test_split_into_tiles_is_repeatable() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("sheet.pdf");
    let first = dir.path().join("first.pdf");
    let second = dir.path().join("second.pdf");
    write_test_pdf(&mut create_test_pdf(3), &input);

    let config = GridConfig::default();
    split_into_tiles(&input, &first, &config).await.unwrap();
    split_into_tiles(&input, &second, &config).await.unwrap();

    let a = std::fs::read(&first).unwrap();
    let b = std::fs::read(&second).unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_split_into_tiles_overwrites_output() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("sheet.pdf");
    let output = dir.path().join("out.pdf");
    write_test_pdf(&mut create_test_pdf(1), &input);
    std::fs::write(&output, b"stale").unwrap();

    split_into_tiles(&input, &output, &GridConfig::default())
        .await
        .unwrap();

    let written = load_pdf(&output).await.unwrap();
    assert_eq!(written.get_pages().len(), 14);
}

#[tokio::test]
async fn test_split_into_tiles_degenerate_writes_empty_document() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("sheet.pdf");
    let output = dir.path().join("out.pdf");
    write_test_pdf(&mut create_test_pdf(1), &input);

    let config = GridConfig {
        label_height_mm: 0.0,
        ..GridConfig::default()
    };
    let stats = split_into_tiles(&input, &output, &config).await.unwrap();

    assert_eq!(stats.labels, 0);
    assert_eq!(stats.skipped, 14);
    assert!(output.exists());
}

#[tokio::test]
async fn test_split_into_tiles_missing_input() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("missing.pdf");
    let output = dir.path().join("out.pdf");

    let result = split_into_tiles(&input, &output, &GridConfig::default()).await;

    assert!(matches!(result, Err(LabelSplitError::Io(_))));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_split_into_tiles_invalid_pdf() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("broken.pdf");
    let output = dir.path().join("out.pdf");
    std::fs::write(&input, b"not a pdf").unwrap();

    let result = split_into_tiles(&input, &output, &GridConfig::default()).await;

    assert!(matches!(result, Err(LabelSplitError::Pdf(_))));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_ensure_input_file() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("sheet.pdf");
    write_test_pdf(&mut create_test_pdf(1), &file);

    assert!(ensure_input_file(&file).await.is_ok());

    let result = ensure_input_file(dir.path()).await;
    assert!(matches!(result, Err(LabelSplitError::NotAFile(_))));

    let result = ensure_input_file(dir.path().join("missing.pdf")).await;
    let err = result.unwrap_err();
    assert!(err.is_validation());
}
