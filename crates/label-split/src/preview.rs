use crate::options::GridConfig;
use crate::plan::plan_page;
use crate::render::{
    OutputDocument, OverlayCell, SOURCE_XOBJECT_NAME, create_page_xobject, overlay_ops,
};
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

/// Generate a one-page preview of the grid on a source page.
///
/// The page shows the source content with every grid cell outlined:
/// cells that will be extracted in red, cells that will be skipped in grey.
/// Rows follow the same per-page rule as the split itself. A rotated page
/// is shown the way viewers display it, with the grid in that frame.
pub fn generate_overlay_preview(
    source: &Document,
    config: &GridConfig,
    page_index: usize,
) -> Result<Document> {
    config.validate()?;

    let page_ids: Vec<ObjectId> = source.get_pages().values().copied().collect();
    let page_id = *page_ids
        .get(page_index)
        .ok_or(LabelSplitError::PageOutOfRange(page_index))?;

    let plan = plan_page(source, config, page_index, page_ids.len(), page_id)?;
    let frame = plan.frame;

    let mut cells: Vec<OverlayCell> = plan
        .rects
        .iter()
        .map(|&rect| OverlayCell {
            rect,
            accepted: true,
        })
        .collect();
    cells.extend(plan.rejected.iter().map(|rejected| OverlayCell {
        rect: rejected.cell.rect,
        accepted: false,
    }));

    let mut output = OutputDocument::new();
    let pages_id = output.pages_id();
    let doc = output.document_mut();

    let mut cache = HashMap::new();
    let xobject_id = create_page_xobject(doc, source, page_id, &frame.page_box, &mut cache)?;

    // Source page upright with its box at the origin, then the grid
    let [a, b, c, d, e, f] = frame.display_matrix();
    let mut content = format!(
        "q {} {} {} {} {} {} cm /{} Do Q\n",
        a, b, c, d, e, f, SOURCE_XOBJECT_NAME
    );
    content.push_str(&overlay_ops(&cells, frame.height()));
    let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    let mut xobjects = Dictionary::new();
    xobjects.set(SOURCE_XOBJECT_NAME, Object::Reference(xobject_id));
    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    let page_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Page".to_vec())),
        ("Parent", Object::Reference(pages_id)),
        (
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(frame.width()),
                Object::Real(frame.height()),
            ]),
        ),
        ("Resources", Object::Dictionary(resources)),
        ("Contents", Object::Reference(content_id)),
    ]);
    let page_obj_id = doc.add_object(page_dict);
    output.push_page(page_obj_id);

    Ok(output.finish())
}
