//! Label page rendering
//!
//! A label page is sized to the label and shows the source page XObject,
//! turned upright, translated and scaled so the clip region fills the page
//! exactly.

use crate::layout::LabelRect;
use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use super::page_tree::PageFrame;

/// Resource name of the source page XObject on label and preview pages
pub(crate) const SOURCE_XOBJECT_NAME: &str = "Src";

/// Render one label page.
///
/// # Arguments
/// * `output` - The output document
/// * `xobject_id` - Form XObject of the source page (see `create_page_xobject`)
/// * `frame` - Visible box and rotation of the source page
/// * `clip` - Label region in top-left page space
/// * `width_pt` - Output page width in points
/// * `height_pt` - Output page height in points
/// * `parent_pages_id` - The parent Pages object ID
pub fn render_label_page(
    output: &mut Document,
    xobject_id: ObjectId,
    frame: &PageFrame,
    clip: &LabelRect,
    width_pt: f32,
    height_pt: f32,
    parent_pages_id: ObjectId,
) -> Result<ObjectId> {
    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(width_pt),
            Object::Real(height_pt),
        ]),
    );

    let content = clip_placement_command(frame, clip, width_pt, height_pt);
    let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    let mut xobjects = Dictionary::new();
    xobjects.set(SOURCE_XOBJECT_NAME, Object::Reference(xobject_id));
    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));

    Ok(output.add_object(page_dict))
}

/// Content stream that clips to the page and maps the clip region onto it.
fn clip_placement_command(frame: &PageFrame, clip: &LabelRect, width: f32, height: f32) -> String {
    let [a, b, c, d, e, f] = frame.clip_matrix(clip, width, height);
    format!(
        "q 0 0 {} {} re W n {} {} {} {} {} {} cm /{} Do Q\n",
        width, height, a, b, c, d, e, f, SOURCE_XOBJECT_NAME
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::PageBox;

    #[test]
    fn test_clip_command_translates_to_origin() {
        let frame = PageFrame::new(PageBox::new(0.0, 0.0, 600.0, 800.0), 0);
        let clip = LabelRect::new(100.0, 50.0, 300.0, 150.0);

        let cmd = clip_placement_command(&frame, &clip, 200.0, 100.0);

        // bottom = 800 - 150 = 650
        assert_eq!(cmd, "q 0 0 200 100 re W n 1 0 0 1 -100 -650 cm /Src Do Q\n");
    }

    #[test]
    fn test_clip_command_with_offset_box_and_scale() {
        let frame = PageFrame::new(PageBox::new(10.0, 20.0, 610.0, 820.0), 0);
        let clip = LabelRect::new(0.0, 0.0, 100.0, 100.0);

        let cmd = clip_placement_command(&frame, &clip, 200.0, 50.0);

        // left = 10, bottom = 820 - 100 = 720
        assert_eq!(cmd, "q 0 0 200 50 re W n 2 0 0 0.5 -20 -360 cm /Src Do Q\n");
    }

    #[test]
    fn test_clip_command_on_quarter_turned_page() {
        // Stored landscape, shown portrait
        let frame = PageFrame::new(PageBox::new(0.0, 0.0, 842.0, 595.0), 90);
        let clip = LabelRect::new(100.0, 50.0, 300.0, 150.0);

        let cmd = clip_placement_command(&frame, &clip, 200.0, 100.0);

        // X = y - 100, Y = 150 - x
        assert_eq!(cmd, "q 0 0 200 100 re W n 0 -1 1 0 -100 150 cm /Src Do Q\n");
    }
}
