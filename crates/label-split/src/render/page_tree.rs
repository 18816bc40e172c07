//! Page attribute lookup
//!
//! MediaBox, CropBox, Resources and Rotate may live on the page itself or
//! on any ancestor in the page tree.
//!
//! Label geometry is measured on the page as a viewer displays it: the
//! visible box turned clockwise by `/Rotate`, with the origin at the top
//! left and y growing downward. [`PageFrame`] converts between that frame
//! and PDF user space.

use crate::constants::DEFAULT_PAGE_DIMENSIONS;
use crate::layout::LabelRect;
use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId};

/// Upper bound on page tree depth when walking `/Parent` links
const MAX_PAGE_TREE_DEPTH: usize = 64;

/// The visible area of a page in PDF user space (origin bottom-left)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageBox {
    pub llx: f32,
    pub lly: f32,
    pub urx: f32,
    pub ury: f32,
}

impl PageBox {
    pub fn new(llx: f32, lly: f32, urx: f32, ury: f32) -> Self {
        // Boxes may be written with any two opposite corners
        Self {
            llx: llx.min(urx),
            lly: lly.min(ury),
            urx: llx.max(urx),
            ury: lly.max(ury),
        }
    }

    pub fn width(&self) -> f32 {
        self.urx - self.llx
    }

    pub fn height(&self) -> f32 {
        self.ury - self.lly
    }

    pub fn to_array(&self) -> Vec<Object> {
        vec![
            Object::Real(self.llx),
            Object::Real(self.lly),
            Object::Real(self.urx),
            Object::Real(self.ury),
        ]
    }
}

impl Default for PageBox {
    fn default() -> Self {
        Self::new(0.0, 0.0, DEFAULT_PAGE_DIMENSIONS.0, DEFAULT_PAGE_DIMENSIONS.1)
    }
}

/// A page as displayed: its visible box turned by the page rotation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageFrame {
    pub page_box: PageBox,
    /// Clockwise rotation in degrees: 0, 90, 180 or 270
    pub rotation: i64,
}

impl PageFrame {
    pub fn new(page_box: PageBox, rotation: i64) -> Self {
        let rotation = rotation.rem_euclid(360);
        let rotation = if rotation % 90 == 0 {
            rotation
        } else {
            log::warn!("Ignoring /Rotate {}, not a multiple of 90", rotation);
            0
        };
        Self { page_box, rotation }
    }

    fn is_quarter_turn(&self) -> bool {
        self.rotation == 90 || self.rotation == 270
    }

    /// Displayed width in points
    pub fn width(&self) -> f32 {
        if self.is_quarter_turn() {
            self.page_box.height()
        } else {
            self.page_box.width()
        }
    }

    /// Displayed height in points
    pub fn height(&self) -> f32 {
        if self.is_quarter_turn() {
            self.page_box.width()
        } else {
            self.page_box.height()
        }
    }

    /// Matrix `[a b c d e f]` that maps page user space onto a `width` x
    /// `height` page so that `clip` (in displayed top-left coordinates)
    /// fills it, upright.
    pub fn clip_matrix(&self, clip: &LabelRect, width: f32, height: f32) -> [f32; 6] {
        let sx = width / clip.width();
        let sy = height / clip.height();
        let PageBox { llx, lly, urx, ury } = self.page_box;

        // Displayed (u, v) from user space (x, y), per rotation:
        //   0: (x - llx, ury - y)    90: (y - lly, x - llx)
        // 180: (urx - x, y - lly)   270: (ury - y, urx - x)
        // then X = sx (u - x0), Y = sy (y1 - v)
        let matrix = match self.rotation {
            90 => [0.0, -sy, sx, 0.0, -sx * (lly + clip.x0), sy * (clip.y1 + llx)],
            180 => [-sx, 0.0, 0.0, -sy, sx * (urx - clip.x0), sy * (clip.y1 + lly)],
            270 => [0.0, sy, -sx, 0.0, sx * (ury - clip.x0), sy * (clip.y1 - urx)],
            _ => [sx, 0.0, 0.0, sy, -sx * (llx + clip.x0), sy * (clip.y1 - ury)],
        };
        // Adding zero turns -0.0 into 0.0 so content streams never print "-0"
        matrix.map(|v| v + 0.0)
    }

    /// Matrix that draws the whole page upright on a page of its displayed size
    pub fn display_matrix(&self) -> [f32; 6] {
        let (width, height) = (self.width(), self.height());
        self.clip_matrix(&LabelRect::new(0.0, 0.0, width, height), width, height)
    }
}

/// Visible box and rotation of a page
pub fn page_frame(doc: &Document, page_id: ObjectId) -> Result<PageFrame> {
    Ok(PageFrame::new(
        page_box(doc, page_id)?,
        page_rotation(doc, page_id)?,
    ))
}

/// Get the visible page box: CropBox if present, otherwise MediaBox.
///
/// Falls back to A4 when neither box is usable.
pub fn page_box(doc: &Document, page_id: ObjectId) -> Result<PageBox> {
    for key in [b"CropBox".as_slice(), b"MediaBox".as_slice()] {
        if let Some(obj) = inherited_attribute(doc, page_id, key)? {
            if let Some(page_box) = parse_box(doc, obj) {
                return Ok(page_box);
            }
        }
    }
    log::warn!(
        "Page {:?} has no usable MediaBox, assuming {}x{}pt",
        page_id,
        DEFAULT_PAGE_DIMENSIONS.0,
        DEFAULT_PAGE_DIMENSIONS.1
    );
    Ok(PageBox::default())
}

/// Page rotation in degrees, normalized to 0, 90, 180 or 270
pub fn page_rotation(doc: &Document, page_id: ObjectId) -> Result<i64> {
    let rotation = inherited_attribute(doc, page_id, b"Rotate")?
        .and_then(|obj| obj.as_i64().ok())
        .unwrap_or(0);
    Ok(rotation.rem_euclid(360))
}

/// Get the page's resource dictionary, inherited if needed
pub(crate) fn page_resources<'a>(
    doc: &'a Document,
    page_id: ObjectId,
) -> Result<Option<&'a Object>> {
    inherited_attribute(doc, page_id, b"Resources")
}

/// Look up a page attribute, walking up `/Parent` links until found.
/// Indirect values are resolved.
fn inherited_attribute<'a>(
    doc: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> Result<Option<&'a Object>> {
    let mut dict: &Dictionary = doc.get_dictionary(page_id)?;

    for _ in 0..MAX_PAGE_TREE_DEPTH {
        if let Ok(value) = dict.get(key) {
            return Ok(Some(resolve(doc, value)));
        }
        match dict.get(b"Parent").and_then(Object::as_reference) {
            Ok(parent_id) => dict = doc.get_dictionary(parent_id)?,
            Err(_) => return Ok(None),
        }
    }

    Ok(None)
}

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

fn parse_box(doc: &Document, obj: &Object) -> Option<PageBox> {
    let values = obj.as_array().ok()?;
    if values.len() != 4 {
        return None;
    }
    let mut coords = [0.0f32; 4];
    for (slot, value) in coords.iter_mut().zip(values) {
        *slot = extract_number(resolve(doc, value))?;
    }
    let page_box = PageBox::new(coords[0], coords[1], coords[2], coords[3]);
    if page_box.width() > 0.0 && page_box.height() > 0.0 {
        Some(page_box)
    } else {
        None
    }
}

/// Extract numeric value from a PDF object
fn extract_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}
