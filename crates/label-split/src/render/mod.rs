//! PDF rendering modules for label extraction
//!
//! This module handles all PDF-specific operations:
//! - Reading page boxes and inherited page attributes
//! - Creating XObjects from source pages
//! - Building clipped label pages and overlay marks
//! - Assembling the output page tree

mod document;
mod label;
mod overlay;
mod page_tree;
mod xobject;

pub use document::OutputDocument;
pub(crate) use label::SOURCE_XOBJECT_NAME;
pub use label::render_label_page;
pub use overlay::{OverlayCell, overlay_ops};
pub use page_tree::{PageBox, PageFrame, page_box, page_frame, page_rotation};
pub use xobject::{copy_object_deep, create_page_xobject};
