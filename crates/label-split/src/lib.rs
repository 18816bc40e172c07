pub mod constants;
mod form;
pub mod layout;
mod options;
mod plan;
mod preview;
pub mod render;
pub mod split;
mod stats;
mod types;

pub use form::GridForm;
pub use layout::{CellRejection, GridCell, LabelRect, compute_label_rects, grid_cells, rows_for_page};
pub use options::*;
pub use plan::{PagePlan, RejectedCell, SplitPlan, plan_split};
pub use preview::generate_overlay_preview;
pub use split::{
    ensure_input_file, load_pdf, save_pdf, split, split_document, split_into_tiles,
};
pub use stats::{SplitStatistics, calculate_statistics};
pub use types::*;
