pub mod dialogs;
pub mod log_panel;
pub mod preview;
pub mod split;

pub use split::{SplitState, show_split};
