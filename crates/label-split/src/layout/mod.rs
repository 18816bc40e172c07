//! Grid geometry for label sheets
//!
//! This module turns a millimeter grid description into page rectangles:
//! - Candidate cells in row-major order
//! - Validity and page-bounds filtering
//! - Per-page row counts (last page override)

mod grid;
mod types;

pub use grid::*;
pub use types::*;
