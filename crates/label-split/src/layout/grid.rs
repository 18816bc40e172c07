//! Label grid calculation
//!
//! Cells are generated row by row, left to right. That order is also the
//! order of pages in the output document.

use crate::constants::{MAX_GRID_CELLS, mm_to_pt};
use crate::options::GridConfig;

use super::{CellRejection, GridCell, LabelRect};

// =============================================================================
// Grid Cells
// =============================================================================

/// All candidate cells for `rows` rows of the grid, unfiltered.
///
/// A grid of more than [`MAX_GRID_CELLS`] cells yields no cells at all;
/// `GridConfig::validate` rejects such configurations up front.
///
/// # Arguments
/// * `config` - Grid geometry in millimeters
/// * `rows` - Number of rows to generate (may differ from `config.rows`)
pub fn grid_cells(config: &GridConfig, rows: usize) -> Vec<GridCell> {
    let label_w = mm_to_pt(config.label_width_mm);
    let label_h = mm_to_pt(config.label_height_mm);

    let left = mm_to_pt(config.margins.left_mm);
    let top = mm_to_pt(config.margins.top_mm);

    let h_spacing = mm_to_pt(config.spacing.horizontal_mm);
    let v_spacing = mm_to_pt(config.spacing.vertical_mm);

    let cell_count = match rows.checked_mul(config.cols) {
        Some(count) if count <= MAX_GRID_CELLS => count,
        _ => {
            log::warn!(
                "Grid of {} rows x {} columns is too large, no cells generated",
                rows,
                config.cols
            );
            return Vec::new();
        }
    };

    let mut cells = Vec::with_capacity(cell_count);
    for row in 0..rows {
        for col in 0..config.cols {
            let x0 = left + col as f32 * (label_w + h_spacing);
            let y0 = top + row as f32 * (label_h + v_spacing);
            cells.push(GridCell {
                row,
                col,
                rect: LabelRect::from_origin_size(x0, y0, label_w, label_h),
            });
        }
    }
    cells
}

/// Check a cell against the page.
///
/// Only the right and bottom page edges are checked; the right and bottom
/// margins play no part.
pub fn check_cell(
    rect: &LabelRect,
    page_width_pt: f32,
    page_height_pt: f32,
) -> Result<(), CellRejection> {
    if rect.is_degenerate() {
        return Err(CellRejection::Degenerate);
    }
    if rect.x1 > page_width_pt || rect.y1 > page_height_pt {
        return Err(CellRejection::OutOfBounds);
    }
    Ok(())
}

/// Compute the label rectangles to extract from one page.
///
/// Cells that are degenerate or cross the right/bottom page edge are
/// dropped silently. The result keeps row-major order.
pub fn compute_label_rects(
    config: &GridConfig,
    page_width_pt: f32,
    page_height_pt: f32,
    rows_for_this_page: usize,
) -> Vec<LabelRect> {
    grid_cells(config, rows_for_this_page)
        .into_iter()
        .filter(|cell| check_cell(&cell.rect, page_width_pt, page_height_pt).is_ok())
        .map(|cell| cell.rect)
        .collect()
}

// =============================================================================
// Rows Per Page
// =============================================================================

/// Number of grid rows to use on `page_index` of a `page_count`-page document
pub fn rows_for_page(config: &GridConfig, page_index: usize, page_count: usize) -> usize {
    if page_index + 1 == page_count {
        config.last_page_rows.unwrap_or(config.rows)
    } else {
        config.rows
    }
}

// =============================================================================
// Tests
// =============================================================================
