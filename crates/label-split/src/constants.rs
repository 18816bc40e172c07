//! Shared constants for label splitting
//!
//! This module centralizes magic numbers and constants used throughout
//! the geometry, rendering and preview code.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter.
///
/// Rounded factor, not the exact 72 / 25.4. Every grid measurement goes
/// through it.
pub const MM_TO_PT: f32 = 2.8346;

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * MM_TO_PT
}

// =============================================================================
// Default Page Dimensions
// =============================================================================

/// Fallback page width in points when a page has no usable box (A4)
pub const DEFAULT_PAGE_WIDTH_PT: f32 = 595.0;

/// Fallback page height in points when a page has no usable box (A4)
pub const DEFAULT_PAGE_HEIGHT_PT: f32 = 842.0;

/// Default page dimensions as tuple (width, height)
pub const DEFAULT_PAGE_DIMENSIONS: (f32, f32) = (DEFAULT_PAGE_WIDTH_PT, DEFAULT_PAGE_HEIGHT_PT);

// =============================================================================
// Grid Defaults
// =============================================================================

/// Rows used on the last source page unless configured otherwise
pub const DEFAULT_LAST_PAGE_ROWS: usize = 7;

/// Largest number of grid cells generated for one page
pub const MAX_GRID_CELLS: usize = 10_000;

/// Suffix appended to the input file stem for the default output path
pub const OUTPUT_SUFFIX: &str = "_split";

/// Output file name used when no input path is available to derive one from
pub const DEFAULT_OUTPUT_FILE_NAME: &str = "output_labels.pdf";

// =============================================================================
// Overlay Preview
// =============================================================================

/// Line width for grid overlay rectangles (points)
pub const OVERLAY_LINE_WIDTH: f32 = 0.75;

/// Dash pattern for grid overlay rectangles: 4pt dash, 4pt gap
pub const OVERLAY_DASH_PATTERN: &str = "[4 4] 0 d";

/// Stroke color (RGB) for cells that will be extracted
pub const OVERLAY_ACCEPTED_RGB: (f32, f32, f32) = (1.0, 0.0, 0.0);

/// Stroke color (RGB) for cells that fall off the page
pub const OVERLAY_REJECTED_RGB: (f32, f32, f32) = (0.6, 0.6, 0.6);

/// Scale at which the GUI renders the preview page (pixels per point)
pub const PREVIEW_RENDER_SCALE: f32 = 2.0;
