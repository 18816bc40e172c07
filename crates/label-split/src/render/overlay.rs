//! Grid overlay marks
//!
//! Generates PDF content stream operations that outline grid cells with
//! dashed rectangles, in the style of printer's fold lines.

use crate::constants::{
    OVERLAY_ACCEPTED_RGB, OVERLAY_DASH_PATTERN, OVERLAY_LINE_WIDTH, OVERLAY_REJECTED_RGB,
};
use crate::layout::LabelRect;

/// A cell to outline, with whether it will be extracted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayCell {
    pub rect: LabelRect,
    pub accepted: bool,
}

/// Generate overlay operations for a page of the given height.
///
/// Coordinates are relative to the page box origin; the caller places the
/// page box at (0, 0).
pub fn overlay_ops(cells: &[OverlayCell], page_height: f32) -> String {
    let mut ops = String::new();

    ops.push_str("q\n");
    ops.push_str(&format!("{} w\n", OVERLAY_LINE_WIDTH));
    ops.push_str(OVERLAY_DASH_PATTERN);
    ops.push('\n');

    // Rejected first so accepted outlines draw on top where they touch
    for (accepted, (r, g, b)) in [(false, OVERLAY_REJECTED_RGB), (true, OVERLAY_ACCEPTED_RGB)] {
        let group: Vec<&OverlayCell> = cells
            .iter()
            .filter(|cell| cell.accepted == accepted && !cell.rect.is_degenerate())
            .collect();
        if group.is_empty() {
            continue;
        }

        ops.push_str(&format!("{} {} {} RG\n", r, g, b));
        for cell in group {
            let rect = &cell.rect;
            ops.push_str(&format!(
                "{} {} {} {} re S\n",
                rect.x0,
                page_height - rect.y1,
                rect.width(),
                rect.height()
            ));
        }
    }

    ops.push_str("Q\n");
    ops
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_flips_y() {
        let cells = [OverlayCell {
            rect: LabelRect::new(10.0, 20.0, 110.0, 70.0),
            accepted: true,
        }];

        let ops = overlay_ops(&cells, 800.0);

        assert!(ops.contains("1 0 0 RG\n"));
        assert!(ops.contains("10 730 100 50 re S\n"));
        assert!(ops.starts_with("q\n"));
        assert!(ops.ends_with("Q\n"));
    }

    #[test]
    fn test_overlay_skips_degenerate_cells() {
        let cells = [OverlayCell {
            rect: LabelRect::new(10.0, 20.0, 10.0, 70.0),
            accepted: false,
        }];

        let ops = overlay_ops(&cells, 800.0);

        assert!(!ops.contains("re S"));
    }
}
