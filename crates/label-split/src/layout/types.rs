//! Layout data types for label extraction
//!
//! Rectangles here live in page space with the origin at the top-left
//! corner of the visible page box and y growing downward. The render module
//! converts them to PDF user space.

/// A label rectangle in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LabelRect {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl LabelRect {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Create a rectangle from its top-left corner and size
    pub fn from_origin_size(x0: f32, y0: f32, width: f32, height: f32) -> Self {
        Self::new(x0, y0, x0 + width, y0 + height)
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// True when the rectangle has no area (or a negative or NaN extent)
    pub fn is_degenerate(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }
}

impl std::fmt::Display for LabelRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{:.2}, {:.2}, {:.2}, {:.2}]",
            self.x0, self.y0, self.x1, self.y1
        )
    }
}

/// One candidate position in the label grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    /// Row index (0 = top row)
    pub row: usize,
    /// Column index (0 = leftmost column)
    pub col: usize,
    /// Cell bounds in page space
    pub rect: LabelRect,
}

/// Why a grid cell was not extracted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellRejection {
    /// Zero or negative width or height
    Degenerate,
    /// Extends past the right or bottom page edge
    OutOfBounds,
}

impl std::fmt::Display for CellRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellRejection::Degenerate => f.write_str("invalid area"),
            CellRejection::OutOfBounds => f.write_str("outside page bounds"),
        }
    }
}
