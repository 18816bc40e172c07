use crate::constants::{
    DEFAULT_LAST_PAGE_ROWS, DEFAULT_OUTPUT_FILE_NAME, MAX_GRID_CELLS, OUTPUT_SUFFIX, mm_to_pt,
};
use crate::types::*;
use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sheet margins around the label grid.
///
/// Only `left_mm` and `top_mm` position the grid. `right_mm` and `bottom_mm`
/// are carried with the configuration but are not used when deciding whether
/// a label fits on the page; the page edge is.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Margins {
    pub left_mm: f32,
    pub top_mm: f32,
    pub right_mm: f32,
    pub bottom_mm: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left_mm: 12.0,
            top_mm: 12.0,
            right_mm: 20.0,
            bottom_mm: 20.0,
        }
    }
}

impl Margins {
    /// Create uniform margins on all sides
    pub fn uniform(margin_mm: f32) -> Self {
        Self {
            left_mm: margin_mm,
            top_mm: margin_mm,
            right_mm: margin_mm,
            bottom_mm: margin_mm,
        }
    }
}

/// Gap between adjacent labels
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Spacing {
    /// Gap between columns
    pub horizontal_mm: f32,
    /// Gap between rows
    pub vertical_mm: f32,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            horizontal_mm: 15.0,
            vertical_mm: 0.0,
        }
    }
}

/// Known label sheet layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LabelPreset {
    /// 75 × 30 mm labels, 15 mm column gap, no row gap
    #[default]
    Standard,
    /// 58 × 40 mm labels, 2 mm gaps
    Compact,
}

impl LabelPreset {
    pub const ALL: [LabelPreset; 2] = [LabelPreset::Standard, LabelPreset::Compact];

    pub fn name(self) -> &'static str {
        match self {
            LabelPreset::Standard => "75 × 30 mm",
            LabelPreset::Compact => "58 × 40 mm",
        }
    }

    pub fn config(self) -> GridConfig {
        match self {
            LabelPreset::Standard => GridConfig::default(),
            LabelPreset::Compact => GridConfig {
                label_width_mm: 58.0,
                label_height_mm: 40.0,
                spacing: Spacing {
                    horizontal_mm: 2.0,
                    vertical_mm: 2.0,
                },
                ..GridConfig::default()
            },
        }
    }
}

/// Grid geometry for one split run.
///
/// All lengths are in millimeters. The value is captured once per run and
/// never mutated while a document is being split.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    // Label size
    pub label_width_mm: f32,
    pub label_height_mm: f32,

    // Placement
    pub margins: Margins,
    pub spacing: Spacing,

    // Grid dimensions
    pub rows: usize,
    pub cols: usize,

    /// Rows used on the last page of the source document.
    /// `None` means the last page uses `rows` like every other page.
    pub last_page_rows: Option<usize>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            label_width_mm: 75.0,
            label_height_mm: 30.0,
            margins: Margins::default(),
            spacing: Spacing::default(),
            rows: 9,
            cols: 2,
            last_page_rows: Some(DEFAULT_LAST_PAGE_ROWS),
        }
    }
}

impl GridConfig {
    /// Load a configuration from a JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let config: GridConfig = serde_json::from_slice(&bytes)
            .map_err(|e| LabelSplitError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration to a JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| LabelSplitError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the configuration.
    ///
    /// Zero-sized labels and empty grids are accepted: they produce no
    /// labels rather than an error.
    pub fn validate(&self) -> Result<()> {
        let lengths = [
            ("label width", self.label_width_mm),
            ("label height", self.label_height_mm),
            ("left margin", self.margins.left_mm),
            ("top margin", self.margins.top_mm),
            ("right margin", self.margins.right_mm),
            ("bottom margin", self.margins.bottom_mm),
            ("horizontal spacing", self.spacing.horizontal_mm),
            ("vertical spacing", self.spacing.vertical_mm),
        ];

        for (name, value) in lengths {
            if !value.is_finite() {
                return Err(LabelSplitError::Config(format!(
                    "{} must be a finite number",
                    name
                )));
            }
        }

        // Label size is left alone: degenerate labels are filtered by the grid
        for (name, value) in &lengths[2..] {
            if *value < 0.0 {
                return Err(LabelSplitError::Config(format!(
                    "{} must not be negative (got {})",
                    name, value
                )));
            }
        }

        let rows = self.rows.max(self.last_page_rows.unwrap_or(0));
        match rows.checked_mul(self.cols) {
            Some(cells) if cells <= MAX_GRID_CELLS => {}
            _ => {
                return Err(LabelSplitError::Config(format!(
                    "grid of {} rows x {} columns exceeds {} cells per page",
                    rows, self.cols, MAX_GRID_CELLS
                )));
            }
        }

        Ok(())
    }

    /// Label width in points
    pub fn label_width_pt(&self) -> f32 {
        mm_to_pt(self.label_width_mm)
    }

    /// Label height in points
    pub fn label_height_pt(&self) -> f32 {
        mm_to_pt(self.label_height_mm)
    }

    /// Number of grid cells on a full page
    pub fn cells_per_page(&self) -> usize {
        self.rows.saturating_mul(self.cols)
    }
}

/// Default output path for a given input: `<stem>_split.pdf` beside it
pub fn default_output_path(input: impl AsRef<Path>) -> PathBuf {
    let input = input.as_ref();
    match input.file_stem() {
        Some(stem) => {
            let mut name = stem.to_os_string();
            name.push(OUTPUT_SUFFIX);
            name.push(".pdf");
            input.with_file_name(name)
        }
        None => PathBuf::from(DEFAULT_OUTPUT_FILE_NAME),
    }
}
