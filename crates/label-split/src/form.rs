//! Text form for grid parameters
//!
//! Front ends keep the raw text of every field while the user edits it and
//! turn it into a [`GridConfig`] in one step when the user applies it.

use crate::options::{GridConfig, Margins, Spacing};
use crate::types::*;

/// Raw, unvalidated text of every grid field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridForm {
    pub label_width: String,
    pub label_height: String,
    pub margin_left: String,
    pub margin_top: String,
    pub margin_right: String,
    pub margin_bottom: String,
    pub spacing_horizontal: String,
    pub spacing_vertical: String,
    pub rows: String,
    pub cols: String,
    /// Blank means the last page uses the regular row count
    pub last_page_rows: String,
}

impl Default for GridForm {
    fn default() -> Self {
        Self::from_config(&GridConfig::default())
    }
}

impl GridForm {
    /// Fill the form from an existing configuration
    pub fn from_config(config: &GridConfig) -> Self {
        Self {
            label_width: config.label_width_mm.to_string(),
            label_height: config.label_height_mm.to_string(),
            margin_left: config.margins.left_mm.to_string(),
            margin_top: config.margins.top_mm.to_string(),
            margin_right: config.margins.right_mm.to_string(),
            margin_bottom: config.margins.bottom_mm.to_string(),
            spacing_horizontal: config.spacing.horizontal_mm.to_string(),
            spacing_vertical: config.spacing.vertical_mm.to_string(),
            rows: config.rows.to_string(),
            cols: config.cols.to_string(),
            last_page_rows: config
                .last_page_rows
                .map(|rows| rows.to_string())
                .unwrap_or_default(),
        }
    }

    /// Parse every field into a configuration.
    ///
    /// The first field that fails to parse is reported by name.
    pub fn to_config(&self) -> Result<GridConfig> {
        let config = GridConfig {
            label_width_mm: parse_mm("label width", &self.label_width)?,
            label_height_mm: parse_mm("label height", &self.label_height)?,
            margins: Margins {
                left_mm: parse_mm("left margin", &self.margin_left)?,
                top_mm: parse_mm("top margin", &self.margin_top)?,
                right_mm: parse_mm("right margin", &self.margin_right)?,
                bottom_mm: parse_mm("bottom margin", &self.margin_bottom)?,
            },
            spacing: Spacing {
                horizontal_mm: parse_mm("horizontal spacing", &self.spacing_horizontal)?,
                vertical_mm: parse_mm("vertical spacing", &self.spacing_vertical)?,
            },
            rows: parse_count("rows", &self.rows)?,
            cols: parse_count("columns", &self.cols)?,
            last_page_rows: if self.last_page_rows.trim().is_empty() {
                None
            } else {
                Some(parse_count("last page rows", &self.last_page_rows)?)
            },
        };
        config.validate()?;
        Ok(config)
    }
}

fn parse_mm(field: &str, text: &str) -> Result<f32> {
    let text = text.trim();
    if text.is_empty() {
        return Err(invalid(field, "value is required"));
    }
    // Accept a decimal comma as well as a decimal point
    let value: f32 = text
        .replace(',', ".")
        .parse()
        .map_err(|_| invalid(field, &format!("'{}' is not a number", text)))?;
    if !value.is_finite() {
        return Err(invalid(field, &format!("'{}' is not a finite number", text)));
    }
    Ok(value)
}

fn parse_count(field: &str, text: &str) -> Result<usize> {
    let text = text.trim();
    if text.is_empty() {
        return Err(invalid(field, "value is required"));
    }
    text.parse()
        .map_err(|_| invalid(field, &format!("'{}' is not a whole number", text)))
}

fn invalid(field: &str, reason: &str) -> LabelSplitError {
    LabelSplitError::InvalidField {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
