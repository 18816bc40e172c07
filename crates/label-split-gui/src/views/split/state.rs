use eframe::egui;
use label_async_runtime::DocumentId;
use label_split::{GridConfig, GridForm, LabelPreset, SplitStatistics};
use std::path::PathBuf;

/// A page rendered for the preview panel
pub struct PreviewPage {
    pub page_index: usize,
    pub texture: egui::TextureHandle,
    /// Visible page size in points
    pub page_width_pt: f32,
    pub page_height_pt: f32,
}

/// The loaded source document
pub struct SourceView {
    pub doc_id: DocumentId,
    pub page_count: usize,
    pub current_page: usize,
    pub page: Option<PreviewPage>,
}

impl SourceView {
    pub fn new(doc_id: DocumentId, page_count: usize) -> Self {
        Self {
            doc_id,
            page_count,
            current_page: 0,
            page: None,
        }
    }
}

pub struct SplitState {
    /// Raw text of the grid fields
    pub form: GridForm,
    /// Preset matching the current grid, if any
    pub preset: Option<LabelPreset>,
    /// Last grid the form parsed to; drives the overlay and statistics
    pub config: GridConfig,
    pub form_error: Option<String>,
    pub input_path: Option<PathBuf>,
    pub output_path: String,
    pub source: Option<SourceView>,
    pub stats: Option<SplitStatistics>,
    pub busy: bool,
    pub needs_stats: bool,
}

impl Default for SplitState {
    fn default() -> Self {
        let config = GridConfig::default();
        Self {
            form: GridForm::from_config(&config),
            preset: Some(LabelPreset::default()),
            config,
            form_error: None,
            input_path: None,
            output_path: String::new(),
            source: None,
            stats: None,
            busy: false,
            needs_stats: false,
        }
    }
}

impl SplitState {
    /// Re-parse the form. Returns true when it parsed to a different grid.
    pub fn refresh_config(&mut self) -> bool {
        match self.form.to_config() {
            Ok(config) => {
                self.form_error = None;
                self.preset = LabelPreset::ALL.into_iter().find(|p| p.config() == config);
                if config != self.config {
                    self.config = config;
                    self.needs_stats = true;
                    return true;
                }
                false
            }
            Err(e) => {
                self.form_error = Some(e.to_string());
                false
            }
        }
    }

    /// Replace the whole form, e.g. from a preset or a loaded file
    pub fn set_config(&mut self, config: &GridConfig) {
        self.form = GridForm::from_config(config);
        self.refresh_config();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_tracks_preset() {
        let mut state = SplitState::default();
        state.set_config(&LabelPreset::Compact.config());
        assert_eq!(state.preset, Some(LabelPreset::Compact));
        assert!(state.needs_stats);

        state.form.rows = "4".to_string();
        assert!(state.refresh_config());
        assert_eq!(state.preset, None);
        assert_eq!(state.config.rows, 4);
    }

    #[test]
    fn test_refresh_keeps_last_good_config() {
        let mut state = SplitState::default();
        state.form.label_width = "wide".to_string();

        assert!(!state.refresh_config());
        assert!(state.form_error.is_some());
        assert_eq!(state.config, GridConfig::default());

        state.form.label_width = "75".to_string();
        assert!(!state.refresh_config());
        assert!(state.form_error.is_none());
    }
}
