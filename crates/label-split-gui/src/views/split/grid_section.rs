use eframe::egui;
use label_split::LabelPreset;

use super::state::SplitState;
use crate::ui_components::{NumberField, enum_selector};

pub fn show(ui: &mut egui::Ui, state: &mut SplitState) {
    egui::CollapsingHeader::new("📐 Label Grid")
        .default_open(true)
        .show(ui, |ui| {
            let options: Vec<(Option<LabelPreset>, &str)> = LabelPreset::ALL
                .into_iter()
                .map(|preset| (Some(preset), preset.name()))
                .collect();

            let mut preset = state.preset;
            if enum_selector(ui, "label_preset", "Preset:", &mut preset, &options) {
                if let Some(preset) = preset {
                    state.set_config(&preset.config());
                }
            }

            ui.add_space(5.0);

            let form = &mut state.form;
            let changed = egui::Grid::new("grid_fields")
                .num_columns(2)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    let mut changed = false;
                    changed |= NumberField::new("Label width", &mut form.label_width)
                        .suffix("mm")
                        .show(ui);
                    changed |= NumberField::new("Label height", &mut form.label_height)
                        .suffix("mm")
                        .show(ui);
                    changed |= NumberField::new("Left margin", &mut form.margin_left)
                        .suffix("mm")
                        .show(ui);
                    changed |= NumberField::new("Top margin", &mut form.margin_top)
                        .suffix("mm")
                        .show(ui);
                    changed |= NumberField::new("Right margin", &mut form.margin_right)
                        .suffix("mm")
                        .show(ui);
                    changed |= NumberField::new("Bottom margin", &mut form.margin_bottom)
                        .suffix("mm")
                        .show(ui);
                    changed |=
                        NumberField::new("Horizontal spacing", &mut form.spacing_horizontal)
                            .suffix("mm")
                            .show(ui);
                    changed |= NumberField::new("Vertical spacing", &mut form.spacing_vertical)
                        .suffix("mm")
                        .show(ui);
                    changed |= NumberField::new("Rows", &mut form.rows).show(ui);
                    changed |= NumberField::new("Columns", &mut form.cols).show(ui);
                    changed |= NumberField::new("Last page rows", &mut form.last_page_rows)
                        .hint("same as rows")
                        .show(ui);
                    changed
                })
                .inner;

            if changed {
                state.refresh_config();
            }

            if let Some(error) = &state.form_error {
                ui.colored_label(egui::Color32::from_rgb(220, 80, 80), error);
            }
        });
}
