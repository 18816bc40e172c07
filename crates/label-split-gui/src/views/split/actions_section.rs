use eframe::egui;
use label_async_runtime::{GuiCommand, WorkerHandle};
use label_split::default_output_path;
use std::path::PathBuf;

use super::state::SplitState;
use crate::views::dialogs::show_error;

pub fn show(ui: &mut egui::Ui, state: &mut SplitState, worker: &WorkerHandle) {
    ui.vertical(|ui| {
        ui.horizontal(|ui| {
            if ui.button("💾 Save Configuration").clicked() {
                save_configuration(state, worker);
            }

            if ui.button("📂 Load Configuration").clicked() {
                load_configuration(worker);
            }
        });

        ui.add_space(10.0);

        let apply = ui.add_enabled(!state.busy, egui::Button::new("✂ Apply"));
        if apply.clicked() {
            apply_split(state, worker);
        }
    });
}

fn save_configuration(state: &SplitState, worker: &WorkerHandle) {
    let config = match state.form.to_config() {
        Ok(config) => config,
        Err(e) => {
            show_error("Invalid grid", &e.to_string());
            return;
        }
    };

    if let Some(path) = rfd::FileDialog::new()
        .add_filter("JSON", &["json"])
        .set_file_name("label_grid.json")
        .save_file()
    {
        let _ = worker.send(GuiCommand::SaveConfig { path, config });
    }
}

fn load_configuration(worker: &WorkerHandle) {
    if let Some(path) = rfd::FileDialog::new()
        .add_filter("JSON", &["json"])
        .pick_file()
    {
        let _ = worker.send(GuiCommand::LoadConfig { path });
    }
}

/// Capture the form and start the split
fn apply_split(state: &mut SplitState, worker: &WorkerHandle) {
    let Some(input_path) = state.input_path.clone() else {
        show_error("No input file", "Open a label sheet PDF first.");
        return;
    };

    let config = match state.form.to_config() {
        Ok(config) => config,
        Err(e) => {
            show_error("Invalid grid", &e.to_string());
            return;
        }
    };

    let output_path = match state.output_path.trim() {
        "" => default_output_path(&input_path),
        path => PathBuf::from(path),
    };

    log::info!("Saving labels to: {}", output_path.display());
    if worker
        .send(GuiCommand::Split {
            input_path,
            output_path,
            config,
        })
        .is_ok()
    {
        state.busy = true;
    } else {
        show_error("Split failed", "The background worker is not running.");
    }
}
