use eframe::egui;
use label_async_runtime::{GuiCommand, WorkerHandle};
use std::path::Path;

use super::state::SplitState;

pub fn show(ui: &mut egui::Ui, state: &mut SplitState, worker: &WorkerHandle) {
    egui::CollapsingHeader::new("📄 Files")
        .default_open(true)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                if ui.button("📂 Open PDF...").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("PDF", &["pdf"])
                        .pick_file()
                    {
                        log::info!("Opening {}", path.display());
                        let _ = worker.send(GuiCommand::LoadSource { path });
                    }
                }
            });

            match &state.input_path {
                Some(path) => {
                    ui.label(format!("Input: {}", display_name(path)))
                        .on_hover_text(path.display().to_string());
                }
                None => {
                    ui.weak("No input file");
                }
            }

            ui.add_space(5.0);
            ui.label("Output:");
            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut state.output_path)
                        .desired_width(200.0)
                        .hint_text("<input>_split.pdf"),
                );
                if ui.button("Save As...").clicked() {
                    pick_output(state);
                }
            });
        });
}

fn pick_output(state: &mut SplitState) {
    let mut dialog = rfd::FileDialog::new().add_filter("PDF", &["pdf"]);

    let current = Path::new(state.output_path.trim());
    if let Some(name) = current.file_name() {
        dialog = dialog.set_file_name(name.to_string_lossy());
    }
    if let Some(dir) = current.parent().filter(|d| d.is_dir()) {
        dialog = dialog.set_directory(dir);
    }

    if let Some(path) = dialog.save_file() {
        state.output_path = path.display().to_string();
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
