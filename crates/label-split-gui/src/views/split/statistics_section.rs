use eframe::egui;

use super::state::SplitState;

pub fn show(ui: &mut egui::Ui, state: &SplitState) {
    egui::CollapsingHeader::new("📊 Statistics")
        .default_open(true)
        .show(ui, |ui| {
            ui.label(format!(
                "Grid: {} × {} ({} cells per page)",
                state.config.rows,
                state.config.cols,
                state.config.cells_per_page()
            ));

            if let Some(stats) = &state.stats {
                ui.label(format!("Source pages: {}", stats.source_pages));
                ui.label(format!("Labels: {}", stats.labels));

                if stats.skipped > 0 {
                    ui.label(format!(
                        "Skipped cells: {} of {}",
                        stats.skipped, stats.candidate_cells
                    ));
                }
            } else {
                ui.label("No statistics available");
                ui.label("Open a PDF to see how many labels it yields");
            }
        });
}
