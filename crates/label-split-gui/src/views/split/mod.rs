mod actions_section;
mod grid_section;
mod input_section;
mod state;
mod statistics_section;

pub use state::{PreviewPage, SourceView, SplitState};

use eframe::egui;
use label_async_runtime::{GuiCommand, WorkerHandle};

use crate::ui_components::section_gap;

pub fn show_split(ctx: &egui::Context, state: &mut SplitState, worker: &WorkerHandle) {
    egui::SidePanel::left("split_controls")
        .min_width(300.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Label Split");
                ui.separator();

                input_section::show(ui, state, worker);
                section_gap(ui);

                grid_section::show(ui, state);
                section_gap(ui);

                statistics_section::show(ui, state);
                section_gap(ui);

                actions_section::show(ui, state, worker);
            });
        });

    if state.needs_stats {
        request_stats(state, worker);
    }

    egui::CentralPanel::default().show(ctx, |ui| {
        super::preview::show(ui, state, worker);
    });
}

fn request_stats(state: &mut SplitState, worker: &WorkerHandle) {
    state.needs_stats = false;
    if let Some(source) = &state.source {
        let _ = worker.send(GuiCommand::CalculateStats {
            doc_id: source.doc_id,
            config: state.config.clone(),
        });
    }
}
