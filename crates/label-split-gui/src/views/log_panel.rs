use eframe::egui;
use log::Level;

use crate::logger::AppLogger;

pub fn show(ui: &mut egui::Ui, logger: &AppLogger) {
    ui.horizontal(|ui| {
        ui.strong("Log");
        if ui.small_button("Clear").clicked() {
            logger.clear();
        }
    });

    egui::ScrollArea::vertical()
        .max_height(140.0)
        .stick_to_bottom(true)
        .auto_shrink([false, true])
        .show(ui, |ui| {
            for entry in logger.entries() {
                let color = match entry.level {
                    Level::Error => egui::Color32::from_rgb(220, 80, 80),
                    Level::Warn => egui::Color32::from_rgb(220, 170, 60),
                    _ => ui.visuals().text_color(),
                };
                ui.label(
                    egui::RichText::new(format!(
                        "{} {:<5} {}",
                        entry.timestamp.format("%H:%M:%S"),
                        entry.level,
                        entry.message
                    ))
                    .monospace()
                    .color(color),
                )
                .on_hover_text(&entry.target);
            }
        });
}
