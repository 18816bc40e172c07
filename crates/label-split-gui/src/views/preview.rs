//! Central panel: the selected source page with the label grid drawn over it

use eframe::egui;
use label_async_runtime::{GuiCommand, WorkerHandle};
use label_split::layout::check_cell;
use label_split::render::OverlayCell;
use label_split::{GridConfig, LabelRect, grid_cells, rows_for_page};

use super::split::{SourceView, SplitState};

const ACCEPTED_COLOR: egui::Color32 = egui::Color32::from_rgb(230, 30, 30);
const REJECTED_COLOR: egui::Color32 = egui::Color32::from_rgb(150, 150, 150);
const DASH_LENGTH: f32 = 6.0;
const GAP_LENGTH: f32 = 4.0;

/// Grid cells for one page, with the same row rule and bounds check as the split
pub fn overlay_cells(
    config: &GridConfig,
    page_index: usize,
    page_count: usize,
    page_width_pt: f32,
    page_height_pt: f32,
) -> Vec<OverlayCell> {
    let rows = rows_for_page(config, page_index, page_count);
    grid_cells(config, rows)
        .into_iter()
        .filter(|cell| !cell.rect.is_degenerate())
        .map(|cell| OverlayCell {
            rect: cell.rect,
            accepted: check_cell(&cell.rect, page_width_pt, page_height_pt).is_ok(),
        })
        .collect()
}

/// Map a rect in page points onto the image drawn at `image_rect`
pub fn to_screen(rect: &LabelRect, image_rect: egui::Rect, page_width_pt: f32) -> egui::Rect {
    let scale = image_rect.width() / page_width_pt;
    egui::Rect::from_min_max(
        image_rect.min + egui::vec2(rect.x0 * scale, rect.y0 * scale),
        image_rect.min + egui::vec2(rect.x1 * scale, rect.y1 * scale),
    )
}

pub fn show(ui: &mut egui::Ui, state: &mut SplitState, worker: &WorkerHandle) {
    let Some(source) = &mut state.source else {
        ui.centered_and_justified(|ui| {
            ui.label("Open a label sheet PDF or drop one here");
        });
        return;
    };

    show_navigation(ui, source, worker);
    ui.separator();

    let Some(page) = &source.page else {
        ui.centered_and_justified(|ui| {
            ui.spinner();
        });
        return;
    };

    let cells = overlay_cells(
        &state.config,
        page.page_index,
        source.page_count,
        page.page_width_pt,
        page.page_height_pt,
    );

    egui::ScrollArea::both().show(ui, |ui| {
        let size = page.texture.size_vec2();
        let response = ui.add(egui::Image::new((page.texture.id(), size)).fit_to_exact_size(size));
        let image_rect = response.rect;
        let painter = ui.painter_at(image_rect);

        // Rejected first so accepted outlines draw on top where they touch
        for accepted in [false, true] {
            let color = if accepted {
                ACCEPTED_COLOR
            } else {
                REJECTED_COLOR
            };
            for cell in cells.iter().filter(|c| c.accepted == accepted) {
                let r = to_screen(&cell.rect, image_rect, page.page_width_pt);
                let outline = [
                    r.left_top(),
                    r.right_top(),
                    r.right_bottom(),
                    r.left_bottom(),
                    r.left_top(),
                ];
                painter.extend(egui::Shape::dashed_line(
                    &outline,
                    egui::Stroke::new(1.5, color),
                    DASH_LENGTH,
                    GAP_LENGTH,
                ));
            }
        }
    });
}

fn show_navigation(ui: &mut egui::Ui, source: &mut SourceView, worker: &WorkerHandle) {
    ui.horizontal(|ui| {
        let can_go_back = source.current_page > 0;
        let can_go_forward = source.current_page + 1 < source.page_count;

        let mut target = None;
        if ui
            .add_enabled(can_go_back, egui::Button::new("◀ Previous"))
            .clicked()
        {
            target = Some(source.current_page - 1);
        }

        ui.label(format!(
            "Page {} of {}",
            source.current_page + 1,
            source.page_count
        ));

        if ui
            .add_enabled(can_go_forward, egui::Button::new("Next ▶"))
            .clicked()
        {
            target = Some(source.current_page + 1);
        }

        if let Some(page_index) = target {
            source.current_page = page_index;
            let _ = worker.send(GuiCommand::RenderPreview {
                doc_id: source.doc_id,
                page_index,
            });
        }
    });
}
