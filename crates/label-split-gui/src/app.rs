use eframe::egui;
use label_async_runtime::{GuiCommand, GuiUpdate, WorkerHandle};
use label_split::default_output_path;
use std::time::Duration;

use crate::logger::AppLogger;
use crate::views::dialogs::{show_error, show_info};
use crate::views::split::{PreviewPage, SourceView};
use crate::views::{SplitState, log_panel, show_split};

#[derive(Clone)]
struct ProgressState {
    operation: String,
    current: usize,
    total: usize,
}

pub struct LabelSplitApp {
    state: SplitState,
    status: String,
    show_log: bool,
    logger: AppLogger,

    // Async infrastructure
    worker: WorkerHandle,

    // Progress tracking
    progress: Option<ProgressState>,

    _tokio_handle: tokio::runtime::Handle,
}

impl LabelSplitApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        tokio_handle: tokio::runtime::Handle,
        logger: AppLogger,
    ) -> Self {
        let (worker, channels) = label_async_runtime::worker_channels();

        // Spawn worker task
        tokio_handle.spawn(crate::worker::worker_task(channels));

        Self {
            state: SplitState::default(),
            status: String::new(),
            show_log: false,
            logger,
            worker,
            progress: None,
            _tokio_handle: tokio_handle,
        }
    }

    fn handle_update(&mut self, ctx: &egui::Context, update: GuiUpdate) {
        match update {
            GuiUpdate::Progress {
                operation,
                current,
                total,
            } => {
                self.progress = Some(ProgressState {
                    operation,
                    current,
                    total,
                });
            }
            GuiUpdate::SourceLoaded {
                doc_id,
                path,
                page_count,
            } => {
                if let Some(previous) = self.state.source.take() {
                    let _ = self.worker.send(GuiCommand::CloseSource {
                        doc_id: previous.doc_id,
                    });
                }

                self.state.output_path = default_output_path(&path).display().to_string();
                self.state.input_path = Some(path);
                self.state.source = Some(SourceView::new(doc_id, page_count));
                self.state.stats = None;
                self.state.needs_stats = true;
                self.status = format!("Loaded PDF with {} pages", page_count);

                if page_count > 0 {
                    let _ = self.worker.send(GuiCommand::RenderPreview {
                        doc_id,
                        page_index: 0,
                    });
                }
            }
            GuiUpdate::PreviewRendered {
                doc_id,
                page_index,
                page_width_pt,
                page_height_pt,
                width,
                height,
                rgba_data,
            } => {
                let Some(source) = &mut self.state.source else {
                    return;
                };
                if source.doc_id != doc_id || source.current_page != page_index {
                    return;
                }

                let color_image =
                    egui::ColorImage::from_rgba_unmultiplied([width, height], &rgba_data);
                match &mut source.page {
                    Some(page) => {
                        page.texture.set(color_image, egui::TextureOptions::default());
                        page.page_index = page_index;
                        page.page_width_pt = page_width_pt;
                        page.page_height_pt = page_height_pt;
                    }
                    None => {
                        source.page = Some(PreviewPage {
                            page_index,
                            texture: ctx.load_texture(
                                "source_page",
                                color_image,
                                egui::TextureOptions::default(),
                            ),
                            page_width_pt,
                            page_height_pt,
                        });
                    }
                }
            }
            GuiUpdate::StatsCalculated { doc_id, stats } => {
                if self.state.source.as_ref().map(|s| s.doc_id) == Some(doc_id) {
                    self.state.stats = Some(stats);
                }
            }
            GuiUpdate::SplitComplete { path, stats } => {
                self.state.busy = false;
                self.progress = None;
                self.status = format!("Split {} labels → {}", stats.labels, path.display());
                show_info(
                    "Labels saved",
                    &format!("{} labels saved to\n{}", stats.labels, path.display()),
                );
            }
            GuiUpdate::SplitFailed {
                message,
                validation,
            } => {
                self.state.busy = false;
                self.progress = None;
                self.status = format!("Error: {message}");
                let title = if validation {
                    "Invalid input"
                } else {
                    "Split failed"
                };
                show_error(title, &message);
            }
            GuiUpdate::ConfigLoaded { config } => {
                self.state.set_config(&config);
                self.status = "Configuration loaded".to_string();
            }
            GuiUpdate::ConfigSaved { path } => {
                self.status = format!("Configuration saved → {}", path.display());
            }
            GuiUpdate::SourceClosed { doc_id } => {
                log::debug!("Closed source {:?}", doc_id);
            }
            GuiUpdate::Error { message } => {
                log::error!("{}", message);
                self.status = format!("Error: {message}");
                self.progress = None;
            }
        }
    }
}

impl eframe::App for LabelSplitApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Handle drag-and-drop for PDF files
        ctx.input(|i| {
            for file in &i.raw.dropped_files {
                if let Some(path) = &file.path {
                    if path.extension().and_then(|s| s.to_str()) == Some("pdf") {
                        let _ = self
                            .worker
                            .send(GuiCommand::LoadSource { path: path.clone() });
                        self.status = "Loading PDF...".to_string();
                    }
                }
            }
        });

        // Process all pending updates from worker
        while let Some(update) = self.worker.try_recv() {
            self.handle_update(ctx, update);
        }

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            if let Some(ref progress) = self.progress {
                ui.label(&progress.operation);
                ui.add(
                    egui::ProgressBar::new(progress.current as f32 / progress.total.max(1) as f32)
                        .animate(true),
                );
            }

            ui.horizontal(|ui| {
                ui.toggle_value(&mut self.show_log, "📜 Log");
                if !self.status.is_empty() {
                    ui.separator();
                    ui.label(&self.status);
                }
            });

            if self.show_log {
                ui.separator();
                log_panel::show(ui, &self.logger);
            }
        });

        show_split(ctx, &mut self.state, &self.worker);

        // Worker updates arrive between frames
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
