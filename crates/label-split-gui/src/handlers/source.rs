use label_async_runtime::{DocumentId, GridConfig, GuiUpdate};
use label_split::constants::PREVIEW_RENDER_SCALE;
use label_split::render::page_frame;
use lopdf::Document;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::mpsc;

use crate::viewer::{RenderCache, render_page};

/// A loaded source PDF
struct SourceEntry {
    path: PathBuf,
    document: Document,
}

/// Source documents open in the worker, with their rendered pages
#[derive(Default)]
pub struct SourceStore {
    documents: HashMap<DocumentId, SourceEntry>,
    cache: RenderCache,
    next_id: u64,
}

impl SourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, path: PathBuf, document: Document) -> DocumentId {
        self.next_id += 1;
        let doc_id = DocumentId(self.next_id);
        self.documents.insert(doc_id, SourceEntry { path, document });
        doc_id
    }
}

pub async fn handle_load(
    path: PathBuf,
    store: &mut SourceStore,
    update_tx: &mpsc::UnboundedSender<GuiUpdate>,
) {
    let result = async {
        label_split::ensure_input_file(&path).await?;
        label_split::load_pdf(&path).await
    }
    .await;

    match result {
        Ok(document) => {
            let page_count = document.get_pages().len();
            let doc_id = store.insert(path.clone(), document);
            log::info!("Loaded {} ({} pages)", path.display(), page_count);
            let _ = update_tx.send(GuiUpdate::SourceLoaded {
                doc_id,
                path,
                page_count,
            });
        }
        Err(e) => {
            let _ = update_tx.send(GuiUpdate::Error {
                message: format!("Failed to load {}: {}", path.display(), e),
            });
        }
    }
}

pub async fn handle_render_preview(
    doc_id: DocumentId,
    page_index: usize,
    store: &mut SourceStore,
    update_tx: &mpsc::UnboundedSender<GuiUpdate>,
) {
    let Some(entry) = store.documents.get(&doc_id) else {
        let _ = update_tx.send(GuiUpdate::Error {
            message: format!("Document not found: {:?}", doc_id),
        });
        return;
    };

    let Some(&page_id) = entry.document.get_pages().values().nth(page_index) else {
        let _ = update_tx.send(GuiUpdate::Error {
            message: format!("Page {} does not exist", page_index + 1),
        });
        return;
    };

    // Rotated pages are measured as displayed, matching the pdfium render
    let frame = match page_frame(&entry.document, page_id) {
        Ok(frame) => frame,
        Err(e) => {
            let _ = update_tx.send(GuiUpdate::Error {
                message: format!("Failed to read page {}: {}", page_index + 1, e),
            });
            return;
        }
    };

    let cache_key = (doc_id, page_index);
    let rendered = if let Some(cached) = store.cache.get(&cache_key) {
        Ok(cached.clone())
    } else {
        let path = entry.path.clone();
        let page_width_pt = frame.width();
        match tokio::task::spawn_blocking(move || {
            render_page(&path, page_index, page_width_pt, PREVIEW_RENDER_SCALE)
        })
        .await
        {
            Ok(Ok(page)) => {
                store.cache.insert(cache_key, page.clone());
                Ok(page)
            }
            Ok(Err(e)) => Err(format!("Failed to render page {}: {}", page_index + 1, e)),
            Err(e) => Err(format!("Task join error: {}", e)),
        }
    };

    match rendered {
        Ok(page) => {
            let _ = update_tx.send(GuiUpdate::PreviewRendered {
                doc_id,
                page_index,
                page_width_pt: frame.width(),
                page_height_pt: frame.height(),
                width: page.width,
                height: page.height,
                rgba_data: page.rgba_data,
            });
        }
        Err(message) => {
            let _ = update_tx.send(GuiUpdate::Error { message });
        }
    }
}

pub async fn handle_calculate_stats(
    doc_id: DocumentId,
    config: GridConfig,
    store: &SourceStore,
    update_tx: &mpsc::UnboundedSender<GuiUpdate>,
) {
    let Some(entry) = store.documents.get(&doc_id) else {
        return;
    };

    match label_split::calculate_statistics(&entry.document, &config) {
        Ok(stats) => {
            let _ = update_tx.send(GuiUpdate::StatsCalculated { doc_id, stats });
        }
        Err(e) => {
            log::warn!("Failed to calculate statistics: {}", e);
        }
    }
}

pub async fn handle_close(
    doc_id: DocumentId,
    store: &mut SourceStore,
    update_tx: &mpsc::UnboundedSender<GuiUpdate>,
) {
    store.documents.remove(&doc_id);
    store.cache.remove_document(doc_id);
    let _ = update_tx.send(GuiUpdate::SourceClosed { doc_id });
}
