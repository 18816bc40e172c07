use label_async_runtime::DocumentId;
use pdfium_render::prelude::*;
use std::collections::{HashMap, VecDeque};
use std::path::Path;

/// Initialize Pdfium, trying the vendored library first, then falling back to system
pub fn init_pdfium() -> Result<Pdfium, PdfiumError> {
    // When running from cargo, the working directory is the workspace root
    let vendor_path = std::env::current_dir().ok().and_then(|mut p| {
        p.push("vendor/pdfium/lib");
        if p.exists() { Some(p) } else { None }
    });

    if let Some(vendor_path) = vendor_path {
        if let Ok(binding) =
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&vendor_path))
        {
            return Ok(Pdfium::new(binding));
        }
    }

    Pdfium::bind_to_system_library().map(Pdfium::new)
}

/// A rendered source page
#[derive(Clone)]
pub struct RenderedPage {
    pub rgba_data: Vec<u8>,
    pub width: usize,
    pub height: usize,
}

/// Render one page at `scale` pixels per point
pub fn render_page(
    path: &Path,
    page_index: usize,
    page_width_pt: f32,
    scale: f32,
) -> Result<RenderedPage, PdfiumError> {
    let pdfium = init_pdfium()?;
    let document = pdfium.load_pdf_from_file(path, None)?;
    let page = document.pages().get(page_index as u16)?;

    let target_width = (page_width_pt * scale).round().max(1.0) as i32;
    let config = PdfRenderConfig::new().set_target_width(target_width);

    let bitmap = page.render_with_config(&config)?;
    Ok(RenderedPage {
        rgba_data: bitmap.as_rgba_bytes().to_vec(),
        width: bitmap.width() as usize,
        height: bitmap.height() as usize,
    })
}

/// Maximum number of rendered pages to keep
const MAX_CACHED_PAGES: usize = 20;

/// LRU cache of rendered preview pages
#[derive(Default)]
pub struct RenderCache {
    pages: HashMap<(DocumentId, usize), RenderedPage>,
    order: VecDeque<(DocumentId, usize)>,
}

impl RenderCache {
    pub fn insert(&mut self, key: (DocumentId, usize), page: RenderedPage) {
        if self.pages.contains_key(&key) {
            self.order.retain(|k| k != &key);
        }

        while self.order.len() >= MAX_CACHED_PAGES {
            if let Some(old_key) = self.order.pop_front() {
                self.pages.remove(&old_key);
            }
        }

        self.pages.insert(key, page);
        self.order.push_back(key);
    }

    pub fn get(&mut self, key: &(DocumentId, usize)) -> Option<&RenderedPage> {
        if self.pages.contains_key(key) {
            self.order.retain(|k| k != key);
            self.order.push_back(*key);
            self.pages.get(key)
        } else {
            None
        }
    }

    pub fn remove_document(&mut self, doc_id: DocumentId) {
        self.order.retain(|(id, _)| *id != doc_id);
        self.pages.retain(|(id, _), _| *id != doc_id);
    }
}
