//! Split planning: which regions of which pages become labels
//!
//! Planning reads page boxes from the source document and runs the grid
//! calculation for every page. Nothing is written; the plan is the input to
//! rendering, statistics and previews.

use crate::layout::{CellRejection, GridCell, LabelRect, check_cell, grid_cells, rows_for_page};
use crate::options::GridConfig;
use crate::render::{PageFrame, page_frame};
use crate::types::*;
use lopdf::{Document, ObjectId};

/// A grid cell that will not be extracted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RejectedCell {
    pub cell: GridCell,
    pub reason: CellRejection,
}

/// Extraction plan for one source page
#[derive(Debug, Clone, PartialEq)]
pub struct PagePlan {
    /// Zero-based index of the page in the source document
    pub page_index: usize,
    /// Source page object
    pub page_id: ObjectId,
    /// Visible page box and rotation
    pub frame: PageFrame,
    /// Grid rows used for this page
    pub rows: usize,
    /// Label rectangles to extract, in output order
    pub rects: Vec<LabelRect>,
    /// Cells dropped by the validity or bounds check
    pub rejected: Vec<RejectedCell>,
}

impl PagePlan {
    /// Build the plan for one page from its displayed frame and row count.
    pub fn new(
        config: &GridConfig,
        page_index: usize,
        page_id: ObjectId,
        frame: PageFrame,
        rows: usize,
    ) -> Self {
        let width = frame.width();
        let height = frame.height();

        let mut rects = Vec::new();
        let mut rejected = Vec::new();
        for cell in grid_cells(config, rows) {
            match check_cell(&cell.rect, width, height) {
                Ok(()) => {
                    log::debug!("Page {}: processing region {}", page_index, cell.rect);
                    rects.push(cell.rect);
                }
                Err(reason) => {
                    log::debug!(
                        "Page {}: skipped region {} ({})",
                        page_index,
                        cell.rect,
                        reason
                    );
                    rejected.push(RejectedCell { cell, reason });
                }
            }
        }

        Self {
            page_index,
            page_id,
            frame,
            rows,
            rects,
            rejected,
        }
    }

    /// Number of grid cells considered on this page
    pub fn candidate_count(&self) -> usize {
        self.rects.len() + self.rejected.len()
    }
}

/// Extraction plan for a whole document
#[derive(Debug, Clone, PartialEq)]
pub struct SplitPlan {
    pub pages: Vec<PagePlan>,
    /// Output page width in points
    pub label_width_pt: f32,
    /// Output page height in points
    pub label_height_pt: f32,
}

impl SplitPlan {
    /// Total number of labels (output pages)
    pub fn label_count(&self) -> usize {
        self.pages.iter().map(|p| p.rects.len()).sum()
    }

    /// Total number of grid cells considered
    pub fn candidate_count(&self) -> usize {
        self.pages.iter().map(PagePlan::candidate_count).sum()
    }

    /// Total number of cells dropped
    pub fn skipped_count(&self) -> usize {
        self.pages.iter().map(|p| p.rejected.len()).sum()
    }
}

/// Plan the extraction of every page in `source`
pub fn plan_split(source: &Document, config: &GridConfig) -> Result<SplitPlan> {
    let page_ids: Vec<ObjectId> = source.get_pages().values().copied().collect();
    let page_count = page_ids.len();

    let mut pages = Vec::with_capacity(page_count);
    for (page_index, &page_id) in page_ids.iter().enumerate() {
        pages.push(plan_page(source, config, page_index, page_count, page_id)?);
    }

    Ok(SplitPlan {
        pages,
        label_width_pt: config.label_width_pt(),
        label_height_pt: config.label_height_pt(),
    })
}

/// Plan a single page of `source`
pub(crate) fn plan_page(
    source: &Document,
    config: &GridConfig,
    page_index: usize,
    page_count: usize,
    page_id: ObjectId,
) -> Result<PagePlan> {
    let frame = page_frame(source, page_id)?;
    if frame.rotation != 0 {
        log::debug!(
            "Page {} is rotated {} degrees; measuring the displayed page",
            page_index,
            frame.rotation
        );
    }

    let rows = rows_for_page(config, page_index, page_count);
    log::info!(
        "Page {}: {:.2} x {:.2} pt, {} rows x {} cols",
        page_index,
        frame.width(),
        frame.height(),
        rows,
        config.cols
    );

    Ok(PagePlan::new(config, page_index, page_id, frame, rows))
}
