//! Label extraction - cutting label sheets into one page per label
//!
//! This module orchestrates the split:
//! 1. Load the source document
//! 2. Plan the label rectangles for every page
//! 3. Render one clipped page per rectangle
//! 4. Save the output document

mod io;

pub use io::{ensure_input_file, load_pdf, save_pdf};

use crate::options::GridConfig;
use crate::plan::{SplitPlan, plan_split};
use crate::render::{OutputDocument, create_page_xobject, render_label_page};
use crate::stats::SplitStatistics;
use crate::types::*;
use lopdf::{Document, ObjectId};
use std::collections::HashMap;
use std::path::Path;

/// Split the PDF at `source_path` into label pages and save them to
/// `output_path`, replacing any existing file.
///
/// Nothing is written unless every page was processed.
pub async fn split_into_tiles(
    source_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &GridConfig,
) -> Result<SplitStatistics> {
    config.validate()?;

    let source_path = source_path.as_ref();
    let output_path = output_path.as_ref();
    log::info!("Splitting {}", source_path.display());

    let source = load_pdf(source_path).await?;
    let config = config.clone();

    let (output, stats) = tokio::task::spawn_blocking(move || {
        let plan = plan_split(&source, &config)?;
        let output = render_plan(&source, &plan)?;
        Ok::<_, LabelSplitError>((output, SplitStatistics::from(&plan)))
    })
    .await??;

    save_pdf(output, output_path).await?;
    log::info!(
        "Saved {} labels from {} pages to {}",
        stats.labels,
        stats.source_pages,
        output_path.display()
    );

    Ok(stats)
}

/// Split a loaded document into label pages
pub async fn split(source: &Document, config: &GridConfig) -> Result<Document> {
    config.validate()?;

    let source = source.clone();
    let config = config.clone();

    tokio::task::spawn_blocking(move || split_document(&source, &config)).await?
}

/// Split a loaded document into label pages on the current thread
pub fn split_document(source: &Document, config: &GridConfig) -> Result<Document> {
    let plan = plan_split(source, config)?;
    render_plan(source, &plan)
}

/// Render every planned label into a new document
fn render_plan(source: &Document, plan: &SplitPlan) -> Result<Document> {
    let mut output = OutputDocument::new();
    let pages_id = output.pages_id();
    let mut resource_cache: HashMap<ObjectId, ObjectId> = HashMap::new();

    for page in &plan.pages {
        if page.rects.is_empty() {
            continue;
        }

        let xobject_id = create_page_xobject(
            output.document_mut(),
            source,
            page.page_id,
            &page.frame.page_box,
            &mut resource_cache,
        )?;

        for rect in &page.rects {
            let label_id = render_label_page(
                output.document_mut(),
                xobject_id,
                &page.frame,
                rect,
                plan.label_width_pt,
                plan.label_height_pt,
                pages_id,
            )?;
            output.push_page(label_id);
        }
    }

    log::debug!("Rendered {} label pages", output.page_count());
    Ok(output.finish())
}
