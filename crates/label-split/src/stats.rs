use crate::options::GridConfig;
use crate::plan::{SplitPlan, plan_split};
use crate::types::*;
use lopdf::Document;

/// Statistics about a split run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SplitStatistics {
    /// Number of pages in the source document
    pub source_pages: usize,
    /// Grid cells considered across all pages
    pub candidate_cells: usize,
    /// Labels extracted (output pages)
    pub labels: usize,
    /// Cells dropped as degenerate or off the page
    pub skipped: usize,
}

impl From<&SplitPlan> for SplitStatistics {
    fn from(plan: &SplitPlan) -> Self {
        Self {
            source_pages: plan.pages.len(),
            candidate_cells: plan.candidate_count(),
            labels: plan.label_count(),
            skipped: plan.skipped_count(),
        }
    }
}

/// Calculate statistics for splitting `source` without rendering anything
pub fn calculate_statistics(source: &Document, config: &GridConfig) -> Result<SplitStatistics> {
    config.validate()?;
    let plan = plan_split(source, config)?;
    Ok(SplitStatistics::from(&plan))
}
