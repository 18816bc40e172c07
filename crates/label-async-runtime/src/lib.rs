use std::path::PathBuf;
use thiserror::Error;
use tokio::sync::mpsc;

// Re-export types from the library crate
pub use label_split::{GridConfig, SplitStatistics};

/// Commands sent from UI to worker
#[derive(Debug)]
pub enum GuiCommand {
    /// Open a label sheet PDF for previewing and splitting
    LoadSource {
        path: PathBuf,
    },
    /// Render one source page for the preview panel
    RenderPreview {
        doc_id: DocumentId,
        page_index: usize,
    },
    CalculateStats {
        doc_id: DocumentId,
        config: GridConfig,
    },
    Split {
        input_path: PathBuf,
        output_path: PathBuf,
        config: GridConfig,
    },
    LoadConfig {
        path: PathBuf,
    },
    SaveConfig {
        path: PathBuf,
        config: GridConfig,
    },
    CloseSource {
        doc_id: DocumentId,
    },
}

impl GuiCommand {
    /// Whether `newer`, queued behind this command, makes it obsolete
    pub fn is_superseded_by(&self, newer: &GuiCommand) -> bool {
        match (self, newer) {
            (
                GuiCommand::RenderPreview { doc_id, .. },
                GuiCommand::RenderPreview { doc_id: next, .. },
            )
            | (
                GuiCommand::CalculateStats { doc_id, .. },
                GuiCommand::CalculateStats { doc_id: next, .. },
            ) => doc_id == next,
            _ => false,
        }
    }
}

/// Updates sent from worker to UI
#[derive(Debug, Clone)]
pub enum GuiUpdate {
    Progress {
        operation: String,
        current: usize,
        total: usize,
    },
    SourceLoaded {
        doc_id: DocumentId,
        path: PathBuf,
        page_count: usize,
    },
    PreviewRendered {
        doc_id: DocumentId,
        page_index: usize,
        /// Visible page size in points, the space the grid is laid out in
        page_width_pt: f32,
        page_height_pt: f32,
        width: usize,
        height: usize,
        rgba_data: Vec<u8>,
    },
    StatsCalculated {
        doc_id: DocumentId,
        stats: SplitStatistics,
    },
    SplitComplete {
        path: PathBuf,
        stats: SplitStatistics,
    },
    /// The split was rejected or failed; nothing was written
    SplitFailed {
        message: String,
        /// The input or grid was rejected before any PDF work started
        validation: bool,
    },
    ConfigLoaded {
        config: GridConfig,
    },
    ConfigSaved {
        path: PathBuf,
    },
    SourceClosed {
        doc_id: DocumentId,
    },
    Error {
        message: String,
    },
}

/// Handle to a loaded document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(pub u64);

/// UI side of the worker channels
pub struct WorkerHandle {
    commands: mpsc::UnboundedSender<GuiCommand>,
    updates: mpsc::UnboundedReceiver<GuiUpdate>,
}

/// Worker side of the worker channels
pub struct WorkerChannels {
    pub commands: mpsc::UnboundedReceiver<GuiCommand>,
    pub updates: mpsc::UnboundedSender<GuiUpdate>,
}

#[derive(Error, Debug)]
#[error("Worker is not running")]
pub struct WorkerGone;

impl WorkerHandle {
    pub fn send(&self, command: GuiCommand) -> Result<(), WorkerGone> {
        self.commands.send(command).map_err(|_| WorkerGone)
    }

    /// Next pending update, without waiting
    pub fn try_recv(&mut self) -> Option<GuiUpdate> {
        self.updates.try_recv().ok()
    }
}

/// Create the paired channels between UI and worker
pub fn worker_channels() -> (WorkerHandle, WorkerChannels) {
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (update_tx, update_rx) = mpsc::unbounded_channel();
    (
        WorkerHandle {
            commands: cmd_tx,
            updates: update_rx,
        },
        WorkerChannels {
            commands: cmd_rx,
            updates: update_tx,
        },
    )
}
