use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LabelSplitError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Invalid value for {field}: {reason}")]
    InvalidField { field: String, reason: String },
    #[error("Not a file: {}", .0.display())]
    NotAFile(PathBuf),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("Page {0} does not exist")]
    PageOutOfRange(usize),
}

impl LabelSplitError {
    /// Whether the error comes from user input rather than from reading or
    /// writing a document.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LabelSplitError::InvalidField { .. }
                | LabelSplitError::NotAFile(_)
                | LabelSplitError::Config(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, LabelSplitError>;
