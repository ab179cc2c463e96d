use errors::{ArchiveError, DocumentError, ErrorClass, LayoutError, MetricsError, ScanError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Metrics error: {0}")]
    Metrics(#[from] MetricsError),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError)
}

impl MemoryError {
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            MemoryError::Archive(e) => e.class(),
            MemoryError::Layout(e) => e.class(),
            MemoryError::Scan(_) | MemoryError::Document(_) | MemoryError::Metrics(_) => {
                ErrorClass::Unrecoverable
            }
        }
    }

    /// Layout failures end an invocation before any command runs.
    pub fn is_fatal(&self) -> bool {
        matches!(self, MemoryError::Layout(_))
    }
}

pub type Result<T> = std::result::Result<T, MemoryError>;
