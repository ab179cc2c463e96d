use errors::{DocumentError, MetricsError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Working-memory document error: {0}")]
    Document(#[from] DocumentError),
    #[error("Metrics error: {0}")]
    Metrics(#[from] MetricsError),
    #[error("Memory engine error: {0}")]
    Memory(#[from] memory::MemoryError),
    #[error("Failed to build scheduler client: {reason}")]
    Client { reason: String }
}

pub type Result<T> = std::result::Result<T, SyncError>;
