//! # Memory Engine Errors
//!
//! Error taxonomy shared by every crate of the memory engine.
//!
//! Failures fall into four classes (see [`ErrorClass`]):
//! - expected absence is never an error, it becomes an issue or an alert
//! - per-item failures are caught, counted and isolated by the caller
//! - an unavailable external dependency degrades to "unknown"
//! - unrecoverable failures terminate the invocation

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// How a failure is expected to be handled by its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorClass {
    /// A missing file or document, downgraded to a finding.
    ExpectedAbsence,
    /// Failure scoped to one note; processing continues.
    PerItem,
    /// External dependency unreachable; signal degrades to unknown.
    Unavailable,
    /// Invocation cannot continue.
    Unrecoverable
}

/// Inventory scan errors
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Failed to list directory {path}: {reason}")]
    ListFailed { path: PathBuf, reason: String },

    #[error("Failed to stat {path}: {reason}")]
    StatFailed { path: PathBuf, reason: String }
}

/// Archival errors for a single note
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Failed to create archive partition {path}: {reason}")]
    PartitionFailed { path: PathBuf, reason: String },

    #[error("Failed to read note {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("Refusing to overwrite existing {path}")]
    TargetExists { path: PathBuf },

    #[error("Failed to write archived copy {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    #[error("Failed to retire original {from} -> {to}: {reason}")]
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        reason: String
    }
}

impl ArchiveError {
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        ErrorClass::PerItem
    }
}

/// Working-memory and note document errors
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to read document {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("Failed to write document {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String }
}

/// Metrics log errors
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Failed to serialize {category} metrics entry: {reason}")]
    SerializationFailed { category: String, reason: String },

    #[error("Failed to append to metrics log {path}: {reason}")]
    AppendFailed { path: PathBuf, reason: String }
}

/// Scheduler inventory errors, reported per provider
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Provider {provider} timed out after {seconds}s")]
    Timeout { provider: String, seconds: u64 },

    #[error("Provider {provider} returned an unreadable inventory: {reason}")]
    InvalidPayload { provider: String, reason: String }
}

impl SchedulerError {
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        ErrorClass::Unavailable
    }
}

/// Workspace layout errors
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Failed to create required directory {path}: {reason}")]
    CreateFailed { path: PathBuf, reason: String }
}

impl LayoutError {
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        ErrorClass::Unrecoverable
    }
}
