//! # Memory Engine Core
//!
//! Shared types and traits for the memory engine.
//!
//! This crate provides:
//! - The note inventory model ([`Note`]) and date helpers
//! - Finding types for both evaluators ([`Issue`], [`Alert`])
//! - The read-only scheduler view ([`CronJobSnapshot`], [`Schedule`])
//! - Seams for time and scheduler access ([`Clock`], [`InventoryProvider`])

pub mod traits;
pub mod types;

pub use traits::{Clock, InventoryProvider};
pub use types::{
    Alert, AlertLevel, CronJobSnapshot, Issue, JobState, Note, PatternRecord, RunOptions,
    Schedule, Severity
};
