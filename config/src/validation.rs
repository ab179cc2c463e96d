//! # Configuration Validation
//!
//! Provides validation for all configuration structures using the `validator` crate.

use crate::config::Config;
use validator::Validate;

/// Validate configuration structure.
///
/// ## Validation Rules
/// ### Workspace
/// - every directory and file name: at least 1 character
///
/// ### Thresholds
/// - `decay.threshold_days`: 1-3650
/// - `staleness.warning_hours` / `critical_hours`: 1-8760, warning below critical
/// - `patterns.window_days`: 0-365, `patterns.min_occurrences` at least 1
///
/// ### Scheduler
/// - `endpoint`: at least 1 character
/// - `timeout_seconds`: 1-60
///
/// ### Clock
/// - `utc_offset_minutes`: -840 to 840
/// - `label`: 1-16 characters
///
/// ### Observability
/// - `logging_level`: must be "trace", "debug", "info", "warn", or "error"
pub fn validate(config: &Config) -> Result<(), validator::ValidationErrors> {
    config.validate()
}
