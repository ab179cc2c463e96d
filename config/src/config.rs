//! # Configuration Structures
//!
//! All configuration structures for the memory engine.
//!
//! All configuration structures:
//! - Use `serde` for serialization/deserialization, every field defaulted
//! - Use `validator` for range and consistency checks
//! - Are passed explicitly into component constructors

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::{Validate, ValidationError};

/// Main configuration structure for the memory engine.
///
/// ## Fields
/// - `workspace`: Workspace root and the names of every directory/file the
///   engine touches
/// - `decay`: Archival threshold for dated notes
/// - `staleness`: Working-memory staleness thresholds
/// - `jobs`: Scheduler error thresholds, one per evaluator
/// - `patterns`: Pattern aggregation window and qualification count
/// - `scheduler`: Inventory endpoint, fallback command and timeout
/// - `clock`: Fixed timezone used to date notes
/// - `observability`: Log level
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    #[validate(nested)]
    pub workspace: WorkspaceConfig,

    #[serde(default)]
    #[validate(nested)]
    pub decay: DecayConfig,

    #[serde(default)]
    #[validate(nested)]
    pub staleness: StalenessConfig,

    #[serde(default)]
    pub jobs: JobThresholds,

    #[serde(default)]
    #[validate(nested)]
    pub patterns: PatternConfig,

    #[serde(default)]
    #[validate(nested)]
    pub scheduler: SchedulerConfig,

    #[serde(default)]
    #[validate(nested)]
    pub clock: ClockConfig,

    #[serde(default)]
    #[validate(nested)]
    pub observability: ObservabilityConfig
}

/// Workspace layout.
///
/// ```text
/// <root>/
/// ├── MEMORY.md                    summary_file
/// └── memory/                      memory_dir
///     ├── active-context.md        working_memory_file
///     ├── 2026-10-17.md            dated notes
///     ├── archive/2026-09/         archive_dir partitions
///     ├── runbooks/                runbooks_dir
///     └── architecture/            metrics_dir
///         └── metrics-log.jsonl    metrics_file
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct WorkspaceConfig {
    #[serde(default = "default_workspace_root")]
    pub root: PathBuf,

    #[serde(default = "default_memory_dir")]
    #[validate(length(min = 1))]
    pub memory_dir: String,

    #[serde(default = "default_archive_dir")]
    #[validate(length(min = 1))]
    pub archive_dir: String,

    #[serde(default = "default_runbooks_dir")]
    #[validate(length(min = 1))]
    pub runbooks_dir: String,

    #[serde(default = "default_metrics_dir")]
    #[validate(length(min = 1))]
    pub metrics_dir: String,

    #[serde(default = "default_metrics_file")]
    #[validate(length(min = 1))]
    pub metrics_file: String,

    #[serde(default = "default_working_memory_file")]
    #[validate(length(min = 1))]
    pub working_memory_file: String,

    #[serde(default = "default_summary_file")]
    #[validate(length(min = 1))]
    pub summary_file: String,

    /// Extension (without the dot) that marks a file as an active note.
    #[serde(default = "default_note_extension")]
    #[validate(length(min = 1))]
    pub note_extension: String
}

/// Falls back to `./.openclaw/workspace` when no home directory is known.
pub fn default_workspace_root() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".openclaw")
        .join("workspace")
}

fn default_memory_dir() -> String {
    "memory".to_string()
}

fn default_archive_dir() -> String {
    "archive".to_string()
}

fn default_runbooks_dir() -> String {
    "runbooks".to_string()
}

fn default_metrics_dir() -> String {
    "architecture".to_string()
}

fn default_metrics_file() -> String {
    "metrics-log.jsonl".to_string()
}

fn default_working_memory_file() -> String {
    "active-context.md".to_string()
}

fn default_summary_file() -> String {
    "MEMORY.md".to_string()
}

fn default_note_extension() -> String {
    "md".to_string()
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: default_workspace_root(),
            memory_dir: default_memory_dir(),
            archive_dir: default_archive_dir(),
            runbooks_dir: default_runbooks_dir(),
            metrics_dir: default_metrics_dir(),
            metrics_file: default_metrics_file(),
            working_memory_file: default_working_memory_file(),
            summary_file: default_summary_file(),
            note_extension: default_note_extension()
        }
    }
}

impl WorkspaceConfig {
    /// Workspace rooted at `root` with default names.
    #[must_use]
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }
}

/// Decay configuration.
///
/// A note is decayable when its date age is strictly greater than
/// `threshold_days`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct DecayConfig {
    #[serde(default = "default_decay_threshold_days")]
    #[validate(range(min = 1, max = 3650))]
    pub threshold_days: i64
}

fn default_decay_threshold_days() -> i64 {
    30
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            threshold_days: default_decay_threshold_days()
        }
    }
}

/// Working-memory staleness thresholds, in hours since last write.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[validate(schema(function = "validate_staleness_order"))]
pub struct StalenessConfig {
    #[serde(default = "default_warning_hours")]
    #[validate(range(min = 1, max = 8760))]
    pub warning_hours: u32,

    #[serde(default = "default_critical_hours")]
    #[validate(range(min = 1, max = 8760))]
    pub critical_hours: u32
}

fn default_warning_hours() -> u32 {
    24
}

fn default_critical_hours() -> u32 {
    48
}

impl Default for StalenessConfig {
    fn default() -> Self {
        Self {
            warning_hours: default_warning_hours(),
            critical_hours: default_critical_hours()
        }
    }
}

fn validate_staleness_order(config: &StalenessConfig) -> Result<(), ValidationError> {
    if config.warning_hours >= config.critical_hours {
        return Err(ValidationError::new("warning_hours_must_be_below_critical_hours"));
    }
    Ok(())
}

/// Scheduler job error thresholds.
///
/// The two evaluators read the same counter with different bars: the state
/// verifier reports any job above `state_error_threshold`, the alert
/// evaluator only pages above `alert_error_threshold`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobThresholds {
    #[serde(default)]
    pub state_error_threshold: u32,

    #[serde(default = "default_alert_error_threshold")]
    pub alert_error_threshold: u32
}

fn default_alert_error_threshold() -> u32 {
    2
}

impl Default for JobThresholds {
    fn default() -> Self {
        Self {
            state_error_threshold: 0,
            alert_error_threshold: default_alert_error_threshold()
        }
    }
}

/// Pattern aggregation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct PatternConfig {
    #[serde(default = "default_window_days")]
    #[validate(range(min = 0, max = 365))]
    pub window_days: i64,

    #[serde(default = "default_min_occurrences")]
    #[validate(range(min = 1))]
    pub min_occurrences: usize
}

fn default_window_days() -> i64 {
    7
}

fn default_min_occurrences() -> usize {
    3
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
            min_occurrences: default_min_occurrences()
        }
    }
}

/// Scheduler inventory configuration.
///
/// ## Fields
/// - `enabled`: Query the scheduler at all (default: true)
/// - `endpoint`: HTTP endpoint returning `{jobs: [...]}`
/// - `timeout_seconds`: Ceiling per provider attempt (default: 5, range: 1-60)
/// - `fallback_command` / `fallback_args`: Command printing the same JSON
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct SchedulerConfig {
    #[serde(default = "default_scheduler_enabled")]
    pub enabled: bool,

    #[serde(default = "default_scheduler_endpoint")]
    #[validate(length(min = 1))]
    pub endpoint: String,

    #[serde(default = "default_scheduler_timeout_seconds")]
    #[validate(range(min = 1, max = 60))]
    pub timeout_seconds: u64,

    #[serde(default = "default_fallback_command")]
    pub fallback_command: String,

    #[serde(default = "default_fallback_args")]
    pub fallback_args: Vec<String>
}

fn default_scheduler_enabled() -> bool {
    true
}

fn default_scheduler_endpoint() -> String {
    "http://localhost/api/cron/list".to_string()
}

fn default_scheduler_timeout_seconds() -> u64 {
    5
}

fn default_fallback_command() -> String {
    "openclaw".to_string()
}

fn default_fallback_args() -> Vec<String> {
    vec!["cron".to_string(), "list".to_string(), "--json".to_string()]
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: default_scheduler_enabled(),
            endpoint: default_scheduler_endpoint(),
            timeout_seconds: default_scheduler_timeout_seconds(),
            fallback_command: default_fallback_command(),
            fallback_args: default_fallback_args()
        }
    }
}

/// Fixed timezone the notes are dated in.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct ClockConfig {
    #[serde(default = "default_utc_offset_minutes")]
    #[validate(range(min = -840, max = 840))]
    pub utc_offset_minutes: i32,

    #[serde(default = "default_clock_label")]
    #[validate(length(min = 1, max = 16))]
    pub label: String
}

fn default_utc_offset_minutes() -> i32 {
    -300
}

fn default_clock_label() -> String {
    "EST".to_string()
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: default_utc_offset_minutes(),
            label: default_clock_label()
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct ObservabilityConfig {
    #[serde(default = "default_logging_level")]
    #[validate(custom(function = "validate_logging_level"))]
    pub logging_level: String
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            logging_level: default_logging_level()
        }
    }
}

fn validate_logging_level(level: &str) -> Result<(), ValidationError> {
    match level {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ValidationError::new("invalid_logging_level"))
    }
}
