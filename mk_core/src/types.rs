//! Domain types shared by the memory engine crates.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use strum::{Display, EnumString};

/// One dated (or undated) markdown file in the memory directory.
///
/// `date` is only set when the file stem is exactly a `YYYY-MM-DD` calendar
/// date. Undated files count toward aggregate totals and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub name: String,
    pub path: PathBuf,
    pub date: Option<NaiveDate>,
    pub size_bytes: u64,
    pub modified_at: DateTime<Utc>,
    /// Whole calendar days between the modification date and today,
    /// recomputed on every scan.
    pub age_in_days: i64
}

impl Note {
    /// The anchored date rendered as `YYYY-MM-DD`.
    #[must_use]
    pub fn date_string(&self) -> Option<String> {
        self.date.map(|d| d.format("%Y-%m-%d").to_string())
    }

    /// Archive partition (`YYYY-MM`) for dated notes.
    #[must_use]
    pub fn partition(&self) -> Option<String> {
        self.date.map(|d| d.format("%Y-%m").to_string())
    }

    /// Age measured from the anchored date rather than the modification time.
    #[must_use]
    pub fn date_age(&self, today: NaiveDate) -> Option<i64> {
        self.date.map(|d| (today - d).num_days())
    }
}

/// Diagnostic severity used by the state verifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info
}

/// Paging priority used by the alert evaluator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumString,
)]
pub enum AlertLevel {
    P0,
    P1,
    P2
}

/// A state verifier finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub message: String
}

impl Issue {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into()
        }
    }
}

/// An alert evaluator finding with a remediation hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
    pub action: String
}

impl Alert {
    pub fn new(level: AlertLevel, message: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            action: action.into()
        }
    }
}

/// When a scheduler job fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Schedule {
    Cron {
        expr: String
    },
    At {
        at: String
    },
    Every {
        #[serde(rename = "everyMs")]
        every_ms: u64
    },
    #[serde(other)]
    Unknown
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schedule::Cron { expr } => write!(f, "{expr}"),
            Schedule::At { at } => write!(f, "Once: {at}"),
            Schedule::Every { every_ms } => write!(f, "Every {}m", every_ms / 60_000),
            Schedule::Unknown => Ok(())
        }
    }
}

/// Runtime counters reported by the scheduler for a job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobState {
    #[serde(default)]
    pub consecutive_errors: u32
}

/// Read-only view of one scheduler job. Never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CronJobSnapshot {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub schedule: Option<Schedule>,
    #[serde(default)]
    pub state: Option<JobState>
}

fn default_enabled() -> bool {
    true
}

impl CronJobSnapshot {
    #[must_use]
    pub fn consecutive_errors(&self) -> u32 {
        self.state.as_ref().map_or(0, |s| s.consecutive_errors)
    }

    /// Identifier used in remediation hints; falls back to the name.
    #[must_use]
    pub fn identifier(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.name)
    }
}

/// A recurring second-level heading and how often it appeared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternRecord {
    pub heading: String,
    pub count: usize
}

/// Flags accepted by every command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub dry_run: bool,
    pub verbose: bool,
    pub force: bool
}

impl RunOptions {
    #[must_use]
    pub fn dry(self) -> Self {
        Self {
            dry_run: true,
            ..self
        }
    }
}
