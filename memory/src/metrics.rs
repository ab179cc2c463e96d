//! # Metrics Recorder
//!
//! Append-only JSON-lines log. Each line is one object:
//! `{"category": ..., "timestamp": <RFC 3339 UTC>, ...fields}`.
//! Existing lines are never rewritten.

use chrono::{DateTime, SecondsFormat, Utc};
use errors::MetricsError;
use mk_core::{Clock, Note};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Categories written by the engine.
pub mod category {
    pub const DECAY: &str = "decay";
    pub const SYNC: &str = "sync";
    pub const COLLECTION: &str = "collection";
}

#[derive(Debug, Serialize)]
struct MetricsEntry<'a, T: Serialize> {
    category: &'a str,
    timestamp: String,
    #[serde(flatten)]
    fields: &'a T
}

pub struct MetricsRecorder {
    path: PathBuf,
    clock: Arc<dyn Clock>
}

impl MetricsRecorder {
    pub fn new(path: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        Self {
            path: path.into(),
            clock
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry. `fields` must serialize to a JSON object.
    pub fn record<T: Serialize>(&self, category: &str, fields: &T) -> Result<(), MetricsError> {
        let entry = MetricsEntry {
            category,
            timestamp: rfc3339(self.clock.now()),
            fields
        };
        let mut line =
            serde_json::to_string(&entry).map_err(|e| MetricsError::SerializationFailed {
                category: category.to_string(),
                reason: e.to_string()
            })?;
        line.push('\n');

        let append_failed = |e: std::io::Error| MetricsError::AppendFailed {
            path: self.path.clone(),
            reason: e.to_string()
        };
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(append_failed)?;
        file.write_all(line.as_bytes()).map_err(append_failed)?;

        tracing::debug!("Recorded {} metrics entry", category);
        Ok(())
    }
}

fn rfc3339(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Snapshot of the memory directory written as the `collection` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionMetrics {
    pub total_files: usize,
    pub dated_notes: usize,
    pub total_size_bytes: u64,
    pub oldest_note: Option<String>,
    pub newest_note: Option<String>
}

impl CollectionMetrics {
    /// Totals count every note file; the date range only dated ones.
    pub fn collect(notes: &[Note]) -> Self {
        let mut dates: Vec<String> = notes.iter().filter_map(Note::date_string).collect();
        dates.sort();
        Self {
            total_files: notes.len(),
            dated_notes: dates.len(),
            total_size_bytes: notes.iter().map(|n| n.size_bytes).sum(),
            oldest_note: dates.first().cloned(),
            newest_note: dates.last().cloned()
        }
    }

    /// Total size in kilobytes, one decimal place.
    #[must_use]
    pub fn total_size_kb(&self) -> String {
        format!("{:.1}", self.total_size_bytes as f64 / 1024.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn note(name: &str, date: Option<NaiveDate>, size: u64) -> Note {
        Note {
            name: name.to_string(),
            path: PathBuf::from(name),
            date,
            size_bytes: size,
            modified_at: Utc::now(),
            age_in_days: 0
        }
    }

    #[test]
    fn test_collect_empty() {
        let metrics = CollectionMetrics::collect(&[]);
        assert_eq!(metrics, CollectionMetrics::default());
        let json = serde_json::to_value(&metrics).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "totalFiles": 0,
                "datedNotes": 0,
                "totalSizeBytes": 0,
                "oldestNote": null,
                "newestNote": null
            })
        );
    }

    #[test]
    fn test_collect_counts_undated_in_totals_only() {
        let notes = vec![
            note("2026-10-02.md", NaiveDate::from_ymd_opt(2026, 10, 2), 1000),
            note("ideas.md", None, 500),
            note("2026-09-28.md", NaiveDate::from_ymd_opt(2026, 9, 28), 548),
        ];
        let metrics = CollectionMetrics::collect(&notes);
        assert_eq!(metrics.total_files, 3);
        assert_eq!(metrics.dated_notes, 2);
        assert_eq!(metrics.total_size_bytes, 2048);
        assert_eq!(metrics.total_size_kb(), "2.0");
        assert_eq!(metrics.oldest_note.as_deref(), Some("2026-09-28"));
        assert_eq!(metrics.newest_note.as_deref(), Some("2026-10-02"));
    }

    #[test]
    fn test_rfc3339_millis_utc() {
        let at = Utc.with_ymd_and_hms(2026, 10, 17, 9, 5, 0).unwrap();
        assert_eq!(rfc3339(at), "2026-10-17T09:05:00.000Z");
    }
}
