//! # Inventory Scanner
//!
//! Lists note files in a single directory (no recursion) with their size,
//! modification time and, when the stem is exactly `YYYY-MM-DD`, the
//! anchored calendar date.

use chrono::{DateTime, NaiveDate, Utc};
use errors::ScanError;
use mk_core::{Clock, Note};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

static DATE_STEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date stem pattern is valid")
});

pub struct InventoryScanner {
    dir: PathBuf,
    extension: String,
    clock: Arc<dyn Clock>
}

impl InventoryScanner {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
            clock
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Scan the directory, sorted by file name.
    ///
    /// A missing directory is an empty inventory. Entries that cannot be
    /// stat'ed are logged and skipped.
    pub fn scan(&self) -> Result<Vec<Note>, ScanError> {
        if !self.dir.is_dir() {
            tracing::debug!("Memory directory {} absent", self.dir.display());
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(&self.dir).map_err(|e| ScanError::ListFailed {
            path: self.dir.clone(),
            reason: e.to_string()
        })?;

        let today = self.clock.today();
        let offset = self.clock.offset();
        let suffix = format!(".{}", self.extension);
        let mut notes = Vec::new();

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry in {}: {}", self.dir.display(), e);
                    continue;
                }
            };
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.ends_with(&suffix) {
                continue;
            }

            let path = entry.path();
            let metadata = match std::fs::metadata(&path) {
                Ok(metadata) => metadata,
                Err(e) => {
                    let err = ScanError::StatFailed {
                        path: path.clone(),
                        reason: e.to_string()
                    };
                    tracing::warn!("{}", err);
                    continue;
                }
            };
            if !metadata.is_file() {
                continue;
            }

            let modified_at: DateTime<Utc> = match metadata.modified() {
                Ok(time) => time.into(),
                Err(e) => {
                    tracing::warn!("No modification time for {}: {}", path.display(), e);
                    continue;
                }
            };
            let modified_day = modified_at.with_timezone(&offset).date_naive();

            notes.push(Note {
                date: parse_note_date(&name[..name.len() - suffix.len()]),
                name,
                path,
                size_bytes: metadata.len(),
                modified_at,
                age_in_days: (today - modified_day).num_days()
            });
        }

        notes.sort_by(|a, b| a.name.cmp(&b.name));
        tracing::debug!("Scanned {} notes in {}", notes.len(), self.dir.display());
        Ok(notes)
    }
}

/// Strict `YYYY-MM-DD` stem match that must also be a real calendar date.
pub fn parse_note_date(stem: &str) -> Option<NaiveDate> {
    if !DATE_STEM.is_match(stem) {
        return None;
    }
    NaiveDate::parse_from_str(stem, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_note_date_strict() {
        assert_eq!(
            parse_note_date("2026-10-17"),
            NaiveDate::from_ymd_opt(2026, 10, 17)
        );
        assert_eq!(parse_note_date("2026-10-17-notes"), None);
        assert_eq!(parse_note_date("x2026-10-17"), None);
        assert_eq!(parse_note_date("2026-1-17"), None);
        assert_eq!(parse_note_date("2026-13-45"), None);
        assert_eq!(parse_note_date("active-context"), None);
    }
}
