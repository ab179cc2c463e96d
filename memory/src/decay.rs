//! # Decay Classifier
//!
//! Moves dated notes older than the retention threshold into
//! `archive/<YYYY-MM>/`.
//!
//! Age is measured in calendar days from the date in the file name, never
//! from the modification time. A note is decayable only when its age is
//! strictly greater than the threshold.
//!
//! Archiving one note is three steps: ensure the partition directory, write
//! the bannered copy, rename the original to `<name>.archived`. The copy is
//! written before the rename, so a crash in between leaves the note in both
//! places and never in neither. An existing archived copy or retired
//! original is never overwritten; that note fails instead. Failures are
//! isolated per note.

use crate::layout::Workspace;
use errors::ArchiveError;
use mk_core::{Clock, Note};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Suffix appended to a retired original so it no longer scans as a note.
pub const ARCHIVED_SUFFIX: &str = ".archived";

/// What happened to a single dated note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecayAction {
    Kept,
    WouldArchive { partition: String },
    Archived { partition: String, archive_path: PathBuf },
    Failed { reason: String }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteOutcome {
    pub name: String,
    pub age_days: i64,
    pub action: DecayAction
}

/// Counts recorded in the `decay` metrics entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecayCounts {
    pub scanned: usize,
    pub archived: usize,
    pub kept: usize,
    pub errors: usize
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecayReport {
    pub counts: DecayCounts,
    pub dry_run: bool,
    pub outcomes: Vec<NoteOutcome>
}

pub struct DecayClassifier {
    workspace: Workspace,
    clock: Arc<dyn Clock>,
    threshold_days: i64
}

impl DecayClassifier {
    pub fn new(workspace: Workspace, clock: Arc<dyn Clock>, threshold_days: i64) -> Self {
        Self {
            workspace,
            clock,
            threshold_days
        }
    }

    pub fn threshold_days(&self) -> i64 {
        self.threshold_days
    }

    #[must_use]
    pub fn is_decayable(&self, age_days: i64) -> bool {
        age_days > self.threshold_days
    }

    /// Classify every dated note and, unless `dry_run`, archive the
    /// decayable ones. Undated notes are ignored entirely.
    pub fn run(&self, notes: &[Note], dry_run: bool) -> DecayReport {
        let today = self.clock.today();
        let mut report = DecayReport {
            dry_run,
            ..DecayReport::default()
        };

        for note in notes {
            let (Some(age_days), Some(partition)) = (note.date_age(today), note.partition())
            else {
                continue;
            };
            report.counts.scanned += 1;
            tracing::debug!("{}: {} days old", note.name, age_days);

            let action = if !self.is_decayable(age_days) {
                report.counts.kept += 1;
                DecayAction::Kept
            } else if dry_run {
                report.counts.archived += 1;
                DecayAction::WouldArchive { partition }
            } else {
                match self.archive(note, &partition) {
                    Ok(archive_path) => {
                        report.counts.archived += 1;
                        tracing::info!("Archived {} into {}", note.name, partition);
                        DecayAction::Archived {
                            partition,
                            archive_path
                        }
                    }
                    Err(e) => {
                        report.counts.errors += 1;
                        tracing::warn!(class = ?e.class(), "Error archiving {}: {}", note.name, e);
                        DecayAction::Failed {
                            reason: e.to_string()
                        }
                    }
                }
            };

            report.outcomes.push(NoteOutcome {
                name: note.name.clone(),
                age_days,
                action
            });
        }

        tracing::info!(
            scanned = report.counts.scanned,
            archived = report.counts.archived,
            kept = report.counts.kept,
            errors = report.counts.errors,
            dry_run,
            "Decay run finished"
        );
        report
    }

    fn archive(&self, note: &Note, partition: &str) -> Result<PathBuf, ArchiveError> {
        let partition_dir = self.workspace.archive_partition(partition);
        std::fs::create_dir_all(&partition_dir).map_err(|e| ArchiveError::PartitionFailed {
            path: partition_dir.clone(),
            reason: e.to_string()
        })?;

        let content = std::fs::read(&note.path).map_err(|e| ArchiveError::ReadFailed {
            path: note.path.clone(),
            reason: e.to_string()
        })?;

        let archive_path = partition_dir.join(&note.name);
        let retired = retired_path(&note.path);
        if retired.exists() {
            return Err(ArchiveError::TargetExists { path: retired });
        }

        let mut archived = archive_banner(&self.clock.display_timestamp(), &note.path).into_bytes();
        archived.extend_from_slice(&content);
        write_new(&archive_path, &archived).map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                ArchiveError::TargetExists {
                    path: archive_path.clone()
                }
            } else {
                ArchiveError::WriteFailed {
                    path: archive_path.clone(),
                    reason: e.to_string()
                }
            }
        })?;

        std::fs::rename(&note.path, &retired).map_err(|e| ArchiveError::RenameFailed {
            from: note.path.clone(),
            to: retired.clone(),
            reason: e.to_string()
        })?;

        Ok(archive_path)
    }
}

/// First line of every archived copy.
pub fn archive_banner(timestamp: &str, original: &Path) -> String {
    format!("<!-- ARCHIVED: {} | Original: {} -->\n", timestamp, original.display())
}

fn write_new(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)?;
    file.write_all(bytes)
}

fn retired_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(ARCHIVED_SUFFIX);
    PathBuf::from(name)
}
