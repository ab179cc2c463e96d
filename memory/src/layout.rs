//! # Workspace Layout
//!
//! Resolves every path the engine touches from [`WorkspaceConfig`]:
//!
//! ```text
//! <root>/
//! ├── MEMORY.md                      summary document
//! └── memory/
//!     ├── YYYY-MM-DD.md              dated notes
//!     ├── active-context.md          working-memory document
//!     ├── archive/YYYY-MM/           decayed notes
//!     ├── runbooks/
//!     └── architecture/metrics-log.jsonl
//! ```

use chrono::NaiveDate;
use config::WorkspaceConfig;
use errors::LayoutError;
use std::path::{Path, PathBuf};

/// Absolute paths for one workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    root: PathBuf,
    memory_dir: PathBuf,
    archive_dir: PathBuf,
    runbooks_dir: PathBuf,
    metrics_dir: PathBuf,
    metrics_log: PathBuf,
    working_memory: PathBuf,
    summary: PathBuf,
    note_extension: String
}

impl Workspace {
    pub fn from_config(config: &WorkspaceConfig) -> Self {
        let memory_dir = config.root.join(&config.memory_dir);
        let metrics_dir = memory_dir.join(&config.metrics_dir);
        Self {
            root: config.root.clone(),
            archive_dir: memory_dir.join(&config.archive_dir),
            runbooks_dir: memory_dir.join(&config.runbooks_dir),
            metrics_log: metrics_dir.join(&config.metrics_file),
            working_memory: memory_dir.join(&config.working_memory_file),
            summary: config.root.join(&config.summary_file),
            note_extension: config.note_extension.trim_start_matches('.').to_string(),
            metrics_dir,
            memory_dir
        }
    }

    /// Create the directories every write path depends on.
    ///
    /// Idempotent. A failure here is the one error class that ends the
    /// invocation.
    pub fn ensure_layout(&self) -> Result<(), LayoutError> {
        for dir in [&self.archive_dir, &self.metrics_dir] {
            std::fs::create_dir_all(dir).map_err(|e| LayoutError::CreateFailed {
                path: dir.clone(),
                reason: e.to_string()
            })?;
        }
        tracing::debug!("Workspace layout ready under {}", self.memory_dir.display());
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn memory_dir(&self) -> &Path {
        &self.memory_dir
    }

    pub fn archive_dir(&self) -> &Path {
        &self.archive_dir
    }

    pub fn runbooks_dir(&self) -> &Path {
        &self.runbooks_dir
    }

    pub fn metrics_dir(&self) -> &Path {
        &self.metrics_dir
    }

    pub fn metrics_log(&self) -> &Path {
        &self.metrics_log
    }

    pub fn working_memory(&self) -> &Path {
        &self.working_memory
    }

    pub fn summary(&self) -> &Path {
        &self.summary
    }

    pub fn note_extension(&self) -> &str {
        &self.note_extension
    }

    /// Path of the note for `date`, whether or not it exists.
    pub fn note_path(&self, date: NaiveDate) -> PathBuf {
        self.memory_dir
            .join(format!("{}.{}", date.format("%Y-%m-%d"), self.note_extension))
    }

    pub fn archive_partition(&self, partition: &str) -> PathBuf {
        self.archive_dir.join(partition)
    }

    /// Directories the state verifier expects, with their display labels
    /// relative to the workspace root.
    pub fn required_dirs(&self) -> Vec<(String, PathBuf)> {
        [&self.archive_dir, &self.runbooks_dir]
            .into_iter()
            .map(|dir| (self.display_relative(dir), dir.clone()))
            .collect()
    }

    /// File name of the working-memory document as shown in messages.
    pub fn working_memory_name(&self) -> String {
        file_label(&self.working_memory)
    }

    pub fn summary_name(&self) -> String {
        file_label(&self.summary)
    }

    fn display_relative(&self, dir: &Path) -> String {
        let relative = dir.strip_prefix(&self.root).unwrap_or(dir);
        format!("{}/", relative.display())
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
