//! Daily-note stub: creates today's note from the fixed template.

use crate::layout::Workspace;
use chrono::NaiveDate;
use errors::DocumentError;
use mk_core::Clock;
use std::path::PathBuf;
use std::sync::Arc;

const SECTIONS: [&str; 5] = [
    "Sessions",
    "Key Events",
    "Decisions Made",
    "Follow-ups",
    "Lessons Learned",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubOutcome {
    /// True only when a file was actually written.
    pub created: bool,
    /// The note already existed and was left alone.
    pub existed: bool,
    pub path: PathBuf,
    pub date: NaiveDate
}

pub struct DailyNoteStub {
    workspace: Workspace,
    clock: Arc<dyn Clock>
}

impl DailyNoteStub {
    pub fn new(workspace: Workspace, clock: Arc<dyn Clock>) -> Self {
        Self { workspace, clock }
    }

    /// Write today's note unless it exists. `force` overwrites; `dry_run`
    /// writes nothing.
    pub fn create(&self, force: bool, dry_run: bool) -> Result<StubOutcome, DocumentError> {
        let date = self.clock.today();
        let path = self.workspace.note_path(date);
        let existed = path.exists();

        if existed && !force {
            tracing::debug!("Daily note {} already present", path.display());
            return Ok(StubOutcome {
                created: false,
                existed,
                path,
                date
            });
        }

        if !dry_run {
            let body = render_template(date, &self.clock.display_timestamp());
            std::fs::write(&path, body).map_err(|e| DocumentError::WriteFailed {
                path: path.clone(),
                reason: e.to_string()
            })?;
            tracing::info!("Created daily note {}", path.display());
        }

        Ok(StubOutcome {
            created: !dry_run,
            existed,
            path,
            date
        })
    }
}

pub fn render_template(date: NaiveDate, timestamp: &str) -> String {
    let mut out = format!(
        "# {date} Daily Memory\n\n## {weekday}\n\n_Daily note auto-generated by memory engine at {timestamp}_\n\n---\n\n",
        date = date.format("%Y-%m-%d"),
        weekday = date.format("%A")
    );
    for section in SECTIONS {
        out.push_str("## ");
        out.push_str(section);
        out.push_str("\n\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_layout() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let body = render_template(date, "10/17/2026 08:00:00 EST");
        assert!(body.starts_with("# 2026-10-17 Daily Memory\n\n## Saturday\n\n"));
        assert!(body.contains("_Daily note auto-generated by memory engine at 10/17/2026 08:00:00 EST_"));
        assert!(body.contains("---\n\n## Sessions\n\n## Key Events\n\n## Decisions Made\n\n"));
        assert!(body.ends_with("## Lessons Learned\n\n"));
    }
}
