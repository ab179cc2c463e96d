//! # Working-memory Sync
//!
//! Rewrites three sections of the working-memory document: the cron job
//! table (only when the inventory returned jobs), the last-updated
//! timestamp and the session handoff line. Every run, dry or live, appends
//! a `sync` metrics entry.
//!
//! The handoff line is written together with the timestamp, so
//! `sectionsUpdated` counts them as one update: 2 with a job table, 1
//! without.

use crate::error::Result;
use crate::inventory::SchedulerInventory;
use memory::metrics::category;
use memory::{MemoryEngine, WorkingMemoryDocument};
use mk_core::CronJobSnapshot;
use serde::Serialize;

pub const JOBS_SECTION: &str = "Active Cron Jobs";
pub const LAST_UPDATED_SECTION: &str = "Last Updated";
pub const HANDOFF_SECTION: &str = "Session Handoff";
pub const HANDOFF_TEXT: &str = "_Synced automatically by memory engine._";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionUpdate {
    pub section: String,
    pub content: String
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub updates: Vec<SectionUpdate>,
    /// Inventory as read, `None` when the scheduler was unavailable.
    pub jobs: Option<Vec<CronJobSnapshot>>,
    /// Whether the document was written.
    pub written: bool
}

impl SyncReport {
    pub fn section_names(&self) -> Vec<&str> {
        self.updates.iter().map(|u| u.section.as_str()).collect()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SyncMetrics {
    sections_updated: usize,
    dry_run: bool
}

pub struct StatusSync<'a> {
    engine: &'a MemoryEngine
}

impl<'a> StatusSync<'a> {
    pub fn new(engine: &'a MemoryEngine) -> Self {
        Self { engine }
    }

    /// Query `inventory`, then apply the updates.
    pub async fn run(&self, inventory: &SchedulerInventory, dry_run: bool) -> Result<SyncReport> {
        let jobs = inventory.fetch().await;
        self.apply(jobs, dry_run)
    }

    /// Apply the updates for an inventory that has already been read.
    pub fn apply(&self, jobs: Option<Vec<CronJobSnapshot>>, dry_run: bool) -> Result<SyncReport> {
        let updates = self.plan(jobs.as_deref());
        let path = self.engine.workspace().working_memory();

        let written = if dry_run {
            let names: Vec<&str> = updates.iter().map(|u| u.section.as_str()).collect();
            tracing::info!("Dry run, would update: {}", names.join(", "));
            false
        } else {
            let mut doc = WorkingMemoryDocument::load(path)?;
            for update in &updates {
                doc.set_section(&update.section, &update.content);
            }
            doc.save(path)?;
            tracing::info!("Updated {}", path.display());
            true
        };

        self.engine.recorder().record(
            category::SYNC,
            &SyncMetrics {
                sections_updated: counted_updates(&updates),
                dry_run
            }
        )?;

        Ok(SyncReport {
            updates,
            jobs,
            written
        })
    }

    fn plan(&self, jobs: Option<&[CronJobSnapshot]>) -> Vec<SectionUpdate> {
        let mut updates = Vec::new();
        if let Some(jobs) = jobs.filter(|jobs| !jobs.is_empty()) {
            updates.push(SectionUpdate {
                section: JOBS_SECTION.to_string(),
                content: render_job_table(jobs)
            });
        }
        updates.push(SectionUpdate {
            section: LAST_UPDATED_SECTION.to_string(),
            content: self.engine.clock().display_timestamp()
        });
        updates.push(SectionUpdate {
            section: HANDOFF_SECTION.to_string(),
            content: HANDOFF_TEXT.to_string()
        });
        updates
    }
}

fn counted_updates(updates: &[SectionUpdate]) -> usize {
    updates
        .iter()
        .filter(|u| u.section != HANDOFF_SECTION)
        .count()
}

pub fn job_status(job: &CronJobSnapshot) -> &'static str {
    if !job.enabled {
        "❌ Disabled"
    } else if job.consecutive_errors() > 0 {
        "⚠️ Erroring"
    } else {
        "✅ Active"
    }
}

pub fn render_job_table(jobs: &[CronJobSnapshot]) -> String {
    let mut rows = vec![
        "| Job | Schedule | Status |".to_string(),
        "|-----|----------|--------|".to_string(),
    ];
    for job in jobs {
        let schedule = job
            .schedule
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        rows.push(format!("| {} | {} | {} |", job.name, schedule, job_status(job)));
    }
    rows.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use mk_core::{JobState, Schedule};

    fn snapshot(name: &str, enabled: bool, errors: u32, schedule: Option<Schedule>) -> CronJobSnapshot {
        CronJobSnapshot {
            id: None,
            name: name.to_string(),
            enabled,
            schedule,
            state: Some(JobState {
                consecutive_errors: errors
            })
        }
    }

    #[test]
    fn test_job_status_precedence() {
        assert_eq!(job_status(&snapshot("a", false, 5, None)), "❌ Disabled");
        assert_eq!(job_status(&snapshot("b", true, 1, None)), "⚠️ Erroring");
        assert_eq!(job_status(&snapshot("c", true, 0, None)), "✅ Active");
    }

    #[test]
    fn test_render_job_table() {
        let jobs = vec![
            snapshot(
                "digest",
                true,
                0,
                Some(Schedule::Cron {
                    expr: "0 9 * * *".to_string()
                })
            ),
            snapshot(
                "reminder",
                true,
                0,
                Some(Schedule::At {
                    at: "2026-10-18T09:00".to_string()
                })
            ),
            snapshot("poll", false, 0, Some(Schedule::Every { every_ms: 300_000 })),
            snapshot("legacy", true, 2, None),
        ];
        assert_eq!(
            render_job_table(&jobs),
            "| Job | Schedule | Status |\n\
             |-----|----------|--------|\n\
             | digest | 0 9 * * * | ✅ Active |\n\
             | reminder | Once: 2026-10-18T09:00 | ✅ Active |\n\
             | poll | Every 5m | ❌ Disabled |\n\
             | legacy |  | ⚠️ Erroring |"
        );
    }
}
