//! # State Verifier
//!
//! Runs the full diagnostic checklist against the workspace and the
//! scheduler inventory. Every check runs on every invocation; findings land
//! in three severity buckets.

use crate::layout::Workspace;
use crate::staleness::Staleness;
use config::{JobThresholds, StalenessConfig};
use mk_core::{Clock, CronJobSnapshot, Issue, Severity};
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateReport {
    pub issues: Vec<Issue>,
    /// Human-readable lines for checks that passed.
    pub passed: Vec<String>,
    /// Enabled jobs in the inventory, `None` when it was unavailable.
    pub active_jobs: Option<usize>
}

impl StateReport {
    pub fn bucket(&self, severity: Severity) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |i| i.severity == severity)
    }

    #[must_use]
    pub fn has_critical(&self) -> bool {
        self.bucket(Severity::Critical).next().is_some()
    }

    #[must_use]
    pub fn has_warning(&self) -> bool {
        self.bucket(Severity::Warning).next().is_some()
    }

    /// `2` with any critical issue, `1` with any warning, else `0`.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        if self.has_critical() {
            2
        } else if self.has_warning() {
            1
        } else {
            0
        }
    }
}

pub struct StateVerifier {
    workspace: Workspace,
    clock: Arc<dyn Clock>,
    staleness: StalenessConfig,
    jobs: JobThresholds
}

impl StateVerifier {
    pub fn new(
        workspace: Workspace,
        clock: Arc<dyn Clock>,
        staleness: StalenessConfig,
        jobs: JobThresholds
    ) -> Self {
        Self {
            workspace,
            clock,
            staleness,
            jobs
        }
    }

    pub fn verify(&self, jobs: Option<&[CronJobSnapshot]>) -> StateReport {
        let mut report = StateReport::default();
        self.check_working_memory(&mut report);
        self.check_jobs(jobs, &mut report);
        self.check_directories(&mut report);
        self.check_daily_note(&mut report);
        self.check_summary(&mut report);

        tracing::info!(
            issues = report.issues.len(),
            exit_code = report.exit_code(),
            "State verification finished"
        );
        report
    }

    fn check_working_memory(&self, report: &mut StateReport) {
        let name = self.workspace.working_memory_name();
        match Staleness::of_file(self.workspace.working_memory(), self.clock.now(), &self.staleness)
        {
            Staleness::Missing => report.issues.push(Issue::new(
                Severity::Critical,
                format!("{name} MISSING - working memory unavailable")
            )),
            Staleness::Critical(hours) => report.issues.push(Issue::new(
                Severity::Critical,
                format!("{name} STALE: {hours} hours old (P0 violation)")
            )),
            Staleness::Warning(hours) => report.issues.push(Issue::new(
                Severity::Warning,
                format!("{name} needs refresh: {hours} hours since update")
            )),
            Staleness::Fresh(hours) => report
                .passed
                .push(format!("{name} updated {hours} hours ago"))
        }
    }

    fn check_jobs(&self, jobs: Option<&[CronJobSnapshot]>, report: &mut StateReport) {
        let Some(jobs) = jobs else {
            report.issues.push(Issue::new(
                Severity::Warning,
                "Could not verify cron jobs (API unavailable)"
            ));
            return;
        };

        let active = jobs.iter().filter(|j| j.enabled).count();
        report.active_jobs = Some(active);
        report.passed.push(format!("{active} active cron jobs"));

        for job in jobs
            .iter()
            .filter(|j| j.consecutive_errors() > self.jobs.state_error_threshold)
        {
            report.issues.push(Issue::new(
                Severity::Warning,
                format!(
                    "Cron \"{}\" has {} consecutive errors",
                    job.name,
                    job.consecutive_errors()
                )
            ));
        }
    }

    fn check_directories(&self, report: &mut StateReport) {
        for (label, path) in self.workspace.required_dirs() {
            if path.is_dir() {
                report.passed.push(format!("{label} exists"));
            } else {
                report.issues.push(Issue::new(
                    Severity::Warning,
                    format!("{label} directory missing")
                ));
            }
        }
    }

    fn check_daily_note(&self, report: &mut StateReport) {
        let today = self.clock.today();
        if self.workspace.note_path(today).is_file() {
            report
                .passed
                .push(format!("Today's daily note exists ({today})"));
        } else {
            report.issues.push(Issue::new(
                Severity::Info,
                format!("No daily note for {today} - run 'stub' to create")
            ));
        }
    }

    fn check_summary(&self, report: &mut StateReport) {
        let name = self.workspace.summary_name();
        if self.workspace.summary().is_file() {
            report.passed.push(format!("{name} exists"));
        } else {
            report.issues.push(Issue::new(
                Severity::Warning,
                format!("{name} missing from workspace")
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(severities: &[Severity]) -> StateReport {
        StateReport {
            issues: severities.iter().map(|s| Issue::new(*s, "x")).collect(),
            ..StateReport::default()
        }
    }

    #[test]
    fn test_exit_code_reflects_worst_bucket() {
        assert_eq!(report(&[]).exit_code(), 0);
        assert_eq!(report(&[Severity::Info]).exit_code(), 0);
        assert_eq!(report(&[Severity::Info, Severity::Warning]).exit_code(), 1);
        assert_eq!(report(&[Severity::Warning, Severity::Critical]).exit_code(), 2);
    }

    #[test]
    fn test_bucket_filters_by_severity() {
        let r = report(&[Severity::Warning, Severity::Info, Severity::Warning]);
        assert_eq!(r.bucket(Severity::Warning).count(), 2);
        assert!(r.has_warning());
        assert!(!r.has_critical());
    }
}
