//! # Alert Evaluator
//!
//! Pages on a narrower, stricter subset of the state signals. Each alert
//! carries the command that remediates it. Job errors use their own
//! threshold, higher than the state verifier's, so a job with a single
//! failure shows up in `state` but never pages.

use crate::layout::Workspace;
use crate::staleness::Staleness;
use config::{JobThresholds, StalenessConfig};
use mk_core::{Alert, AlertLevel, Clock, CronJobSnapshot};
use std::sync::Arc;

/// Binary name used in remediation hints.
pub const BINARY_NAME: &str = "memory-engine";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertReport {
    pub alerts: Vec<Alert>
}

impl AlertReport {
    pub fn level(&self, level: AlertLevel) -> impl Iterator<Item = &Alert> {
        self.alerts.iter().filter(move |a| a.level == level)
    }

    #[must_use]
    pub fn has_p0(&self) -> bool {
        self.level(AlertLevel::P0).next().is_some()
    }

    #[must_use]
    pub fn has_p1(&self) -> bool {
        self.level(AlertLevel::P1).next().is_some()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    /// `2` with any P0, `1` with any P1, else `0`. P2 never fails a run.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        if self.has_p0() {
            2
        } else if self.has_p1() {
            1
        } else {
            0
        }
    }
}

pub struct AlertEvaluator {
    workspace: Workspace,
    clock: Arc<dyn Clock>,
    staleness: StalenessConfig,
    jobs: JobThresholds
}

impl AlertEvaluator {
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

    /// An unavailable inventory raises nothing here; the state verifier
    /// reports it.
    pub fn evaluate(&self, jobs: Option<&[CronJobSnapshot]>) -> AlertReport {
        let mut alerts = Vec::new();
        let name = self.workspace.working_memory_name();

        match Staleness::of_file(self.workspace.working_memory(), self.clock.now(), &self.staleness)
        {
            Staleness::Missing => alerts.push(Alert::new(
                AlertLevel::P0,
                format!("{name} is MISSING"),
                "Recreate working memory immediately"
            )),
            Staleness::Critical(hours) => alerts.push(Alert::new(
                AlertLevel::P0,
                format!("{name} is {hours} hours stale - CRITICAL"),
                format!("Run: {BINARY_NAME} refresh")
            )),
            Staleness::Warning(hours) => alerts.push(Alert::new(
                AlertLevel::P1,
                format!("{name} is {hours} hours since update"),
                format!("Run: {BINARY_NAME} sync")
            )),
            Staleness::Fresh(_) => {}
        }

        let today = self.clock.today();
        if !self.workspace.note_path(today).is_file() {
            alerts.push(Alert::new(
                AlertLevel::P2,
                format!("No daily note for {today}"),
                format!("Run: {BINARY_NAME} stub")
            ));
        }

        for job in jobs.unwrap_or_default().iter().filter(|j| {
            j.consecutive_errors() > self.jobs.alert_error_threshold
        }) {
            alerts.push(Alert::new(
                AlertLevel::P1,
                format!(
                    "Cron \"{}\" failing ({} errors)",
                    job.name,
                    job.consecutive_errors()
                ),
                format!("Review job {}", job.identifier())
            ));
        }

        let report = AlertReport { alerts };
        tracing::info!(
            alerts = report.alerts.len(),
            exit_code = report.exit_code(),
            "Alert evaluation finished"
        );
        report
    }
}
