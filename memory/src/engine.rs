//! # Memory Engine
//!
//! Wires the components to one workspace, one configuration and one clock.
//! Commands go through this facade so the scan, the operation and its
//! metrics entry always agree on paths and time.

use crate::alert::{AlertEvaluator, AlertReport};
use crate::decay::{DecayClassifier, DecayReport};
use crate::error::Result;
use crate::layout::Workspace;
use crate::metrics::{CollectionMetrics, MetricsRecorder, category};
use crate::patterns::{PatternAggregator, PatternReport};
use crate::scanner::InventoryScanner;
use crate::state::{StateReport, StateVerifier};
use crate::stub::{DailyNoteStub, StubOutcome};
use config::Config;
use mk_core::{Clock, CronJobSnapshot, Note, RunOptions};
use std::sync::Arc;

pub struct MemoryEngine {
    config: Config,
    workspace: Workspace,
    clock: Arc<dyn Clock>
}

impl MemoryEngine {
    pub fn new(config: Config, clock: Arc<dyn Clock>) -> Self {
        let workspace = Workspace::from_config(&config.workspace);
        Self {
            config,
            workspace,
            clock
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    pub fn ensure_layout(&self) -> Result<()> {
        Ok(self.workspace.ensure_layout()?)
    }

    pub fn scanner(&self) -> InventoryScanner {
        InventoryScanner::new(
            self.workspace.memory_dir(),
            self.workspace.note_extension(),
            self.clock()
        )
    }

    pub fn recorder(&self) -> MetricsRecorder {
        MetricsRecorder::new(self.workspace.metrics_log(), self.clock())
    }

    pub fn scan(&self) -> Result<Vec<Note>> {
        Ok(self.scanner().scan()?)
    }

    /// Scan and decay. Live runs append a `decay` metrics entry.
    pub fn decay(&self, options: RunOptions) -> Result<DecayReport> {
        let notes = self.scan()?;
        let classifier = DecayClassifier::new(
            self.workspace.clone(),
            self.clock(),
            self.config.decay.threshold_days
        );
        let report = classifier.run(&notes, options.dry_run);
        if !options.dry_run {
            self.recorder().record(category::DECAY, &report.counts)?;
        }
        Ok(report)
    }

    pub fn state(&self, jobs: Option<&[CronJobSnapshot]>) -> StateReport {
        StateVerifier::new(
            self.workspace.clone(),
            self.clock(),
            self.config.staleness.clone(),
            self.config.jobs.clone()
        )
        .verify(jobs)
    }

    pub fn alert(&self, jobs: Option<&[CronJobSnapshot]>) -> AlertReport {
        AlertEvaluator::new(
            self.workspace.clone(),
            self.clock(),
            self.config.staleness.clone(),
            self.config.jobs.clone()
        )
        .evaluate(jobs)
    }

    pub fn patterns(&self) -> Result<PatternReport> {
        let notes = self.scan()?;
        let aggregator = PatternAggregator::new(
            self.clock(),
            self.config.patterns.window_days,
            self.config.patterns.min_occurrences
        );
        Ok(aggregator.aggregate(&notes))
    }

    /// Scan, summarize and append a `collection` metrics entry.
    pub fn collect_metrics(&self) -> Result<CollectionMetrics> {
        let metrics = CollectionMetrics::collect(&self.scan()?);
        self.recorder().record(category::COLLECTION, &metrics)?;
        tracing::info!(
            total_files = metrics.total_files,
            dated_notes = metrics.dated_notes,
            "Metrics collected"
        );
        Ok(metrics)
    }

    pub fn stub(&self, options: RunOptions) -> Result<StubOutcome> {
        let stub = DailyNoteStub::new(self.workspace.clone(), self.clock());
        Ok(stub.create(options.force, options.dry_run)?)
    }
}
