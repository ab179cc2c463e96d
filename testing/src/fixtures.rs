use async_trait::async_trait;
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Utc};
use config::{Config, WorkspaceConfig};
use errors::SchedulerError;
use mk_core::{Clock, CronJobSnapshot, InventoryProvider, JobState, Schedule};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::SystemTime;

/// Clock frozen at one instant.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: DateTime<Utc>,
    offset: FixedOffset,
    label: String
}

impl FixedClock {
    /// Pinned to `now`, reporting dates in UTC-5 labelled `EST`.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now,
            offset: FixedOffset::west_opt(5 * 3600).unwrap(),
            label: "EST".to_string()
        }
    }

    /// 2026-10-17 15:00 UTC, which is 10:00 on 2026-10-17 in UTC-5.
    pub fn pinned() -> Self {
        Self::at(Utc.with_ymd_and_hms(2026, 10, 17, 15, 0, 0).unwrap())
    }

    /// Pinned to the moment of the call, for tests that mix the engine with
    /// files written by the real filesystem clock.
    pub fn current() -> Self {
        Self::at(Utc::now())
    }

    pub fn with_offset(mut self, offset: FixedOffset, label: &str) -> Self {
        self.offset = offset;
        self.label = label.to_string();
        self
    }

    pub fn shared(self) -> Arc<dyn Clock> {
        Arc::new(self)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }

    fn label(&self) -> &str {
        &self.label
    }
}

/// A temporary workspace with the default directory names.
///
/// The scheduler is disabled in the fixture configuration so nothing
/// reaches the network.
pub struct WorkspaceFixture {
    dir: tempfile::TempDir,
    config: Config,
    clock: FixedClock
}

impl WorkspaceFixture {
    pub fn new() -> Self {
        Self::with_clock(FixedClock::pinned())
    }

    pub fn with_clock(clock: FixedClock) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config {
            workspace: WorkspaceConfig::at(dir.path()),
            ..Config::default()
        };
        config.scheduler.enabled = false;
        std::fs::create_dir_all(dir.path().join(&config.workspace.memory_dir)).unwrap();
        Self { dir, config, clock }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn config(&self) -> Config {
        self.config.clone()
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone().shared()
    }

    pub fn fixed_clock(&self) -> &FixedClock {
        &self.clock
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// The date `days` calendar days before the fixture's today.
    pub fn days_ago(&self, days: i64) -> NaiveDate {
        self.today() - Duration::days(days)
    }

    pub fn memory_dir(&self) -> PathBuf {
        self.root().join(&self.config.workspace.memory_dir)
    }

    pub fn archive_dir(&self) -> PathBuf {
        self.memory_dir().join(&self.config.workspace.archive_dir)
    }

    pub fn runbooks_dir(&self) -> PathBuf {
        self.memory_dir().join(&self.config.workspace.runbooks_dir)
    }

    pub fn metrics_log(&self) -> PathBuf {
        self.memory_dir()
            .join(&self.config.workspace.metrics_dir)
            .join(&self.config.workspace.metrics_file)
    }

    pub fn working_memory(&self) -> PathBuf {
        self.memory_dir()
            .join(&self.config.workspace.working_memory_file)
    }

    pub fn summary(&self) -> PathBuf {
        self.root().join(&self.config.workspace.summary_file)
    }

    /// Write a file into the memory directory, modified "now" by the
    /// fixture clock.
    pub fn write_note(&self, name: &str, content: &str) -> PathBuf {
        let path = self.memory_dir().join(name);
        std::fs::write(&path, content).unwrap();
        self.backdate(&path, Duration::zero());
        path
    }

    pub fn write_dated_note(&self, date: NaiveDate, content: &str) -> PathBuf {
        self.write_note(&format!("{}.md", date.format("%Y-%m-%d")), content)
    }

    /// Write the working-memory document and make it `age` old.
    pub fn write_working_memory(&self, content: &str, age: Duration) -> PathBuf {
        let path = self.working_memory();
        std::fs::write(&path, content).unwrap();
        self.backdate(&path, age);
        path
    }

    pub fn write_summary(&self) -> PathBuf {
        let path = self.summary();
        std::fs::write(&path, "# MEMORY\n").unwrap();
        path
    }

    pub fn create_required_dirs(&self) {
        std::fs::create_dir_all(self.archive_dir()).unwrap();
        std::fs::create_dir_all(self.runbooks_dir()).unwrap();
    }

    /// A workspace where every state check passes: fresh working memory,
    /// today's note, both directories and the summary document.
    pub fn healthy(self) -> Self {
        self.create_required_dirs();
        self.write_summary();
        self.write_working_memory("## Last Updated\nnow\n", Duration::hours(1));
        self.write_dated_note(self.today(), "# today\n");
        self
    }

    /// Set the modification time to `age` before the fixture clock.
    pub fn backdate(&self, path: &Path, age: Duration) {
        let at: SystemTime = (self.clock.now() - age).into();
        File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(at)
            .unwrap();
    }

    pub fn read(&self, path: &Path) -> String {
        std::fs::read_to_string(path).unwrap()
    }

    /// Parsed lines of the metrics log; empty when the log does not exist.
    pub fn metrics_lines(&self) -> Vec<String> {
        std::fs::read_to_string(self.metrics_log())
            .map(|s| s.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

impl Default for WorkspaceFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a job snapshot with a cron schedule.
pub fn job(name: &str, consecutive_errors: u32) -> CronJobSnapshot {
    CronJobSnapshot {
        id: Some(format!("{name}-id")),
        name: name.to_string(),
        enabled: true,
        schedule: Some(Schedule::Cron {
            expr: "0 9 * * *".to_string()
        }),
        state: Some(JobState { consecutive_errors })
    }
}

/// Inventory that always returns the same jobs.
pub struct StaticInventory {
    name: String,
    jobs: Vec<CronJobSnapshot>,
    calls: AtomicU32
}

impl StaticInventory {
    pub fn new(name: &str, jobs: Vec<CronJobSnapshot>) -> Self {
        Self {
            name: name.to_string(),
            jobs,
            calls: AtomicU32::new(0)
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InventoryProvider for StaticInventory {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<Vec<CronJobSnapshot>, SchedulerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.jobs.clone())
    }
}

/// Inventory that always fails.
pub struct FailingInventory {
    name: String,
    calls: AtomicU32
}

impl FailingInventory {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            calls: AtomicU32::new(0)
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InventoryProvider for FailingInventory {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<Vec<CronJobSnapshot>, SchedulerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(SchedulerError::RequestFailed {
            provider: self.name.clone(),
            reason: "connection refused".to_string()
        })
    }
}

/// Inventory that answers only after `delay`.
pub struct DelayedInventory {
    name: String,
    delay: std::time::Duration,
    jobs: Vec<CronJobSnapshot>
}

impl DelayedInventory {
    pub fn new(name: &str, delay: std::time::Duration, jobs: Vec<CronJobSnapshot>) -> Self {
        Self {
            name: name.to_string(),
            delay,
            jobs
        }
    }
}

#[async_trait]
impl InventoryProvider for DelayedInventory {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<Vec<CronJobSnapshot>, SchedulerError> {
        tokio::time::sleep(self.delay).await;
        tracing::debug!("{} answered after {:?}", self.name, self.delay);
        Ok(self.jobs.clone())
    }
}
