use mk_core::InventoryProvider;
use std::sync::Arc;
use std::time::Duration;
use sync::SchedulerInventory;
use testing::{DelayedInventory, FailingInventory, StaticInventory, job};

/// Lets a test keep a handle on a provider after the chain owns it.
struct Shared<P>(Arc<P>);

#[async_trait::async_trait]
impl<P: InventoryProvider> InventoryProvider for Shared<P> {
    fn name(&self) -> &str {
        self.0.name()
    }

    async fn fetch(&self) -> Result<Vec<mk_core::CronJobSnapshot>, errors::SchedulerError> {
        self.0.fetch().await
    }
}

#[tokio::test]
async fn test_first_success_short_circuits() {
    let primary = Arc::new(StaticInventory::new("primary", vec![job("digest", 0)]));
    let fallback = Arc::new(StaticInventory::new("fallback", vec![]));
    let chain = SchedulerInventory::new(
        vec![
            Box::new(Shared(Arc::clone(&primary))),
            Box::new(Shared(Arc::clone(&fallback))),
        ],
        Duration::from_secs(1)
    );

    let jobs = chain.fetch().await.unwrap();

    assert_eq!(jobs.len(), 1);
    assert_eq!(primary.calls(), 1);
    assert_eq!(fallback.calls(), 0);
}

#[tokio::test]
async fn test_falls_back_after_failure() {
    let failing = Arc::new(FailingInventory::new("http"));
    let chain = SchedulerInventory::new(
        vec![
            Box::new(Shared(Arc::clone(&failing))),
            Box::new(StaticInventory::new("command", vec![job("backup", 3)])),
        ],
        Duration::from_secs(1)
    );

    let jobs = chain.fetch().await.unwrap();

    assert_eq!(failing.calls(), 1);
    assert_eq!(jobs[0].name, "backup");
}

#[tokio::test]
async fn test_all_failing_is_unavailable() {
    let chain = SchedulerInventory::new(
        vec![
            Box::new(FailingInventory::new("http")),
            Box::new(FailingInventory::new("command")),
        ],
        Duration::from_secs(1)
    );
    assert!(chain.fetch().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_slow_provider_times_out_and_falls_back() {
    let chain = SchedulerInventory::new(
        vec![
            Box::new(DelayedInventory::new("http", Duration::from_secs(30), vec![job("slow", 0)])),
            Box::new(StaticInventory::new("command", vec![job("fast", 0)])),
        ],
        Duration::from_secs(5)
    );

    let jobs = chain.fetch().await.unwrap();
    assert_eq!(jobs[0].name, "fast");
}

#[tokio::test]
async fn test_empty_success_is_not_unavailable() {
    let chain = SchedulerInventory::new(
        vec![Box::new(StaticInventory::new("http", vec![]))],
        Duration::from_secs(1)
    );
    assert_eq!(chain.fetch().await, Some(vec![]));
}

#[tokio::test]
async fn test_disabled_inventory_is_unavailable() {
    assert!(SchedulerInventory::disabled().fetch().await.is_none());
}

#[tokio::test]
async fn test_command_provider_parses_stdout() {
    let provider = sync::CommandInventoryProvider::new(
        "sh",
        vec![
            "-c".to_string(),
            r#"echo '{"jobs":[{"name":"digest","schedule":{"kind":"cron","expr":"0 9 * * *"}}]}'"#
                .to_string(),
        ]
    );
    let jobs = provider.fetch().await.unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].name, "digest");
}

#[tokio::test]
async fn test_command_provider_reports_missing_program() {
    let provider = sync::CommandInventoryProvider::new("memory-engine-no-such-scheduler", vec![]);
    assert!(provider.fetch().await.is_err());
}
