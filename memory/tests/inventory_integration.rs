use chrono::Duration;
use memory::{CollectionMetrics, MemoryEngine};
use mk_core::RunOptions;
use testing::{FixedClock, WorkspaceFixture};

#[test]
fn test_stub_then_scan_yields_one_note_aged_zero() {
    let fixture = WorkspaceFixture::with_clock(FixedClock::current());
    let engine = MemoryEngine::new(fixture.config(), fixture.clock());

    let outcome = engine.stub(RunOptions::default()).unwrap();
    assert!(outcome.created);
    fixture.backdate(&outcome.path, Duration::zero());

    let notes = engine.scan().unwrap();
    assert_eq!(notes.len(), 1);
    let date = fixture.today().format("%Y-%m-%d").to_string();
    assert_eq!(notes[0].date_string(), Some(date.clone()));
    assert_eq!(notes[0].name, format!("{date}.md"));
    assert_eq!(notes[0].age_in_days, 0);
}

#[test]
fn test_stub_respects_existing_note_unless_forced() {
    let fixture = WorkspaceFixture::new();
    let path = fixture.write_dated_note(fixture.today(), "my own notes\n");
    let engine = MemoryEngine::new(fixture.config(), fixture.clock());

    let outcome = engine.stub(RunOptions::default()).unwrap();
    assert!(!outcome.created);
    assert!(outcome.existed);
    assert_eq!(fixture.read(&path), "my own notes\n");

    let forced = engine
        .stub(RunOptions {
            force: true,
            ..RunOptions::default()
        })
        .unwrap();
    assert!(forced.created);
    assert!(fixture.read(&path).starts_with("# 2026-10-17 Daily Memory\n"));
}

#[test]
fn test_stub_dry_run_writes_nothing() {
    let fixture = WorkspaceFixture::new();
    let engine = MemoryEngine::new(fixture.config(), fixture.clock());

    let outcome = engine.stub(RunOptions::default().dry()).unwrap();

    assert!(!outcome.created);
    assert!(!outcome.path.exists());
}

#[test]
fn test_scan_ages_follow_modification_time() {
    let fixture = WorkspaceFixture::new();
    let path = fixture.write_note("ideas.md", "undated\n");
    fixture.backdate(&path, Duration::days(3));
    std::fs::create_dir_all(fixture.memory_dir().join("2026-10-01.md")).unwrap();

    let notes = MemoryEngine::new(fixture.config(), fixture.clock())
        .scan()
        .unwrap();

    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].date, None);
    assert_eq!(notes[0].age_in_days, 3);
    assert_eq!(notes[0].size_bytes, 8);
}

#[test]
fn test_missing_memory_directory_is_empty_inventory() {
    let fixture = WorkspaceFixture::new();
    std::fs::remove_dir_all(fixture.memory_dir()).unwrap();

    let notes = MemoryEngine::new(fixture.config(), fixture.clock())
        .scan()
        .unwrap();
    assert!(notes.is_empty());
}

#[test]
fn test_empty_directory_metrics_are_zero_and_logged() {
    let fixture = WorkspaceFixture::new();
    let engine = MemoryEngine::new(fixture.config(), fixture.clock());
    engine.ensure_layout().unwrap();

    let metrics = engine.collect_metrics().unwrap();
    assert_eq!(metrics, CollectionMetrics::default());

    let lines = fixture.metrics_lines();
    assert_eq!(lines.len(), 1);
    let entry: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(
        entry,
        serde_json::json!({
            "category": "collection",
            "timestamp": "2026-10-17T15:00:00.000Z",
            "totalFiles": 0,
            "datedNotes": 0,
            "totalSizeBytes": 0,
            "oldestNote": null,
            "newestNote": null
        })
    );
}

#[test]
fn test_metrics_log_is_append_only() {
    let fixture = WorkspaceFixture::new();
    fixture.write_dated_note(fixture.days_ago(3), "abc\n");
    let engine = MemoryEngine::new(fixture.config(), fixture.clock());
    engine.ensure_layout().unwrap();
    std::fs::write(fixture.metrics_log(), "{\"category\":\"legacy\"}\n").unwrap();

    engine.collect_metrics().unwrap();
    engine.collect_metrics().unwrap();

    let lines = fixture.metrics_lines();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "{\"category\":\"legacy\"}");
    assert!(lines[2].contains("\"datedNotes\":1"));
}

#[test]
fn test_metrics_write_failure_propagates() {
    let fixture = WorkspaceFixture::new();
    let engine = MemoryEngine::new(fixture.config(), fixture.clock());
    std::fs::create_dir_all(fixture.metrics_log()).unwrap();

    let err = engine.collect_metrics().unwrap_err();
    assert!(matches!(err, memory::MemoryError::Metrics(_)));
    assert!(!err.is_fatal());
}
