use assert_cmd::{Command, cargo_bin_cmd};
use std::path::Path;
use tempfile::TempDir;

/// Binary pinned to a workspace, UTC dates and no scheduler access.
fn engine(workspace: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("memory-engine");
    cmd.arg("--workspace")
        .arg(workspace)
        .env_remove("OPENCLAW_WORKSPACE")
        .env_remove("MEMORY_ENGINE_CONFIG")
        .env_remove("RUST_LOG")
        .env("ME_SCHEDULER_ENABLED", "false")
        .env("ME_UTC_OFFSET_MINUTES", "0")
        .env("ME_CLOCK_LABEL", "UTC")
        .env("ME_LOG_LEVEL", "warn")
        .env("NO_COLOR", "1");
    cmd
}

fn today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

fn workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("memory")).unwrap();
    dir
}

mod help_and_version {
    use super::*;
    use predicates::prelude::predicate;

    #[test]
    fn test_help_lists_every_command() {
        let output = cargo_bin_cmd!("memory-engine")
            .arg("--help")
            .output()
            .unwrap();
        assert!(output.status.success());
        let stdout = String::from_utf8(output.stdout).unwrap();
        for name in [
            "state", "sync", "stub", "refresh", "alert", "decay", "metrics", "patterns", "audit",
        ] {
            assert!(stdout.contains(name), "help is missing {name}");
        }
    }

    #[test]
    fn test_version_flag() {
        cargo_bin_cmd!("memory-engine")
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("memory-engine 2.0.0"));
    }

    #[test]
    fn test_no_args_shows_usage() {
        cargo_bin_cmd!("memory-engine")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Usage:"));
    }

    #[test]
    fn test_subcommands_accept_common_flags() {
        let dir = workspace();
        for name in ["stub", "metrics", "patterns", "decay"] {
            engine(dir.path())
                .args([name, "-n", "-v", "-f"])
                .assert()
                .success();
        }
    }
}

mod stub_and_state {
    use super::*;
    use predicates::prelude::predicate;

    #[test]
    fn test_stub_creates_todays_note() {
        let dir = workspace();
        engine(dir.path())
            .arg("stub")
            .assert()
            .success()
            .stdout(predicate::str::contains(format!("Created: {}.md", today())));

        let note = dir.path().join("memory").join(format!("{}.md", today()));
        let body = std::fs::read_to_string(note).unwrap();
        assert!(body.starts_with(&format!("# {} Daily Memory", today())));
        assert!(body.contains("## Decisions Made"));
    }

    #[test]
    fn test_stub_dry_run_writes_nothing() {
        let dir = workspace();
        engine(dir.path())
            .args(["stub", "--dry-run"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Would create"));
        assert!(!dir.path().join("memory").join(format!("{}.md", today())).exists());
    }

    #[test]
    fn test_state_on_empty_workspace_exits_two() {
        let dir = workspace();
        engine(dir.path())
            .arg("state")
            .assert()
            .code(2)
            .stdout(predicate::str::contains(
                "active-context.md MISSING - working memory unavailable"
            ))
            .stdout(predicate::str::contains("Could not verify cron jobs"));
    }

    #[test]
    fn test_alert_on_empty_workspace_exits_two() {
        let dir = workspace();
        engine(dir.path())
            .arg("alert")
            .assert()
            .code(2)
            .stdout(predicate::str::contains("P0 CRITICAL"))
            .stdout(predicate::str::contains("Recreate working memory immediately"));
    }

    #[test]
    fn test_refresh_then_alert_is_clean() {
        let dir = workspace();
        std::fs::write(dir.path().join("MEMORY.md"), "# MEMORY\n").unwrap();
        std::fs::create_dir_all(dir.path().join("memory/runbooks")).unwrap();

        engine(dir.path())
            .arg("refresh")
            .assert()
            .success()
            .stdout(predicate::str::contains("REFRESH COMPLETE"));

        let doc = std::fs::read_to_string(dir.path().join("memory/active-context.md")).unwrap();
        assert!(doc.contains("## Last Updated\n"));
        assert!(doc.contains("## Session Handoff\n_Synced automatically by memory engine._"));

        engine(dir.path())
            .arg("alert")
            .assert()
            .success()
            .stdout(predicate::str::contains("No alerts"));
    }
}

mod decay_and_metrics {
    use super::*;
    use predicates::prelude::predicate;

    #[test]
    fn test_decay_dry_run_then_live() {
        let dir = workspace();
        let old = dir.path().join("memory/2020-01-15.md");
        std::fs::write(&old, "# old\n").unwrap();

        engine(dir.path())
            .args(["decay", "-n"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Would archive: 2020-01-15.md"));
        assert!(old.exists());

        engine(dir.path())
            .arg("decay")
            .assert()
            .success()
            .stdout(predicate::str::contains("Archived: 2020-01-15.md → 2020-01/"));
        assert!(!old.exists());
        assert!(dir.path().join("memory/2020-01-15.md.archived").exists());
        let copy =
            std::fs::read_to_string(dir.path().join("memory/archive/2020-01/2020-01-15.md")).unwrap();
        assert!(copy.starts_with("<!-- ARCHIVED: "));
        assert!(copy.ends_with("-->\n# old\n"));
    }

    #[test]
    fn test_metrics_on_empty_workspace() {
        let dir = workspace();
        engine(dir.path())
            .arg("metrics")
            .assert()
            .success()
            .stdout(predicate::str::contains("Total memory files: 0"))
            .stdout(predicate::str::contains("Date range: N/A to N/A"));

        let log =
            std::fs::read_to_string(dir.path().join("memory/architecture/metrics-log.jsonl")).unwrap();
        let entry: serde_json::Value = serde_json::from_str(log.lines().next().unwrap()).unwrap();
        assert_eq!(entry["category"], "collection");
        assert_eq!(entry["totalFiles"], 0);
        assert!(entry["oldestNote"].is_null());
    }

    #[test]
    fn test_audit_previews_decay_without_archiving() {
        let dir = workspace();
        let old = dir.path().join("memory/2020-01-15.md");
        std::fs::write(&old, "# old\n").unwrap();

        engine(dir.path())
            .arg("audit")
            .assert()
            .success()
            .stdout(predicate::str::contains("AUDIT COMPLETE"))
            .stdout(predicate::str::contains("Would archive: 2020-01-15.md"));
        assert!(old.exists());
    }

    #[test]
    fn test_patterns_need_more_data() {
        let dir = workspace();
        engine(dir.path())
            .arg("patterns")
            .assert()
            .success()
            .stdout(predicate::str::contains("No recurring patterns detected yet"));
    }
}

mod failures {
    use super::*;
    use predicates::prelude::predicate;

    #[test]
    fn test_invalid_configuration_is_reported() {
        let dir = workspace();
        engine(dir.path())
            .env("ME_STALE_WARNING_HOURS", "100")
            .arg("state")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Configuration error"));
    }

    #[test]
    fn test_unwritable_layout_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("memory"), "not a directory").unwrap();
        engine(dir.path())
            .arg("metrics")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Cannot prepare workspace"));
    }

    #[test]
    fn test_workspace_config_file_is_honoured() {
        let dir = workspace();
        std::fs::write(
            dir.path().join(".memory-engine.toml"),
            "[decay]\nthreshold_days = 3650\n"
        )
        .unwrap();
        let old = dir.path().join("memory/2020-01-15.md");
        std::fs::write(&old, "# old\n").unwrap();

        engine(dir.path())
            .env_remove("ME_DECAY_THRESHOLD_DAYS")
            .arg("decay")
            .assert()
            .success()
            .stdout(predicate::str::contains("Kept: 1"));
        assert!(old.exists());
    }
}
