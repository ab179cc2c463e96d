//! # Environment Variable Loader
//!
//! Loads configuration from environment variables following 12-factor app
//! principles.
//!
//! The environment is read into a [`ConfigOverlay`]: only variables that are
//! set (and parse) become overrides, so an explicit value wins over the
//! config file even when it equals the built-in default.
//!
//! # Naming Convention
//! - `OPENCLAW_WORKSPACE`: Workspace root shared with the scheduler
//! - `ME_*`: Memory engine settings

use crate::config::Config;
use std::env;
use std::path::PathBuf;

/// Environment variable holding the workspace root.
pub const WORKSPACE_ENV: &str = "OPENCLAW_WORKSPACE";

/// Environment variable pointing at an explicit config file.
pub const CONFIG_FILE_ENV: &str = "MEMORY_ENGINE_CONFIG";

/// Fields explicitly set by a higher-precedence source (environment or CLI).
///
/// `None` leaves the lower layer untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverlay {
    pub workspace_root: Option<PathBuf>,
    pub decay_threshold_days: Option<i64>,
    pub stale_warning_hours: Option<u32>,
    pub stale_critical_hours: Option<u32>,
    pub scheduler_enabled: Option<bool>,
    pub scheduler_endpoint: Option<String>,
    pub scheduler_timeout_seconds: Option<u64>,
    pub utc_offset_minutes: Option<i32>,
    pub clock_label: Option<String>,
    pub logging_level: Option<String>
}

macro_rules! overlay_field {
    ($overlay:expr, $config:expr, $src:ident => $($dst:ident).+, $label:literal, $changes:expr) => {
        if let Some(value) = &$overlay.$src {
            if *value != $config.$($dst).+ {
                $changes.push(format!("{} = {:?}", $label, value));
                $config.$($dst).+ = value.clone();
            }
        }
    };
}

impl ConfigOverlay {
    /// Overlay that only sets the workspace root.
    pub fn workspace(root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: Some(root.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Write every set field into `config`, returning a description of
    /// each value that changed.
    pub fn apply(&self, config: &mut Config) -> Vec<String> {
        let mut changes = Vec::new();
        overlay_field!(self, config, workspace_root => workspace.root, "workspace.root", changes);
        overlay_field!(self, config, decay_threshold_days => decay.threshold_days, "decay.threshold_days", changes);
        overlay_field!(self, config, stale_warning_hours => staleness.warning_hours, "staleness.warning_hours", changes);
        overlay_field!(self, config, stale_critical_hours => staleness.critical_hours, "staleness.critical_hours", changes);
        overlay_field!(self, config, scheduler_enabled => scheduler.enabled, "scheduler.enabled", changes);
        overlay_field!(self, config, scheduler_endpoint => scheduler.endpoint, "scheduler.endpoint", changes);
        overlay_field!(self, config, scheduler_timeout_seconds => scheduler.timeout_seconds, "scheduler.timeout_seconds", changes);
        overlay_field!(self, config, utc_offset_minutes => clock.utc_offset_minutes, "clock.utc_offset_minutes", changes);
        overlay_field!(self, config, clock_label => clock.label, "clock.label", changes);
        overlay_field!(self, config, logging_level => observability.logging_level, "observability.logging_level", changes);
        changes
    }
}

/// Read the overrides present in the environment.
///
/// Unset or unparsable variables are left out of the overlay.
///
/// ## Environment Variables
/// - `OPENCLAW_WORKSPACE`: Workspace root (default: `$HOME/.openclaw/workspace`)
/// - `ME_DECAY_THRESHOLD_DAYS`: Archive notes older than this (default: 30)
/// - `ME_STALE_WARNING_HOURS`: Working-memory warning threshold (default: 24)
/// - `ME_STALE_CRITICAL_HOURS`: Working-memory critical threshold (default: 48)
/// - `ME_SCHEDULER_ENABLED`: Query the scheduler (true/false, default: true)
/// - `ME_SCHEDULER_ENDPOINT`: Inventory endpoint URL
/// - `ME_SCHEDULER_TIMEOUT_SECONDS`: Per-provider timeout (default: 5)
/// - `ME_UTC_OFFSET_MINUTES`: Note timezone offset (default: -300)
/// - `ME_CLOCK_LABEL`: Timestamp zone label (default: "EST")
/// - `ME_LOG_LEVEL`: Logging level (trace/debug/info/warn/error, default: "info")
pub fn load_env_overlay() -> ConfigOverlay {
    ConfigOverlay {
        workspace_root: env::var(WORKSPACE_ENV)
            .ok()
            .filter(|root| !root.trim().is_empty())
            .map(PathBuf::from),
        decay_threshold_days: parse_env("ME_DECAY_THRESHOLD_DAYS"),
        stale_warning_hours: parse_env("ME_STALE_WARNING_HOURS"),
        stale_critical_hours: parse_env("ME_STALE_CRITICAL_HOURS"),
        scheduler_enabled: parse_env("ME_SCHEDULER_ENABLED"),
        scheduler_endpoint: env::var("ME_SCHEDULER_ENDPOINT").ok(),
        scheduler_timeout_seconds: parse_env("ME_SCHEDULER_TIMEOUT_SECONDS"),
        utc_offset_minutes: parse_env("ME_UTC_OFFSET_MINUTES"),
        clock_label: env::var("ME_CLOCK_LABEL").ok(),
        logging_level: env::var("ME_LOG_LEVEL")
            .ok()
            .map(|level| level.trim().to_ascii_lowercase())
    }
}

/// Defaults with the environment applied on top.
pub fn load_from_env() -> Config {
    let mut config = Config::default();
    load_env_overlay().apply(&mut config);
    config
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring unparsable {}={:?}", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        WORKSPACE_ENV,
        "ME_DECAY_THRESHOLD_DAYS",
        "ME_STALE_WARNING_HOURS",
        "ME_STALE_CRITICAL_HOURS",
        "ME_SCHEDULER_ENABLED",
        "ME_SCHEDULER_ENDPOINT",
        "ME_SCHEDULER_TIMEOUT_SECONDS",
        "ME_UTC_OFFSET_MINUTES",
        "ME_CLOCK_LABEL",
        "ME_LOG_LEVEL",
    ];

    fn clear_env() {
        for var in VARS {
            unsafe {
                env::remove_var(var);
            }
        }
    }

    #[test]
    #[serial]
    fn test_empty_environment_is_empty_overlay() {
        clear_env();
        assert!(load_env_overlay().is_empty());

        let config = load_from_env();
        assert_eq!(config.decay.threshold_days, 30);
        assert_eq!(config.staleness.warning_hours, 24);
        assert_eq!(config.scheduler.endpoint, "http://localhost/api/cron/list");
        assert_eq!(config.observability.logging_level, "info");
    }

    #[test]
    #[serial]
    fn test_load_from_env_overrides() {
        clear_env();
        unsafe {
            env::set_var(WORKSPACE_ENV, "/srv/notes");
            env::set_var("ME_DECAY_THRESHOLD_DAYS", "45");
            env::set_var("ME_SCHEDULER_ENABLED", "false");
            env::set_var("ME_LOG_LEVEL", "DEBUG");
        }

        let config = load_from_env();
        clear_env();

        assert_eq!(config.workspace.root, PathBuf::from("/srv/notes"));
        assert_eq!(config.decay.threshold_days, 45);
        assert!(!config.scheduler.enabled);
        assert_eq!(config.observability.logging_level, "debug");
    }

    #[test]
    #[serial]
    fn test_value_equal_to_default_is_still_an_override() {
        clear_env();
        unsafe {
            env::set_var("ME_SCHEDULER_ENABLED", "true");
            env::set_var("ME_DECAY_THRESHOLD_DAYS", "30");
        }
        let overlay = load_env_overlay();
        clear_env();

        assert_eq!(overlay.scheduler_enabled, Some(true));
        assert_eq!(overlay.decay_threshold_days, Some(30));
    }

    #[test]
    #[serial]
    fn test_unparsable_value_is_left_out() {
        clear_env();
        unsafe {
            env::set_var("ME_STALE_CRITICAL_HOURS", "two days");
        }
        let overlay = load_env_overlay();
        clear_env();

        assert_eq!(overlay.stale_critical_hours, None);
        let mut config = Config::default();
        overlay.apply(&mut config);
        assert_eq!(config.staleness.critical_hours, 48);
    }

    #[test]
    fn test_parse_env_missing() {
        assert_eq!(parse_env::<u32>("ME_NONEXISTENT_VAR"), None);
    }

    #[test]
    #[serial]
    fn test_parse_env_negative_offset() {
        clear_env();
        unsafe {
            env::set_var("ME_UTC_OFFSET_MINUTES", " -240 ");
        }
        let overlay = load_env_overlay();
        clear_env();
        assert_eq!(overlay.utc_offset_minutes, Some(-240));
    }

    #[test]
    fn test_apply_reports_only_changed_fields() {
        let mut config = Config::default();
        let overlay = ConfigOverlay {
            decay_threshold_days: Some(30),
            clock_label: Some("UTC".to_string()),
            ..ConfigOverlay::default()
        };
        let changes = overlay.apply(&mut config);
        assert_eq!(changes, vec!["clock.label = \"UTC\"".to_string()]);
        assert_eq!(config.clock.label, "UTC");
    }
}
