//! # Configuration Precedence
//!
//! Merges configuration from multiple sources with precedence rules.
//!
//! # Precedence Order
//! 1. CLI arguments (highest priority)
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values (lowest priority)
//!
//! The config file is a full `Config`; a field there only overrides the
//! defaults when it differs from them, so a sparse file never resets
//! anything. The environment and CLI are [`ConfigOverlay`]s: every field
//! they set wins, even when the value equals the built-in default.

use crate::config::{
    ClockConfig, Config, DecayConfig, JobThresholds, ObservabilityConfig, PatternConfig,
    SchedulerConfig, StalenessConfig, WorkspaceConfig,
};
use crate::file_loader::{ConfigFileError, discover_config_file, load_from_file};
use crate::loader::{ConfigOverlay, load_env_overlay};
use std::path::{Path, PathBuf};
use validator::Validate;

/// Errors raised while assembling the layered configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file error: {0}")]
    File(#[from] ConfigFileError),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

/// Merge multiple configuration sources with precedence.
///
/// ## Usage
/// ```rust,no_run
/// use config::{Config, merge_configs, load_env_overlay};
///
/// let _config = merge_configs(
///     Config::default(),
///     None,
///     "file",
///     &load_env_overlay(),
///     "env",
///     None,
///     "cli",
/// );
/// ```
pub fn merge_configs(
    defaults: Config,
    file_config: Option<Config>,
    file_source_name: &str,
    env_overlay: &ConfigOverlay,
    env_source_name: &str,
    cli_overlay: Option<&ConfigOverlay>,
    cli_source_name: &str,
) -> Config {
    let mut config = defaults;

    if let Some(file) = file_config {
        config = merge_with_logging(config, file, file_source_name);
    }
    apply_with_logging(&mut config, env_overlay, env_source_name);

    if let Some(cli) = cli_overlay {
        apply_with_logging(&mut config, cli, cli_source_name);
    }

    config
}

fn apply_with_logging(config: &mut Config, overlay: &ConfigOverlay, source_name: &str) {
    let changes = overlay.apply(config);
    if !changes.is_empty() {
        tracing::info!("Configuration from {}: {:?}", source_name, changes);
    }
}

/// Load defaults, the config file, the environment and CLI overrides, then
/// validate the result.
///
/// The config file is `explicit_file` when given, else the
/// `MEMORY_ENGINE_CONFIG` variable, else `<workspace>/.memory-engine.toml`
/// when present.
pub fn load_layered(
    explicit_file: Option<&Path>,
    workspace_override: Option<PathBuf>,
) -> Result<Config, ConfigError> {
    let env_overlay = load_env_overlay();

    let root = workspace_override
        .clone()
        .or_else(|| env_overlay.workspace_root.clone())
        .unwrap_or_else(crate::config::default_workspace_root);
    let env_file = std::env::var(crate::loader::CONFIG_FILE_ENV)
        .ok()
        .map(PathBuf::from);
    let file_path = discover_config_file(explicit_file.or(env_file.as_deref()), &root);

    let file_config = match file_path {
        Some(path) => {
            tracing::debug!("Loading configuration file {}", path.display());
            Some(load_from_file(&path)?)
        }
        None => None,
    };

    let cli_overlay = workspace_override.map(ConfigOverlay::workspace);

    let config = merge_configs(
        Config::default(),
        file_config,
        "file",
        &env_overlay,
        "env",
        cli_overlay.as_ref(),
        "cli",
    );
    config.validate()?;
    Ok(config)
}

fn merge_with_logging(mut base: Config, override_config: Config, source_name: &str) -> Config {
    let mut changes = Vec::new();

    merge_workspace(&mut base.workspace, &override_config.workspace, &mut changes);
    merge_decay(&mut base.decay, &override_config.decay, &mut changes);
    merge_staleness(&mut base.staleness, &override_config.staleness, &mut changes);
    merge_jobs(&mut base.jobs, &override_config.jobs, &mut changes);
    merge_patterns(&mut base.patterns, &override_config.patterns, &mut changes);
    merge_scheduler(&mut base.scheduler, &override_config.scheduler, &mut changes);
    merge_clock(&mut base.clock, &override_config.clock, &mut changes);
    merge_observability(
        &mut base.observability,
        &override_config.observability,
        &mut changes,
    );

    if !changes.is_empty() {
        tracing::info!("Configuration from {}: {:?}", source_name, changes);
    }

    base
}

macro_rules! take_if_set {
    ($base:expr, $over:expr, $default:expr, $field:ident, $label:literal, $changes:expr) => {
        if $over.$field != $default.$field && $over.$field != $base.$field {
            $changes.push(format!("{} = {:?}", $label, $over.$field));
            $base.$field = $over.$field.clone();
        }
    };
}

fn merge_workspace(base: &mut WorkspaceConfig, over: &WorkspaceConfig, changes: &mut Vec<String>) {
    let d = WorkspaceConfig::default();
    take_if_set!(base, over, d, root, "workspace.root", changes);
    take_if_set!(base, over, d, memory_dir, "workspace.memory_dir", changes);
    take_if_set!(base, over, d, archive_dir, "workspace.archive_dir", changes);
    take_if_set!(base, over, d, runbooks_dir, "workspace.runbooks_dir", changes);
    take_if_set!(base, over, d, metrics_dir, "workspace.metrics_dir", changes);
    take_if_set!(base, over, d, metrics_file, "workspace.metrics_file", changes);
    take_if_set!(base, over, d, working_memory_file, "workspace.working_memory_file", changes);
    take_if_set!(base, over, d, summary_file, "workspace.summary_file", changes);
    take_if_set!(base, over, d, note_extension, "workspace.note_extension", changes);
}

fn merge_decay(base: &mut DecayConfig, over: &DecayConfig, changes: &mut Vec<String>) {
    let d = DecayConfig::default();
    take_if_set!(base, over, d, threshold_days, "decay.threshold_days", changes);
}

fn merge_staleness(base: &mut StalenessConfig, over: &StalenessConfig, changes: &mut Vec<String>) {
    let d = StalenessConfig::default();
    take_if_set!(base, over, d, warning_hours, "staleness.warning_hours", changes);
    take_if_set!(base, over, d, critical_hours, "staleness.critical_hours", changes);
}

fn merge_jobs(base: &mut JobThresholds, over: &JobThresholds, changes: &mut Vec<String>) {
    let d = JobThresholds::default();
    take_if_set!(base, over, d, state_error_threshold, "jobs.state_error_threshold", changes);
    take_if_set!(base, over, d, alert_error_threshold, "jobs.alert_error_threshold", changes);
}

fn merge_patterns(base: &mut PatternConfig, over: &PatternConfig, changes: &mut Vec<String>) {
    let d = PatternConfig::default();
    take_if_set!(base, over, d, window_days, "patterns.window_days", changes);
    take_if_set!(base, over, d, min_occurrences, "patterns.min_occurrences", changes);
}

fn merge_scheduler(base: &mut SchedulerConfig, over: &SchedulerConfig, changes: &mut Vec<String>) {
    let d = SchedulerConfig::default();
    take_if_set!(base, over, d, enabled, "scheduler.enabled", changes);
    take_if_set!(base, over, d, endpoint, "scheduler.endpoint", changes);
    take_if_set!(base, over, d, timeout_seconds, "scheduler.timeout_seconds", changes);
    take_if_set!(base, over, d, fallback_command, "scheduler.fallback_command", changes);
    take_if_set!(base, over, d, fallback_args, "scheduler.fallback_args", changes);
}

fn merge_clock(base: &mut ClockConfig, over: &ClockConfig, changes: &mut Vec<String>) {
    let d = ClockConfig::default();
    take_if_set!(base, over, d, utc_offset_minutes, "clock.utc_offset_minutes", changes);
    take_if_set!(base, over, d, label, "clock.label", changes);
}

fn merge_observability(
    base: &mut ObservabilityConfig,
    over: &ObservabilityConfig,
    changes: &mut Vec<String>,
) {
    let d = ObservabilityConfig::default();
    take_if_set!(base, over, d, logging_level, "observability.logging_level", changes);
}
