//! # Configuration File Loading
//!
//! Loads configuration from TOML or YAML files.
//!
//! Supports automatic format detection based on file extension.

use crate::config::Config;
use std::path::{Path, PathBuf};

/// Config file looked up inside the workspace root when no explicit path is
/// given.
pub const WORKSPACE_CONFIG_FILE: &str = ".memory-engine.toml";

/// Configuration file loading error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse TOML: {0}")]
    TomlParse(String),

    #[error("Failed to parse YAML: {0}")]
    YamlParse(String),

    #[error("Config file has no extension")]
    NoExtension,

    #[error("Unsupported config file format: {0}")]
    UnsupportedFormat(String),
}

/// Load configuration from a TOML file.
///
/// ## Usage
/// ```rust,no_run
/// use config::load_from_toml;
/// use std::path::Path;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = load_from_toml(Path::new(".memory-engine.toml"))?;
///     println!("Decay threshold: {}", config.decay.threshold_days);
///     Ok(())
/// }
/// ```
pub fn load_from_toml(path: &Path) -> Result<Config, ConfigFileError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|_e| ConfigFileError::FileNotFound(path.display().to_string()))?;

    toml::from_str(&contents).map_err(|e| ConfigFileError::TomlParse(e.to_string()))
}

/// Load configuration from a YAML file.
pub fn load_from_yaml(path: &Path) -> Result<Config, ConfigFileError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|_e| ConfigFileError::FileNotFound(path.display().to_string()))?;

    serde_yaml::from_str(&contents).map_err(|e| ConfigFileError::YamlParse(e.to_string()))
}

/// Load configuration from file, detecting the format from the extension.
///
/// ## Supported Formats
/// - `.toml`: TOML format
/// - `.yaml` / `.yml`: YAML format
pub fn load_from_file(path: &Path) -> Result<Config, ConfigFileError> {
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or(ConfigFileError::NoExtension)?;

    match extension.to_lowercase().as_str() {
        "toml" => load_from_toml(path),
        "yaml" | "yml" => load_from_yaml(path),
        other => Err(ConfigFileError::UnsupportedFormat(other.to_string())),
    }
}

/// Resolve which config file applies, if any.
///
/// An explicit path always wins; otherwise the workspace-local
/// `.memory-engine.toml` is used when it exists.
#[must_use]
pub fn discover_config_file(explicit: Option<&Path>, workspace_root: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let candidate = workspace_root.join(WORKSPACE_CONFIG_FILE);
    candidate.is_file().then_some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.toml");

        let toml_content = r#"
[workspace]
root = "/srv/openclaw"
memory_dir = "journal"

[decay]
threshold_days = 60

[staleness]
warning_hours = 12
critical_hours = 36

[scheduler]
enabled = false
timeout_seconds = 3

[observability]
logging_level = "debug"
"#;
        fs::write(&path, toml_content).unwrap();

        let config = load_from_toml(&path).unwrap();
        assert_eq!(config.workspace.root, PathBuf::from("/srv/openclaw"));
        assert_eq!(config.workspace.memory_dir, "journal");
        assert_eq!(config.workspace.archive_dir, "archive");
        assert_eq!(config.decay.threshold_days, 60);
        assert_eq!(config.staleness.warning_hours, 12);
        assert!(!config.scheduler.enabled);
        assert_eq!(config.scheduler.timeout_seconds, 3);
        assert_eq!(config.scheduler.fallback_command, "openclaw");
        assert_eq!(config.observability.logging_level, "debug");
    }

    #[test]
    fn test_load_from_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.yaml");

        let yaml_content = r#"
patterns:
  window_days: 14
  min_occurrences: 2
jobs:
  alert_error_threshold: 5
clock:
  utc_offset_minutes: 60
  label: CET
"#;
        fs::write(&path, yaml_content).unwrap();

        let config = load_from_yaml(&path).unwrap();
        assert_eq!(config.patterns.window_days, 14);
        assert_eq!(config.patterns.min_occurrences, 2);
        assert_eq!(config.jobs.alert_error_threshold, 5);
        assert_eq!(config.jobs.state_error_threshold, 0);
        assert_eq!(config.clock.label, "CET");
    }

    #[test]
    fn test_load_from_file_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.json");
        fs::write(&path, "{}").unwrap();

        let result = load_from_file(&path);
        assert!(matches!(result, Err(ConfigFileError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_load_from_file_no_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine");
        fs::write(&path, "").unwrap();

        let result = load_from_file(&path);
        assert!(matches!(result, Err(ConfigFileError::NoExtension)));
    }

    #[test]
    fn test_load_from_toml_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.toml");
        fs::write(&path, "[invalid\n").unwrap();

        let result = load_from_toml(&path);
        assert!(matches!(result, Err(ConfigFileError::TomlParse(_))));
    }

    #[test]
    fn test_load_from_toml_not_found() {
        let result = load_from_toml(Path::new("/nonexistent/path/engine.toml"));
        assert!(matches!(result, Err(ConfigFileError::FileNotFound(_))));
    }

    #[test]
    fn test_discover_prefers_explicit_then_workspace_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(discover_config_file(None, dir.path()), None);

        fs::write(dir.path().join(WORKSPACE_CONFIG_FILE), "").unwrap();
        assert_eq!(
            discover_config_file(None, dir.path()),
            Some(dir.path().join(WORKSPACE_CONFIG_FILE))
        );

        let explicit = Path::new("/etc/memory-engine.yaml");
        assert_eq!(
            discover_config_file(Some(explicit), dir.path()),
            Some(explicit.to_path_buf())
        );
    }
}
