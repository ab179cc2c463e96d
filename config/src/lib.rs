//! # Configuration System
//!
//! Centralized configuration management for the memory engine.
//!
//! This crate provides:
//! - Configuration structures for every engine component
//! - Environment variable loading (12-factor app principles)
//! - Configuration file loading (TOML/YAML)
//! - Configuration precedence (CLI > env > file > defaults)
//! - Configuration validation

pub mod config;
pub mod file_loader;
pub mod loader;
pub mod precedence;
pub mod validation;

pub use config::{
    ClockConfig, Config, DecayConfig, JobThresholds, ObservabilityConfig, PatternConfig,
    SchedulerConfig, StalenessConfig, WorkspaceConfig,
};
pub use file_loader::{ConfigFileError, load_from_file, load_from_toml, load_from_yaml};
pub use loader::{ConfigOverlay, WORKSPACE_ENV, load_env_overlay, load_from_env};
pub use precedence::{ConfigError, load_layered, merge_configs};
pub use validation::validate;
