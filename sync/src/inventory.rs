//! # Scheduler Inventory
//!
//! The job list is read through an ordered chain of providers: the HTTP
//! endpoint first, then the scheduler's own CLI. Each provider gets the
//! same timeout; the first success wins. When every provider fails the
//! inventory is unavailable (`None`), which callers report as a warning
//! rather than an error.

use crate::error::{Result, SyncError};
use async_trait::async_trait;
use config::SchedulerConfig;
use errors::SchedulerError;
use mk_core::{CronJobSnapshot, InventoryProvider};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct InventoryPayload {
    #[serde(default)]
    jobs: Vec<serde_json::Value>
}

/// Decode `{"jobs": [...]}`; a missing `jobs` key is an empty inventory.
///
/// Jobs are decoded one by one. A malformed entry is logged and skipped so
/// the remaining jobs are still checked.
pub fn parse_inventory(provider: &str, body: &[u8]) -> std::result::Result<Vec<CronJobSnapshot>, SchedulerError> {
    let payload = serde_json::from_slice::<InventoryPayload>(body).map_err(|e| {
        SchedulerError::InvalidPayload {
            provider: provider.to_string(),
            reason: e.to_string()
        }
    })?;

    let mut jobs = Vec::with_capacity(payload.jobs.len());
    for (index, raw) in payload.jobs.into_iter().enumerate() {
        match serde_json::from_value::<CronJobSnapshot>(raw) {
            Ok(job) => jobs.push(job),
            Err(e) => tracing::warn!(provider, index, "Skipping unreadable job entry: {}", e)
        }
    }
    Ok(jobs)
}

/// `GET <endpoint>` against the scheduler API.
pub struct HttpInventoryProvider {
    http_client: reqwest::Client,
    endpoint: String
}

impl HttpInventoryProvider {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SyncError::Client {
                reason: e.to_string()
            })?;
        Ok(Self {
            http_client,
            endpoint: endpoint.into()
        })
    }
}

#[async_trait]
impl InventoryProvider for HttpInventoryProvider {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self) -> std::result::Result<Vec<CronJobSnapshot>, SchedulerError> {
        tracing::debug!(endpoint = %self.endpoint, "Querying scheduler inventory");
        let request_failed = |e: reqwest::Error| SchedulerError::RequestFailed {
            provider: self.name().to_string(),
            reason: e.to_string()
        };

        let response = self
            .http_client
            .get(&self.endpoint)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(request_failed)?;

        if !response.status().is_success() {
            return Err(SchedulerError::RequestFailed {
                provider: self.name().to_string(),
                reason: format!("HTTP {}", response.status().as_u16())
            });
        }

        let body = response.bytes().await.map_err(request_failed)?;
        parse_inventory(self.name(), &body)
    }
}

/// Runs the scheduler CLI and parses its JSON output.
pub struct CommandInventoryProvider {
    program: String,
    args: Vec<String>
}

impl CommandInventoryProvider {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args
        }
    }
}

#[async_trait]
impl InventoryProvider for CommandInventoryProvider {
    fn name(&self) -> &str {
        "command"
    }

    async fn fetch(&self) -> std::result::Result<Vec<CronJobSnapshot>, SchedulerError> {
        tracing::debug!(program = %self.program, "Running scheduler CLI");
        let output = tokio::process::Command::new(&self.program)
            .args(&self.args)
            .stdin(std::process::Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| SchedulerError::RequestFailed {
                provider: self.name().to_string(),
                reason: format!("{}: {}", self.program, e)
            })?;

        if !output.status.success() {
            return Err(SchedulerError::RequestFailed {
                provider: self.name().to_string(),
                reason: format!(
                    "{} exited with {}: {}",
                    self.program,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                )
            });
        }

        parse_inventory(self.name(), &output.stdout)
    }
}

/// Ordered provider chain with a per-provider timeout.
pub struct SchedulerInventory {
    providers: Vec<Box<dyn InventoryProvider>>,
    timeout: Duration
}

impl SchedulerInventory {
    pub fn new(providers: Vec<Box<dyn InventoryProvider>>, timeout: Duration) -> Self {
        Self { providers, timeout }
    }

    /// An inventory that is always unavailable.
    pub fn disabled() -> Self {
        Self::new(Vec::new(), Duration::ZERO)
    }

    /// HTTP endpoint, then the CLI fallback. A disabled scheduler yields an
    /// empty chain.
    pub fn from_config(config: &SchedulerConfig) -> Result<Self> {
        if !config.enabled {
            return Ok(Self::disabled());
        }
        let timeout = Duration::from_secs(config.timeout_seconds);
        let providers: Vec<Box<dyn InventoryProvider>> = vec![
            Box::new(HttpInventoryProvider::new(config.endpoint.clone(), timeout)?),
            Box::new(CommandInventoryProvider::new(
                config.fallback_command.clone(),
                config.fallback_args.clone()
            )),
        ];
        Ok(Self::new(providers, timeout))
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// First successful provider's jobs, or `None` when all fail.
    pub async fn fetch(&self) -> Option<Vec<CronJobSnapshot>> {
        for provider in &self.providers {
            let outcome = match tokio::time::timeout(self.timeout, provider.fetch()).await {
                Ok(result) => result,
                Err(_) => Err(SchedulerError::Timeout {
                    provider: provider.name().to_string(),
                    seconds: self.timeout.as_secs()
                })
            };

            match outcome {
                Ok(jobs) => {
                    tracing::debug!("{} returned {} jobs", provider.name(), jobs.len());
                    return Some(jobs);
                }
                Err(e) => {
                    tracing::warn!(class = ?e.class(), "Scheduler inventory provider failed: {}", e)
                }
            }
        }

        if !self.providers.is_empty() {
            tracing::warn!("Scheduler inventory unavailable");
        }
        None
    }
}
