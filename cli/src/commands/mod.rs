pub mod alert;
pub mod audit;
pub mod decay;
pub mod metrics;
pub mod patterns;
pub mod refresh;
pub mod state;
pub mod stub;
pub mod sync;

use clap::{Args, Parser, Subcommand};
use memory::MemoryEngine;
use mk_core::{CronJobSnapshot, RunOptions};
use std::path::PathBuf;
use ::sync::SchedulerInventory;

#[derive(Parser)]
#[command(
    name = "memory-engine",
    author,
    version,
    about = "Memory Engine - lifecycle management for dated markdown notes",
    long_about = "Archives old daily notes, verifies working-memory health, syncs scheduler \
                  status into the working-memory document and detects recurring patterns.\n\n\
                  The workspace defaults to ~/.openclaw/workspace; override it with --workspace \
                  or OPENCLAW_WORKSPACE."
)]
pub struct Cli {
    #[arg(long, global = true, env = "OPENCLAW_WORKSPACE", help = "Workspace root directory")]
    pub workspace: Option<PathBuf>,

    #[arg(long, global = true, help = "Configuration file (TOML or YAML)")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands
}

/// Flags accepted by every command.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct CommonArgs {
    #[arg(short = 'n', long, help = "Don't make changes")]
    pub dry_run: bool,

    #[arg(short, long, help = "Verbose output")]
    pub verbose: bool,

    #[arg(short, long, help = "Force operations (overwrite)")]
    pub force: bool
}

impl CommonArgs {
    pub fn options(self) -> RunOptions {
        RunOptions {
            dry_run: self.dry_run,
            verbose: self.verbose,
            force: self.force
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Verify memory state integrity (exit code reflects severity)")]
    State(CommonArgs),

    #[command(about = "Pull current scheduler status into the working-memory document")]
    Sync(CommonArgs),

    #[command(about = "Create today's daily note if missing")]
    Stub(CommonArgs),

    #[command(about = "Full refresh (stub + sync + state check)")]
    Refresh(CommonArgs),

    #[command(about = "Check for P0/P1 alerts (exit code reflects severity)")]
    Alert(CommonArgs),

    #[command(about = "Archive notes past the retention threshold")]
    Decay(CommonArgs),

    #[command(about = "Collect and log metrics")]
    Metrics(CommonArgs),

    #[command(about = "Detect recurring patterns in recent notes")]
    Patterns(CommonArgs),

    #[command(about = "Run full audit (state, metrics, decay preview, patterns)")]
    Audit(CommonArgs)
}

impl Commands {
    pub fn common(&self) -> CommonArgs {
        match self {
            Commands::State(args)
            | Commands::Sync(args)
            | Commands::Stub(args)
            | Commands::Refresh(args)
            | Commands::Alert(args)
            | Commands::Decay(args)
            | Commands::Metrics(args)
            | Commands::Patterns(args)
            | Commands::Audit(args) => *args
        }
    }
}

/// Build the provider chain from configuration, reporting a client that
/// cannot be built the same way as any other unavailable scheduler.
pub fn inventory(engine: &MemoryEngine) -> SchedulerInventory {
    match SchedulerInventory::from_config(&engine.config().scheduler) {
        Ok(inventory) => inventory,
        Err(e) => {
            crate::ux_error::scheduler_client(&e.to_string()).display();
            SchedulerInventory::disabled()
        }
    }
}

pub async fn fetch_jobs(engine: &MemoryEngine) -> Option<Vec<CronJobSnapshot>> {
    inventory(engine).fetch().await
}
