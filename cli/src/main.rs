use anyhow::Result;
use clap::Parser;
use memory::{MemoryEngine, SystemClock};
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod commands;
mod output;
pub mod ux_error;

use commands::{Cli, Commands};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let common = cli.command.common();

    let config = match config::load_layered(cli.config.as_deref(), cli.workspace.clone()) {
        Ok(config) => config,
        Err(e) => {
            ux_error::config_error(&e.to_string()).display();
            std::process::exit(1);
        }
    };

    init_tracing(&config.observability.logging_level, common.verbose);

    let clock = Arc::new(SystemClock::from_config(&config.clock));
    let engine = MemoryEngine::new(config, clock);

    if let Err(e) = engine.ensure_layout() {
        tracing::error!(class = ?e.class(), "{}", e);
        ux_error::layout_failed(&engine.workspace().root().display().to_string(), &e.to_string())
            .display();
        std::process::exit(1);
    }

    match cli.command {
        Commands::State(args) => commands::state::run(&engine, args).await,
        Commands::Sync(args) => commands::sync::run(&engine, args).await,
        Commands::Stub(args) => commands::stub::run(&engine, args),
        Commands::Refresh(args) => commands::refresh::run(&engine, args).await,
        Commands::Alert(args) => commands::alert::run(&engine, args).await,
        Commands::Decay(args) => commands::decay::run(&engine, args),
        Commands::Metrics(args) => commands::metrics::run(&engine, args),
        Commands::Patterns(args) => commands::patterns::run(&engine, args),
        Commands::Audit(args) => commands::audit::run(&engine, args).await,
    }
}

/// Diagnostics go to stderr so command output stays clean on stdout.
/// `RUST_LOG` wins over the configured level; `--verbose` raises the
/// configured level to debug.
fn init_tracing(level: &str, verbose: bool) {
    let level = if verbose { "debug" } else { level };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
