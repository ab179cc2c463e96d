use crate::commands::{CommonArgs, decay, metrics, patterns, state};
use crate::output;
use anyhow::Result;
use memory::MemoryEngine;

pub async fn run(engine: &MemoryEngine, args: CommonArgs) -> Result<()> {
    let started = engine.clock().display_timestamp();
    output::banner(&["MEMORY ENGINE FULL AUDIT", started.as_str()]);

    state::execute(engine, args).await;
    metrics::execute(engine, args)?;
    decay::execute(
        engine,
        CommonArgs {
            dry_run: true,
            ..args
        }
    )?;
    patterns::execute(engine, args)?;

    output::banner(&["AUDIT COMPLETE"]);
    println!();
    Ok(())
}
