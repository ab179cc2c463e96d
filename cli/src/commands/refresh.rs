use crate::commands::{CommonArgs, state, stub, sync};
use crate::output;
use anyhow::Result;
use memory::MemoryEngine;

pub async fn run(engine: &MemoryEngine, args: CommonArgs) -> Result<()> {
    let started = engine.clock().display_timestamp();
    output::banner(&["MEMORY ENGINE REFRESH", started.as_str()]);

    stub::execute(engine, args)?;
    sync::execute(engine, args).await?;
    let state = state::execute(engine, args).await;

    let verdict = if state.has_critical() {
        "⚠️  CRITICAL ISSUES REQUIRE ATTENTION"
    } else if state.has_warning() {
        "✓ Refreshed (minor warnings present)"
    } else {
        "✓ All systems nominal"
    };
    output::banner(&["REFRESH COMPLETE", verdict]);
    println!();
    Ok(())
}
