use crate::commands::CommonArgs;
use crate::output;
use anyhow::Result;
use memory::{MemoryEngine, StubOutcome};

pub fn run(engine: &MemoryEngine, args: CommonArgs) -> Result<()> {
    execute(engine, args)?;
    Ok(())
}

pub fn execute(engine: &MemoryEngine, args: CommonArgs) -> Result<StubOutcome> {
    output::header("Daily Note Stub Generator");
    output::field("Time", &engine.clock().display_timestamp());
    println!();

    let outcome = engine.stub(args.options())?;
    let name = outcome
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if outcome.existed && !args.force {
        output::success(&format!("Today's note already exists: {name}"));
    } else if outcome.created {
        output::success(&format!("Created: {name}"));
    } else {
        output::dry(&format!("Would create: {name}"));
    }
    Ok(outcome)
}
