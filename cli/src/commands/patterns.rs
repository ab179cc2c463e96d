use crate::commands::CommonArgs;
use crate::output;
use anyhow::Result;
use memory::{MemoryEngine, PatternReport};

pub fn run(engine: &MemoryEngine, args: CommonArgs) -> Result<()> {
    execute(engine, args)?;
    Ok(())
}

pub fn execute(engine: &MemoryEngine, _args: CommonArgs) -> Result<PatternReport> {
    output::header("Pattern Detection Engine");
    output::field("Time", &engine.clock().display_timestamp());
    println!();

    let report = engine.patterns()?;
    println!("Analyzing {} recent daily notes...", report.analyzed);

    println!();
    if report.patterns.is_empty() {
        println!("No recurring patterns detected yet (need more data)");
    } else {
        println!("Recurring patterns found:");
        for pattern in &report.patterns {
            println!("  {}x: {}", pattern.count, pattern.heading);
        }
    }
    Ok(report)
}
