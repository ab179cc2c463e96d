use crate::commands::CommonArgs;
use crate::output;
use anyhow::Result;
use memory::{CollectionMetrics, MemoryEngine};

pub fn run(engine: &MemoryEngine, args: CommonArgs) -> Result<()> {
    execute(engine, args)?;
    Ok(())
}

pub fn execute(engine: &MemoryEngine, args: CommonArgs) -> Result<CollectionMetrics> {
    output::header("Metrics Collection Engine");
    output::field("Time", &engine.clock().display_timestamp());
    println!();

    let metrics = engine.collect_metrics()?;

    output::field("Total memory files", &metrics.total_files.to_string());
    output::field("Dated notes", &metrics.dated_notes.to_string());
    output::field("Total size", &format!("{} KB", metrics.total_size_kb()));
    output::field(
        "Date range",
        &format!(
            "{} to {}",
            metrics.oldest_note.as_deref().unwrap_or("N/A"),
            metrics.newest_note.as_deref().unwrap_or("N/A")
        )
    );
    if args.verbose {
        output::field(
            "Metrics log",
            &engine.workspace().metrics_log().display().to_string()
        );
    }

    println!();
    output::success("Metrics logged");
    Ok(metrics)
}
