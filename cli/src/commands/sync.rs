use crate::commands::{CommonArgs, inventory};
use crate::output;
use anyhow::Result;
use memory::MemoryEngine;
use ::sync::{StatusSync, SyncReport};

pub async fn run(engine: &MemoryEngine, args: CommonArgs) -> Result<()> {
    execute(engine, args).await?;
    Ok(())
}

pub async fn execute(engine: &MemoryEngine, args: CommonArgs) -> Result<SyncReport> {
    output::header("Memory Sync Engine");
    output::field("Mode", if args.dry_run { "DRY RUN" } else { "LIVE" });
    output::field("Time", &engine.clock().display_timestamp());
    println!();

    println!("Syncing cron job inventory...");
    let report = StatusSync::new(engine)
        .run(&inventory(engine), args.dry_run)
        .await?;

    match &report.jobs {
        Some(jobs) if !jobs.is_empty() => {
            output::success(&format!("Found {} cron jobs", jobs.len()));
        }
        Some(_) => println!("  No cron jobs registered"),
        None => output::warn("Scheduler inventory unavailable, job table left as is")
    }

    println!();
    if report.written {
        output::success(&format!("Updated {}", engine.workspace().working_memory_name()));
    } else {
        output::dry(&format!("Would update: {}", report.section_names().join(", ")));
    }
    Ok(report)
}
