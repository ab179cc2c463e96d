use crate::commands::CommonArgs;
use crate::output;
use anyhow::Result;
use memory::{DecayAction, DecayReport, MemoryEngine};

pub fn run(engine: &MemoryEngine, args: CommonArgs) -> Result<()> {
    execute(engine, args)?;
    Ok(())
}

pub fn execute(engine: &MemoryEngine, args: CommonArgs) -> Result<DecayReport> {
    output::header("Memory Decay Engine");
    output::field("Mode", if args.dry_run { "DRY RUN" } else { "LIVE" });
    output::field("Time", &engine.clock().display_timestamp());
    println!();

    let report = engine.decay(args.options())?;

    for outcome in &report.outcomes {
        if args.verbose {
            println!("{}: {} days old", outcome.name, outcome.age_days);
        }
        match &outcome.action {
            DecayAction::Kept => {}
            DecayAction::WouldArchive { .. } => output::dry(&format!(
                "Would archive: {} ({} days old)",
                outcome.name, outcome.age_days
            )),
            DecayAction::Archived { partition, .. } => {
                output::success(&format!("Archived: {} → {}/", outcome.name, partition));
            }
            DecayAction::Failed { reason } => {
                output::error(&format!("Error archiving {}: {}", outcome.name, reason));
            }
        }
    }

    output::subheader("--- Summary ---");
    output::field("Scanned", &report.counts.scanned.to_string());
    output::field("Archived", &report.counts.archived.to_string());
    output::field("Kept", &report.counts.kept.to_string());
    output::field("Errors", &report.counts.errors.to_string());
    Ok(report)
}
