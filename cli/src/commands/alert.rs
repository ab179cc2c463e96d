use crate::commands::{CommonArgs, fetch_jobs};
use crate::output;
use anyhow::Result;
use colored::Colorize;
use memory::{AlertReport, MemoryEngine};
use mk_core::AlertLevel;

pub async fn run(engine: &MemoryEngine, _args: CommonArgs) -> Result<()> {
    output::header("Memory Alert Check");
    output::field("Time", &engine.clock().display_timestamp());
    println!();

    let jobs = fetch_jobs(engine).await;
    let report = engine.alert(jobs.as_deref());
    print_report(&report);

    let code = report.exit_code();
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

fn print_report(report: &AlertReport) {
    if report.is_empty() {
        output::success("No alerts - all systems nominal");
        return;
    }

    println!("Found {} alert(s):", report.alerts.len());
    let levels = [
        (AlertLevel::P0, "🚨 P0 CRITICAL:".red().bold(), "✗"),
        (AlertLevel::P1, "⚠️  P1 WARNING:".yellow().bold(), "!"),
        (AlertLevel::P2, "ℹ️  P2 INFO:".blue().bold(), "-"),
    ];
    for (level, title, marker) in levels {
        let mut alerts = report.level(level).peekable();
        if alerts.peek().is_none() {
            continue;
        }
        println!();
        println!("{title}");
        for alert in alerts {
            println!("  {} {}", marker, alert.message);
            println!("    → {}", alert.action.cyan());
        }
    }
}
