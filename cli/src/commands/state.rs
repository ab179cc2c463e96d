use crate::commands::{CommonArgs, fetch_jobs};
use crate::output;
use anyhow::Result;
use colored::Colorize;
use memory::{MemoryEngine, StateReport};
use mk_core::Severity;

pub async fn run(engine: &MemoryEngine, args: CommonArgs) -> Result<()> {
    let report = execute(engine, args).await;
    let code = report.exit_code();
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

pub async fn execute(engine: &MemoryEngine, args: CommonArgs) -> StateReport {
    output::header("State Verification Engine");
    output::field("Time", &engine.clock().display_timestamp());

    let jobs = fetch_jobs(engine).await;
    let report = engine.state(jobs.as_deref());
    print_report(&report, args.verbose);
    report
}

fn print_report(report: &StateReport, verbose: bool) {
    if verbose {
        println!();
        for check in &report.passed {
            output::success(check);
        }
    }

    if report.issues.is_empty() {
        println!();
        output::success("All state checks passed");
        return;
    }

    output::subheader("--- Issues Found ---");
    let buckets = [
        (Severity::Critical, "🚨 CRITICAL (P0):".red().bold(), "✗"),
        (Severity::Warning, "⚠️  WARNING:".yellow().bold(), "!"),
        (Severity::Info, "ℹ️  INFO:".blue().bold(), "-"),
    ];
    for (severity, title, marker) in buckets {
        let mut issues = report.bucket(severity).peekable();
        if issues.peek().is_none() {
            continue;
        }
        println!();
        println!("{title}");
        for issue in issues {
            println!("  {} {}", marker, issue.message);
        }
    }
}
