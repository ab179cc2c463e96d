use colored::Colorize;

const BANNER_WIDTH: usize = 50;

/// `=== title ===` with a blank line before it.
pub fn header(title: &str) {
    println!();
    println!("{}", format!("=== {title} ===").bold().underline());
}

pub fn subheader(title: &str) {
    println!();
    println!("{}", title.bold());
}

/// Framed block used by the composite commands.
pub fn banner(lines: &[&str]) {
    let rule = "=".repeat(BANNER_WIDTH);
    println!();
    println!("{}", rule.bold());
    for line in lines {
        println!("   {}", line.bold());
    }
    println!("{}", rule.bold());
}

pub fn field(label: &str, value: &str) {
    println!("{}: {}", label, value);
}

pub fn dry(msg: &str) {
    println!("{} {}", "[DRY RUN]".yellow().bold(), msg);
}

pub fn hint(msg: &str) {
    println!("{} {}", "hint:".cyan().bold(), msg.dimmed());
}

pub fn info(msg: &str) {
    eprintln!("{} {}", "info:".blue().bold(), msg);
}

pub fn warn(msg: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), msg);
}

pub fn error(msg: &str) {
    eprintln!("{} {}", "error:".red().bold(), msg);
}

pub fn success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_does_not_panic() {
        header("State Verification Engine");
    }

    #[test]
    fn test_banner_does_not_panic() {
        banner(&["MEMORY ENGINE REFRESH", "10/17/2026 10:00:00 EST"]);
        banner(&[]);
    }

    #[test]
    fn test_line_helpers_do_not_panic() {
        subheader("--- Summary ---");
        field("Scanned", "3");
        dry("Would create: 2026-10-17.md");
        hint("Run: memory-engine stub");
        info("Scheduler disabled");
        warn("Inventory unavailable");
        error("Error archiving 2026-08-01.md");
        success("Metrics logged");
    }
}
