use colored::Colorize;

#[derive(Debug)]
pub struct UxError {
    pub what: String,
    pub why: Option<String>,
    pub how_to_fix: Vec<String>,
    pub suggested_command: Option<String>,
}

impl UxError {
    pub fn new(what: impl Into<String>) -> Self {
        Self {
            what: what.into(),
            why: None,
            how_to_fix: Vec::new(),
            suggested_command: None,
        }
    }

    pub fn why(mut self, reason: impl Into<String>) -> Self {
        self.why = Some(reason.into());
        self
    }

    pub fn fix(mut self, suggestion: impl Into<String>) -> Self {
        self.how_to_fix.push(suggestion.into());
        self
    }

    pub fn suggest(mut self, cmd: impl Into<String>) -> Self {
        self.suggested_command = Some(cmd.into());
        self
    }

    pub fn display(&self) {
        eprintln!();
        eprintln!("{} {}", "error:".red().bold(), self.what.white().bold());

        if let Some(why) = &self.why {
            eprintln!("       {}", why.dimmed());
        }

        if !self.how_to_fix.is_empty() {
            eprintln!();
            eprintln!("{}", "How to fix:".yellow().bold());
            for (i, fix) in self.how_to_fix.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, fix);
            }
        }

        if let Some(cmd) = &self.suggested_command {
            eprintln!();
            eprintln!("{}", "Try this:".green().bold());
            eprintln!("  $ {}", cmd.cyan());
        }
        eprintln!();
    }
}

impl std::fmt::Display for UxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.what)
    }
}

impl std::error::Error for UxError {}

pub fn layout_failed(workspace: &str, reason: &str) -> UxError {
    UxError::new(format!("Cannot prepare workspace at '{}'", workspace))
        .why(reason.to_string())
        .fix("Check that the workspace directory exists and is writable")
        .fix("Point at another workspace with --workspace or OPENCLAW_WORKSPACE")
        .suggest("memory-engine --workspace ~/.openclaw/workspace state")
}

pub fn config_error(message: &str) -> UxError {
    UxError::new(format!("Configuration error: {}", message))
        .why("A config file or ME_* environment variable holds an invalid value")
        .fix("Check .memory-engine.toml in the workspace, or the file named by MEMORY_ENGINE_CONFIG")
        .fix("Unset ME_* variables to fall back to the defaults")
        .suggest("env | grep ^ME_")
}

pub fn scheduler_client(reason: &str) -> UxError {
    UxError::new("Cannot build the scheduler client")
        .why(reason.to_string())
        .fix("Disable the scheduler query with ME_SCHEDULER_ENABLED=false")
        .suggest("ME_SCHEDULER_ENABLED=false memory-engine sync")
}
