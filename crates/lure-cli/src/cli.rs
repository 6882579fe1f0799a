use clap::{Args, Parser, Subcommand};
use lure_core::Severity;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lure")]
#[command(about = "Heuristic phishing scanner for links and images in HTML pages", long_about = None)]
pub struct Cli {
    /// Path to config file (default: ./lure.toml)
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan the links and images of an HTML document
    Scan(ScanArgs),
    /// Inspect the heuristic rule set
    #[command(subcommand)]
    Rules(RulesCommand),
    /// Configuration helpers
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Write a default lure.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// HTML file to scan ("-" reads STDIN)
    pub input: PathBuf,
    /// URL the document was served from; resolves relative links and sets the document scheme
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,
    /// Output format (text, json, markdown, html)
    #[arg(long, default_value = "text")]
    pub format: String,
    /// Fail (exit 1) if any candidate's score reaches this value
    #[arg(long, env = "LURE_FAIL_SCORE")]
    pub fail_score: Option<u32>,
    /// Override the per-candidate delay (milliseconds)
    #[arg(long, value_name = "MS")]
    pub step_delay_ms: Option<u64>,
    /// Hide clean results from the output
    #[arg(long)]
    pub only_suspicious: bool,
    /// Print the border and tooltip applied to each element
    #[arg(long)]
    pub show_marks: bool,
    /// Read start/restart/pause/resume/cancel commands from STDIN while scanning
    #[arg(long)]
    pub interactive: bool,
}

#[derive(Subcommand)]
pub enum RulesCommand {
    /// List active rules
    List {
        /// Only show rules at or above this severity (low, medium, high, critical)
        #[arg(long, value_parser = parse_severity)]
        severity: Option<Severity>,
    },
    /// Show details for one rule
    Explain { rule_id: String },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Validate the effective configuration
    Check {
        /// Config file to check instead of the global --config
        config_path: Option<PathBuf>,
    },
    /// Print the effective configuration as TOML
    Dump,
}

fn parse_severity(s: &str) -> Result<Severity, String> {
    match s.to_lowercase().as_str() {
        "low" | "medium" | "high" | "critical" => Ok(Severity::from(s)),
        _ => Err(format!(
            "invalid severity '{}' (expected low, medium, high, critical)",
            s
        )),
    }
}
