mod cli;
mod commands;
mod config_loader;
mod formatters;
mod page;

use clap::Parser;
use cli::{Cli, Commands, ConfigCommand, RulesCommand};
use colored::Colorize;

use std::process::exit;

use tracing_subscriber::EnvFilter;

fn main() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    // Worker threads may be parked on STDIN; exit instead of waiting on them.
    ctrlc::set_handler(move || {
        eprintln!("\n{} Received Ctrl+C. Stopping scan...", "⚠️".yellow());
        std::process::exit(130);
    })
    .expect("Error setting Ctrl-C handler");

    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let result = match &cli.command {
        Some(Commands::Scan(args)) => commands::scan::scan(args, cli.config.as_ref(), cli.quiet),
        Some(Commands::Rules(cmd)) => match cmd {
            RulesCommand::List { severity } => {
                commands::rules::list(cli.config.as_ref(), severity.clone()).map(|_| false)
            }
            RulesCommand::Explain { rule_id } => {
                commands::rules::explain(cli.config.as_ref(), rule_id).map(|_| false)
            }
        },
        Some(Commands::Config(cmd)) => match cmd {
            ConfigCommand::Check { config_path } => {
                let path = config_path.clone().or_else(|| cli.config.clone());
                commands::config::check(path.as_ref())
            }
            ConfigCommand::Dump => commands::config::dump(cli.config.as_ref()).map(|_| false),
        },
        Some(Commands::Init { force }) => commands::init::init(*force).map(|_| false),
        None => {
            use clap::CommandFactory;
            let _ = Cli::command().print_help();
            exit(0);
        }
    };

    exit(exit_code(result))
}

/// 0 clean, 1 when the fail threshold was reached or a check failed, 2 on error.
fn exit_code(result: anyhow::Result<bool>) -> i32 {
    match result {
        Ok(false) => 0,
        Ok(true) => 1,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            2
        }
    }
}
