use crate::config_loader::DEFAULT_CONFIG_FILE;
use anyhow::{bail, Result};
use colored::*;
use lure_config::{save_config, Config};
use std::path::Path;

pub fn init(force: bool) -> Result<()> {
    let path = Path::new(DEFAULT_CONFIG_FILE);
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            DEFAULT_CONFIG_FILE
        );
    }

    save_config(&Config::default(), path)?;

    println!(
        "{} Created {} with the default heuristics.",
        "✔".green(),
        DEFAULT_CONFIG_FILE.bold()
    );
    println!("   Edit [heuristics] to tune keywords and TLDs, or add [rules.\"<id>\"] patterns.");
    Ok(())
}
