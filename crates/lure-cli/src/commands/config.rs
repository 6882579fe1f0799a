use crate::config_loader::load_effective_config;
use anyhow::{Context, Result};
use lure_core::get_all_rules;
use std::path::PathBuf;

/// Returns `true` when the configuration is unusable.
pub fn check(config_path: Option<&PathBuf>) -> Result<bool> {
    println!("🔍 Validating configuration...");

    let config = match load_effective_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("❌ {:#}", e);
            return Ok(true);
        }
    };
    println!("✅ Configuration loaded successfully.");
    println!("   - Config Path: {:?}", config_path);
    println!("   - Keywords: {}", config.heuristics.keywords.len());
    println!(
        "   - Low-trust TLDs: {}",
        config.heuristics.low_trust_tlds.len()
    );
    println!(
        "   - Entropy threshold: {:.2} bits/char",
        config.heuristics.entropy_threshold
    );

    match get_all_rules(&config) {
        Ok(rules) => {
            println!("   - Total Active Rules: {}", rules.len());
            Ok(false)
        }
        Err(e) => {
            println!("❌ {}", e);
            Ok(true)
        }
    }
}

pub fn dump(config_path: Option<&PathBuf>) -> Result<()> {
    let config = load_effective_config(config_path)?;
    let rendered =
        toml::to_string_pretty(&config).context("Failed to serialize effective config")?;
    print!("{}", rendered);
    Ok(())
}
