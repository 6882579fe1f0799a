use crate::config::{Config, ConfigLayer};
use crate::validate::validate_config;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Reads one layer without resolving it; a missing file is an empty layer.
pub fn load_layer(path: &Path) -> Result<ConfigLayer> {
    if !path.exists() {
        return Ok(ConfigLayer::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {:?}", path))?;

    toml::from_str(&content).with_context(|| "Failed to parse TOML config file")
}

/// A single file resolved over the defaults and validated.
pub fn load_config(path: &Path) -> Result<Config> {
    let mut config = Config::default();
    config.merge(load_layer(path)?);

    validate_config(&config)?;

    Ok(config)
}

pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    let content =
        toml::to_string_pretty(config).with_context(|| "Failed to serialize config to TOML")?;

    fs::write(path, content)
        .with_context(|| format!("Failed to write config file to {:?}", path))?;

    Ok(())
}
