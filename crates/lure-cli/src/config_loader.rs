use anyhow::Result;
use lure_config::{load_layer, validate_config, Config, ConfigLayer};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "lure.toml";

/// Defaults, then the org layer (`LURE_ORG_CONFIG`), then the project layer.
/// Each field a layer sets replaces the value beneath it.
pub fn load_effective_config(explicit_path: Option<&PathBuf>) -> Result<Config> {
    let mut effective = Config::default();

    if let Some(org) = load_org_config()? {
        effective.merge(org);
    }

    let project_path = explicit_path
        .cloned()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    if explicit_path.is_some() && !project_path.exists() {
        anyhow::bail!("Config file not found: {:?}", project_path);
    }
    effective.merge(load_layer(&project_path)?);

    validate_config(&effective)?;
    Ok(effective)
}

fn load_org_config() -> Result<Option<ConfigLayer>> {
    let Ok(org_path) = std::env::var("LURE_ORG_CONFIG") else {
        return Ok(None);
    };

    let path = Path::new(&org_path);
    if !path.exists() {
        tracing::warn!("LURE_ORG_CONFIG set to {:?} but file not found", path);
        return Ok(None);
    }

    // An org layer that is unusable on its own is skipped rather than fatal
    let checked = load_layer(path).and_then(|layer| {
        let mut resolved = Config::default();
        resolved.merge(layer.clone());
        validate_config(&resolved)?;
        Ok(layer)
    });
    match checked {
        Ok(layer) => Ok(Some(layer)),
        Err(e) => {
            tracing::warn!("Failed to load org config at {:?}: {:#}", path, e);
            Ok(None)
        }
    }
}
