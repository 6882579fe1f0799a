use crate::config::Config;
use anyhow::{bail, Result};

const MAX_PATTERN_LEN: usize = 1024;

pub fn validate_config(config: &Config) -> Result<()> {
    let threshold = config.heuristics.entropy_threshold;
    // Shannon entropy of a char distribution cannot meaningfully exceed 16 bits/char here.
    if !threshold.is_finite() || !(0.0..=16.0).contains(&threshold) {
        bail!(
            "Invalid config field 'heuristics.entropy_threshold': must be between 0.0 and 16.0 (got {})",
            threshold
        );
    }

    if config.heuristics.keywords.iter().any(|k| k.trim().is_empty()) {
        bail!("Invalid config field 'heuristics.keywords': entries must be non-empty");
    }

    for tld in &config.heuristics.low_trust_tlds {
        if tld.trim().is_empty() {
            bail!("Invalid config field 'heuristics.low_trust_tlds': entries must be non-empty");
        }
        if tld.starts_with('.') {
            bail!(
                "Invalid config field 'heuristics.low_trust_tlds': '{}' must not start with a dot",
                tld
            );
        }
    }

    if config.scan.step_delay_ms > 10_000 {
        bail!("Invalid config field 'scan.step_delay_ms': must be at most 10000");
    }

    if config.scan.pause_poll_ms == 0 || config.scan.pause_poll_ms > 60_000 {
        bail!("Invalid config field 'scan.pause_poll_ms': must be between 1 and 60000");
    }

    for (id, rule) in &config.rules {
        if let Some(pattern) = &rule.pattern {
            if pattern.is_empty() {
                bail!("Rule '{}' has empty pattern", id);
            }
            if pattern.len() > MAX_PATTERN_LEN {
                bail!(
                    "Rule '{}' has a pattern exceeding the maximum length of {} characters (current: {})",
                    id,
                    MAX_PATTERN_LEN,
                    pattern.len()
                );
            }
            if let Err(e) = regex::Regex::new(pattern) {
                bail!("Rule '{}' has invalid regex: {}", id, e);
            }
        }

        if let Some(severity) = &rule.severity {
            match severity.to_lowercase().as_str() {
                "low" | "medium" | "high" | "critical" => {}
                _ => bail!(
                    "Invalid config field 'severity' for rule '{}': {}. Must be one of: low, medium, high, critical",
                    id,
                    severity
                ),
            }
        }
    }

    Ok(())
}
