use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub heuristics: HeuristicsConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HeuristicsConfig {
    /// Risk vocabulary matched as plain substrings of the lower-cased URL.
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
    /// Top-level labels (no leading dot) considered low-trust.
    #[serde(default = "default_low_trust_tlds")]
    pub low_trust_tlds: Vec<String>,
    /// Bits per character above which a URL path is flagged.
    #[serde(default = "default_entropy_threshold")]
    pub entropy_threshold: f64,
}

impl Default for HeuristicsConfig {
    fn default() -> Self {
        Self {
            keywords: default_keywords(),
            low_trust_tlds: default_low_trust_tlds(),
            entropy_threshold: default_entropy_threshold(),
        }
    }
}

fn default_keywords() -> Vec<String> {
    [
        "phish", "malware", "ransom", "hack", "scam", "steal", "login", "verify", "bank",
        "secure", "account", "update",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_low_trust_tlds() -> Vec<String> {
    [
        "ru", "cn", "tk", "ml", "ga", "cf", "gq", "xyz", "top", "pw", "work", "fit", "biz",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

pub const DEFAULT_ENTROPY_THRESHOLD: f64 = 4.0;

fn default_entropy_threshold() -> f64 {
    DEFAULT_ENTROPY_THRESHOLD
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ScanConfig {
    /// Delay after each candidate, keeps the host responsive.
    #[serde(default = "default_step_delay_ms")]
    pub step_delay_ms: u64,
    /// Wake-up interval while a session is paused.
    #[serde(default = "default_pause_poll_ms")]
    pub pause_poll_ms: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            step_delay_ms: default_step_delay_ms(),
            pause_poll_ms: default_pause_poll_ms(),
        }
    }
}

fn default_step_delay_ms() -> u64 {
    150
}

fn default_pause_poll_ms() -> u64 {
    300
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub only_suspicious: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RuleConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub severity: Option<String>,
    pub pattern: Option<String>,
    pub score: Option<u32>,
    pub category: Option<String>,
    pub description: Option<String>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            severity: None,
            pattern: None,
            score: None,
            category: None,
            description: None,
        }
    }
}

fn default_true() -> bool {
    true
}

/// One on-disk layer (org or project file). Only fields the file names are `Some`,
/// so a layer can replace a lower layer's value with anything, defaults included.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct ConfigLayer {
    pub heuristics: HeuristicsLayer,
    pub scan: ScanLayer,
    pub output: OutputLayer,
    pub rules: HashMap<String, RuleConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct HeuristicsLayer {
    pub keywords: Option<Vec<String>>,
    pub low_trust_tlds: Option<Vec<String>>,
    pub entropy_threshold: Option<f64>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct ScanLayer {
    pub step_delay_ms: Option<u64>,
    pub pause_poll_ms: Option<u64>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct OutputLayer {
    pub only_suspicious: Option<bool>,
}

impl Config {
    /// Lays `layer` over `self`: every field the layer sets replaces the current
    /// value, lists included. Rule entries replace per id.
    pub fn merge(&mut self, layer: ConfigLayer) {
        let ConfigLayer {
            heuristics,
            scan,
            output,
            rules,
        } = layer;

        if let Some(keywords) = heuristics.keywords {
            self.heuristics.keywords = keywords;
        }
        if let Some(tlds) = heuristics.low_trust_tlds {
            self.heuristics.low_trust_tlds = tlds;
        }
        if let Some(threshold) = heuristics.entropy_threshold {
            self.heuristics.entropy_threshold = threshold;
        }
        if let Some(delay) = scan.step_delay_ms {
            self.scan.step_delay_ms = delay;
        }
        if let Some(poll) = scan.pause_poll_ms {
            self.scan.pause_poll_ms = poll;
        }
        if let Some(only_suspicious) = output.only_suspicious {
            self.output.only_suspicious = only_suspicious;
        }

        self.rules.extend(rules);
    }

    /// Whether a rule id is switched on (rules absent from config are on).
    pub fn rule_enabled(&self, id: &str) -> bool {
        self.rules.get(id).map(|r| r.enabled).unwrap_or(true)
    }
}
