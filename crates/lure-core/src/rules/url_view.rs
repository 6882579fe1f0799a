use crate::model::{Candidate, ElementKind};
use lure_config::HeuristicsConfig;
use std::collections::HashSet;
use url::Url;

/// Normalized view of a candidate that every heuristic reads from.
#[derive(Debug, Clone)]
pub struct UrlView<'a> {
    pub raw: &'a str,
    pub lower: String,
    /// Lower-cased hostname, empty when the URL does not parse or has no host.
    pub host: String,
    /// Everything after the authority (`scheme://host/`), without the leading slash.
    pub path: String,
    pub kind: ElementKind,
    pub text: Option<&'a str>,
    /// Scheme of the hosting document, lower-cased and without the trailing colon.
    pub document_scheme: Option<String>,
}

impl<'a> UrlView<'a> {
    pub fn new(candidate: &'a Candidate, document_scheme: Option<&str>) -> Self {
        let raw = candidate.url.as_str();
        Self {
            raw,
            lower: raw.to_lowercase(),
            host: extract_host(raw),
            path: extract_path(raw),
            kind: candidate.kind,
            text: candidate.text.as_deref(),
            document_scheme: document_scheme
                .map(|s| s.trim_end_matches(':').to_ascii_lowercase())
                .filter(|s| !s.is_empty()),
        }
    }

    /// Label after the final dot of the host, if there is a host at all.
    pub fn top_level_label(&self) -> Option<&str> {
        if self.host.is_empty() {
            return None;
        }
        self.host.rsplit('.').next().filter(|label| !label.is_empty())
    }
}

/// Hostname of `url`, or an empty string when it cannot be parsed.
pub fn extract_host(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_ascii_lowercase()))
        .unwrap_or_default()
}

fn extract_path(url: &str) -> String {
    url.split('/').skip(3).collect::<Vec<_>>().join("/")
}

/// Heuristic tables resolved once per rule-set build.
#[derive(Debug, Clone)]
pub struct HeuristicContext {
    pub keywords: Vec<String>,
    pub low_trust_tlds: HashSet<String>,
    pub entropy_threshold: f64,
}

impl HeuristicContext {
    pub fn from_config(config: &HeuristicsConfig) -> Self {
        Self {
            keywords: config
                .keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
            low_trust_tlds: config
                .low_trust_tlds
                .iter()
                .map(|t| t.trim().trim_start_matches('.').to_ascii_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
            entropy_threshold: config.entropy_threshold,
        }
    }
}

impl Default for HeuristicContext {
    fn default() -> Self {
        Self::from_config(&HeuristicsConfig::default())
    }
}
