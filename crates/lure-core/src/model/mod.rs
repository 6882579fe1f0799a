use crate::rules::grade::Grade;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize, Default, Hash)]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Low => write!(f, "LOW"),
            Severity::Medium => write!(f, "MEDIUM"),
            Severity::High => write!(f, "HIGH"),
            Severity::Critical => write!(f, "CRITICAL"),
        }
    }
}

impl From<&str> for Severity {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "low" => Severity::Low,
            "medium" => Severity::Medium,
            "high" => Severity::High,
            "critical" => Severity::Critical,
            _ => Severity::Medium,
        }
    }
}

/// What sort of page element a candidate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Link,
    Image,
}

impl ElementKind {
    /// The attribute that carries the element's URL.
    pub fn url_attribute(self) -> &'static str {
        match self {
            ElementKind::Link => "href",
            ElementKind::Image => "src",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Link => write!(f, "link"),
            ElementKind::Image => write!(f, "image"),
        }
    }
}

/// A URL-bearing element as seen by the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub kind: ElementKind,
    pub url: String,
    /// Visible text, only meaningful for links.
    pub text: Option<String>,
}

impl Candidate {
    pub fn link(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: ElementKind::Link,
            url: url.into(),
            text: Some(text.into()),
        }
    }

    pub fn image(url: impl Into<String>) -> Self {
        Self {
            kind: ElementKind::Image,
            url: url.into(),
            text: None,
        }
    }
}

/// One triggered heuristic. Displays as its human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Finding {
    pub rule_id: String,
    pub message: String,
    pub severity: Severity,
    pub score: u32,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Classification outcome for one candidate URL.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScanResult {
    pub url: String,
    pub kind: ElementKind,
    pub findings: Vec<Finding>,
    pub score: u32,
    pub grade: Grade,
}

impl ScanResult {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}
