use crate::model::{Finding, Severity};

// Base scores
const BASE_SCORE_LOW: u32 = 10;
const BASE_SCORE_MEDIUM: u32 = 40;
const BASE_SCORE_HIGH: u32 = 70;
const BASE_SCORE_CRITICAL: u32 = 90;

const MAX_SCORE: u32 = 100;

pub fn calculate_base_score(severity: &Severity) -> u32 {
    match severity {
        Severity::Low => BASE_SCORE_LOW,
        Severity::Medium => BASE_SCORE_MEDIUM,
        Severity::High => BASE_SCORE_HIGH,
        Severity::Critical => BASE_SCORE_CRITICAL,
    }
}

/// Risk score of a candidate: the sum of its finding scores, capped at 100.
pub fn calculate_risk_score(findings: &[Finding]) -> u32 {
    findings
        .iter()
        .fold(0u32, |acc, f| acc.saturating_add(f.score))
        .min(MAX_SCORE)
}
