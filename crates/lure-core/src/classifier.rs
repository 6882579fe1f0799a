use crate::model::{Candidate, Finding, ScanResult};
use crate::rules::grade::calculate_grade;
use crate::rules::scoring::calculate_risk_score;
use crate::rules::{HeuristicContext, Rule, UrlView};
use lure_config::Config;

/// Applies an ordered rule set to single candidates.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<Rule>,
    ctx: HeuristicContext,
}

impl Classifier {
    pub fn new(rules: Vec<Rule>, ctx: HeuristicContext) -> Self {
        Self { rules, ctx }
    }

    pub fn from_config(config: &Config, rules: Vec<Rule>) -> Self {
        Self::new(rules, HeuristicContext::from_config(&config.heuristics))
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Every finding that fires for `candidate`, in rule order. Empty means clean.
    pub fn classify(&self, candidate: &Candidate, document_scheme: Option<&str>) -> Vec<Finding> {
        let view = UrlView::new(candidate, document_scheme);
        self.rules
            .iter()
            .filter_map(|rule| rule.evaluate(&view, &self.ctx))
            .collect()
    }

    pub fn scan(&self, candidate: &Candidate, document_scheme: Option<&str>) -> ScanResult {
        let findings = self.classify(candidate, document_scheme);
        let score = calculate_risk_score(&findings);
        ScanResult {
            url: candidate.url.clone(),
            kind: candidate.kind,
            findings,
            score,
            grade: calculate_grade(score),
        }
    }
}
