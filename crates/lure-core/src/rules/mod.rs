pub mod builtin;
pub mod grade;
pub mod scoring;
pub mod url_view;

use crate::model::{Finding, Severity};
use regex::Regex;
use std::fmt;
pub use url_view::{HeuristicContext, UrlView};

/// Inspects one aspect of a candidate; `Some(message)` when it fires.
pub type HeuristicFn = fn(&UrlView<'_>, &HeuristicContext) -> Option<String>;

#[derive(Clone)]
pub enum RuleCheck {
    Heuristic(HeuristicFn),
    /// User-defined regex over the raw URL; the rule description is the message.
    Pattern(Regex),
}

#[derive(Clone)]
pub struct Rule {
    pub id: String,
    pub description: String,
    pub severity: Severity,
    /// Score contributed to the candidate's risk score when the rule fires.
    pub score: u32,
    pub category: String,
    pub check: RuleCheck,
}

impl Rule {
    pub fn evaluate(&self, view: &UrlView<'_>, ctx: &HeuristicContext) -> Option<Finding> {
        let message = match &self.check {
            RuleCheck::Heuristic(check) => check(view, ctx)?,
            RuleCheck::Pattern(pattern) => {
                if !pattern.is_match(view.raw) {
                    return None;
                }
                self.description.clone()
            }
        };

        Some(Finding {
            rule_id: self.id.clone(),
            message,
            severity: self.severity.clone(),
            score: self.score,
        })
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.check, RuleCheck::Heuristic(_))
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("description", &self.description)
            .field("severity", &self.severity)
            .field("score", &self.score)
            .field("category", &self.category)
            .field(
                "check",
                &match &self.check {
                    RuleCheck::Heuristic(_) => "Heuristic(fn)".to_string(),
                    RuleCheck::Pattern(p) => format!("Pattern({})", p.as_str()),
                },
            )
            .finish()
    }
}
