use crate::entropy::shannon_entropy;
use crate::error::ScanError;
use crate::model::{ElementKind, Severity};
use crate::rules::scoring::calculate_base_score;
use crate::rules::{HeuristicContext, Rule, RuleCheck, UrlView};
use lure_config::Config;
use regex::Regex;
use std::sync::OnceLock;

pub const RULE_ID_KEYWORD: &str = "url.keyword";
pub const RULE_ID_TLD: &str = "url.tld";
pub const RULE_ID_ENTROPY: &str = "url.entropy";
pub const RULE_ID_ANCHOR_MISMATCH: &str = "anchor.mismatch";
pub const RULE_ID_MIXED_CONTENT: &str = "transport.mixed_content";
pub const RULE_ID_DATA_URI: &str = "scheme.data_uri";

static DEFAULT_RULES: OnceLock<Vec<Rule>> = OnceLock::new();

/// The built-in heuristics in evaluation order.
pub fn get_default_rules() -> Vec<Rule> {
    DEFAULT_RULES
        .get_or_init(|| {
            vec![
                Rule {
                    id: RULE_ID_KEYWORD.to_string(),
                    description: "URL contains risk vocabulary (login, verify, bank, ...)"
                        .to_string(),
                    severity: Severity::Medium,
                    score: 30,
                    category: "lexical".to_string(),
                    check: RuleCheck::Heuristic(check_keyword),
                },
                Rule {
                    id: RULE_ID_TLD.to_string(),
                    description: "Host ends in a low-trust top-level domain".to_string(),
                    severity: Severity::Medium,
                    score: 35,
                    category: "domain".to_string(),
                    check: RuleCheck::Heuristic(check_tld),
                },
                Rule {
                    id: RULE_ID_ENTROPY.to_string(),
                    description: "URL path looks randomly generated (high Shannon entropy)"
                        .to_string(),
                    severity: Severity::Medium,
                    score: 25,
                    category: "lexical".to_string(),
                    check: RuleCheck::Heuristic(check_entropy),
                },
                Rule {
                    id: RULE_ID_ANCHOR_MISMATCH.to_string(),
                    description: "Visible link text does not appear in the link target"
                        .to_string(),
                    severity: Severity::High,
                    score: 50,
                    category: "deception".to_string(),
                    check: RuleCheck::Heuristic(check_anchor_mismatch),
                },
                Rule {
                    id: RULE_ID_MIXED_CONTENT.to_string(),
                    description: "Plain HTTP resource referenced from an HTTPS document"
                        .to_string(),
                    severity: Severity::Low,
                    score: 15,
                    category: "transport".to_string(),
                    check: RuleCheck::Heuristic(check_mixed_content),
                },
                Rule {
                    id: RULE_ID_DATA_URI.to_string(),
                    description: "Inline data: URL can hide a payload from network inspection"
                        .to_string(),
                    severity: Severity::High,
                    score: 45,
                    category: "scheme".to_string(),
                    check: RuleCheck::Heuristic(check_data_uri),
                },
            ]
        })
        .clone()
}

/// Built-in rules with config overrides applied, followed by user pattern rules.
///
/// Disabled rules are dropped entirely. Pattern rules are ordered by id so the
/// finding order stays stable across runs.
pub fn get_all_rules(config: &Config) -> Result<Vec<Rule>, ScanError> {
    let mut rules: Vec<Rule> = get_default_rules()
        .into_iter()
        .filter(|rule| config.rule_enabled(&rule.id))
        .map(|mut rule| {
            if let Some(rule_config) = config.rules.get(&rule.id) {
                apply_overrides(&mut rule, rule_config);
            }
            rule
        })
        .collect();

    let mut custom: Vec<_> = config
        .rules
        .iter()
        .filter(|(id, rc)| rc.enabled && rc.pattern.is_some() && !is_builtin_id(id))
        .collect();
    custom.sort_by(|a, b| a.0.cmp(b.0));

    for (id, rule_config) in custom {
        let Some(pattern) = rule_config.pattern.as_deref() else {
            continue;
        };
        let regex = Regex::new(pattern).map_err(|source| ScanError::InvalidPattern {
            rule_id: id.clone(),
            source,
        })?;

        let mut rule = Rule {
            id: id.clone(),
            description: format!("Matches custom pattern '{}'", pattern),
            severity: Severity::Medium,
            score: calculate_base_score(&Severity::Medium),
            category: "custom".to_string(),
            check: RuleCheck::Pattern(regex),
        };
        apply_overrides(&mut rule, rule_config);
        rules.push(rule);
    }

    Ok(rules)
}

fn is_builtin_id(id: &str) -> bool {
    matches!(
        id,
        RULE_ID_KEYWORD
            | RULE_ID_TLD
            | RULE_ID_ENTROPY
            | RULE_ID_ANCHOR_MISMATCH
            | RULE_ID_MIXED_CONTENT
            | RULE_ID_DATA_URI
    )
}

fn apply_overrides(rule: &mut Rule, rule_config: &lure_config::RuleConfig) {
    if let Some(severity) = rule_config.severity.as_deref() {
        rule.severity = Severity::from(severity);
        rule.score = calculate_base_score(&rule.severity);
    }
    if let Some(score) = rule_config.score {
        rule.score = score;
    }
    if let Some(category) = &rule_config.category {
        rule.category = category.clone();
    }
    if let Some(description) = &rule_config.description {
        rule.description = description.clone();
    }
}

fn check_keyword(view: &UrlView<'_>, ctx: &HeuristicContext) -> Option<String> {
    let matched: Vec<&str> = ctx
        .keywords
        .iter()
        .filter(|k| view.lower.contains(k.as_str()))
        .map(|k| k.as_str())
        .collect();

    if matched.is_empty() {
        return None;
    }
    Some(format!(
        "Contains suspicious keyword ({})",
        matched.join(", ")
    ))
}

fn check_tld(view: &UrlView<'_>, ctx: &HeuristicContext) -> Option<String> {
    let tld = view.top_level_label()?;
    if ctx.low_trust_tlds.contains(tld) {
        Some(format!("Untrusted TLD: .{}", tld))
    } else {
        None
    }
}

fn check_entropy(view: &UrlView<'_>, ctx: &HeuristicContext) -> Option<String> {
    let entropy = shannon_entropy(&view.path);
    if entropy > ctx.entropy_threshold {
        Some(format!("High URL entropy ({:.2})", entropy))
    } else {
        None
    }
}

fn check_anchor_mismatch(view: &UrlView<'_>, _ctx: &HeuristicContext) -> Option<String> {
    if view.kind != ElementKind::Link {
        return None;
    }
    let text = view.text.filter(|t| !t.is_empty())?.to_lowercase();

    if text.chars().any(char::is_alphabetic) && !view.lower.contains(&text) {
        Some("Displayed text doesn't match link domain".to_string())
    } else {
        None
    }
}

fn check_mixed_content(view: &UrlView<'_>, _ctx: &HeuristicContext) -> Option<String> {
    if view.lower.starts_with("http://") && view.document_scheme.as_deref() == Some("https") {
        Some("Mixed-content risk (HTTP on HTTPS site)".to_string())
    } else {
        None
    }
}

fn check_data_uri(view: &UrlView<'_>, _ctx: &HeuristicContext) -> Option<String> {
    if view.lower.starts_with("data:") {
        Some("Data URL detected (may hide malicious payload)".to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Candidate;
    use lure_config::RuleConfig;

    fn fire(rule_id: &str, candidate: &Candidate, document_scheme: Option<&str>) -> Option<String> {
        let rule = get_default_rules()
            .into_iter()
            .find(|r| r.id == rule_id)
            .unwrap();
        let view = UrlView::new(candidate, document_scheme);
        rule.evaluate(&view, &HeuristicContext::default())
            .map(|f| f.message)
    }

    #[test]
    fn test_builtin_order_is_fixed() {
        let ids: Vec<_> = get_default_rules().into_iter().map(|r| r.id).collect();
        assert_eq!(
            ids,
            vec![
                RULE_ID_KEYWORD,
                RULE_ID_TLD,
                RULE_ID_ENTROPY,
                RULE_ID_ANCHOR_MISMATCH,
                RULE_ID_MIXED_CONTENT,
                RULE_ID_DATA_URI
            ]
        );
    }

    #[test]
    fn test_keyword_is_case_insensitive_substring() {
        let c = Candidate::image("https://example.com/LoginPortal");
        assert_eq!(
            fire(RULE_ID_KEYWORD, &c, None).as_deref(),
            Some("Contains suspicious keyword (login)")
        );

        let c = Candidate::image("https://example.com/about");
        assert_eq!(fire(RULE_ID_KEYWORD, &c, None), None);
    }

    #[test]
    fn test_tld_membership() {
        let c = Candidate::image("http://free-prizes.XYZ/");
        assert_eq!(
            fire(RULE_ID_TLD, &c, None).as_deref(),
            Some("Untrusted TLD: .xyz")
        );

        let c = Candidate::image("https://tk.example.com/");
        assert_eq!(fire(RULE_ID_TLD, &c, None), None);
    }

    #[test]
    fn test_tld_on_malformed_url_never_fires() {
        for raw in ["evil.tk", "::::evil.tk", "http://[bad/evil.tk"] {
            let c = Candidate::image(raw);
            assert_eq!(fire(RULE_ID_TLD, &c, None), None, "{}", raw);
        }
    }

    #[test]
    fn test_entropy_threshold() {
        // 16 distinct symbols => exactly 4.0 bits, not above the threshold
        let c = Candidate::image("https://a.com/0123456789abcdef");
        assert_eq!(fire(RULE_ID_ENTROPY, &c, None), None);

        let c = Candidate::image("https://a.com/0123456789abcdefg");
        let message = fire(RULE_ID_ENTROPY, &c, None).unwrap();
        assert!(message.starts_with("High URL entropy (4.09"), "{}", message);
    }

    #[test]
    fn test_anchor_mismatch() {
        let c = Candidate::link("https://evil.example/signin", "PayPal");
        assert!(fire(RULE_ID_ANCHOR_MISMATCH, &c, None).is_some());

        let c = Candidate::link("https://www.paypal.com/signin", "PayPal");
        assert_eq!(fire(RULE_ID_ANCHOR_MISMATCH, &c, None), None);

        let c = Candidate::link("https://evil.example/", "12345");
        assert_eq!(fire(RULE_ID_ANCHOR_MISMATCH, &c, None), None);

        let c = Candidate::link("https://evil.example/", "");
        assert_eq!(fire(RULE_ID_ANCHOR_MISMATCH, &c, None), None);
    }

    #[test]
    fn test_anchor_mismatch_ignores_images() {
        let c = Candidate {
            kind: ElementKind::Image,
            url: "https://evil.example/".to_string(),
            text: Some("PayPal".to_string()),
        };
        assert_eq!(fire(RULE_ID_ANCHOR_MISMATCH, &c, None), None);
    }

    #[test]
    fn test_mixed_content_needs_https_document() {
        let c = Candidate::image("http://cdn.example.com/a.png");
        assert!(fire(RULE_ID_MIXED_CONTENT, &c, Some("https")).is_some());
        assert_eq!(fire(RULE_ID_MIXED_CONTENT, &c, Some("http")), None);
        assert_eq!(fire(RULE_ID_MIXED_CONTENT, &c, None), None);

        let c = Candidate::image("https://cdn.example.com/a.png");
        assert_eq!(fire(RULE_ID_MIXED_CONTENT, &c, Some("https")), None);
    }

    #[test]
    fn test_data_uri() {
        let c = Candidate::image("DATA:text/html;base64,PHNjcmlwdD4=");
        assert!(fire(RULE_ID_DATA_URI, &c, None).is_some());
    }

    #[test]
    fn test_disabled_rule_is_dropped() {
        let mut config = Config::default();
        config.rules.insert(
            RULE_ID_DATA_URI.to_string(),
            RuleConfig {
                enabled: false,
                ..Default::default()
            },
        );
        let rules = get_all_rules(&config).unwrap();
        assert_eq!(rules.len(), 5);
        assert!(rules.iter().all(|r| r.id != RULE_ID_DATA_URI));
    }

    #[test]
    fn test_severity_override_rescores() {
        let mut config = Config::default();
        config.rules.insert(
            RULE_ID_TLD.to_string(),
            RuleConfig {
                severity: Some("critical".to_string()),
                ..Default::default()
            },
        );
        let rules = get_all_rules(&config).unwrap();
        let tld = rules.iter().find(|r| r.id == RULE_ID_TLD).unwrap();
        assert_eq!(tld.severity, Severity::Critical);
        assert_eq!(tld.score, 90);
    }

    #[test]
    fn test_custom_pattern_rules_follow_builtins() {
        let mut config = Config::default();
        config.rules.insert(
            "custom.ip_host".to_string(),
            RuleConfig {
                pattern: Some(r"^https?://\d+\.\d+\.\d+\.\d+".to_string()),
                description: Some("Raw IP address host".to_string()),
                ..Default::default()
            },
        );
        let rules = get_all_rules(&config).unwrap();
        assert_eq!(rules.len(), 7);
        let last = rules.last().unwrap();
        assert_eq!(last.id, "custom.ip_host");
        assert!(!last.is_builtin());

        let c = Candidate::image("http://10.0.0.1/a.png");
        let finding = last
            .evaluate(&UrlView::new(&c, None), &HeuristicContext::default())
            .unwrap();
        assert_eq!(finding.message, "Raw IP address host");
    }

    #[test]
    fn test_invalid_custom_pattern_is_an_error() {
        let mut config = Config::default();
        config.rules.insert(
            "custom.broken".to_string(),
            RuleConfig {
                pattern: Some("(".to_string()),
                ..Default::default()
            },
        );
        let err = get_all_rules(&config).unwrap_err();
        assert!(err.to_string().contains("custom.broken"));
    }
}
