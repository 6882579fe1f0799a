use crate::config_loader::load_effective_config;
use anyhow::{bail, Result};
use colored::Colorize;
use lure_core::{get_all_rules, Rule, RuleCheck, Severity};
use prettytable::{format, Cell, Row, Table};
use std::path::PathBuf;

fn load_rules(config_path: Option<&PathBuf>) -> Result<Vec<Rule>> {
    let config = load_effective_config(config_path)?;
    Ok(get_all_rules(&config)?)
}

fn check_kind(rule: &Rule) -> &'static str {
    match rule.check {
        RuleCheck::Heuristic(_) => "heuristic",
        RuleCheck::Pattern(_) => "pattern",
    }
}

/// Prints the active rule set in evaluation order, which is also finding order.
pub fn list(config_path: Option<&PathBuf>, severity_filter: Option<Severity>) -> Result<()> {
    let rules = load_rules(config_path)?;

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
    table.set_titles(Row::new(
        ["#", "ID", "Severity", "Score", "Category", "Check", "Description"]
            .iter()
            .map(|title| Cell::new(title).style_spec("b"))
            .collect(),
    ));

    for (position, rule) in rules.iter().enumerate() {
        if severity_filter.as_ref().is_some_and(|min| rule.severity < *min) {
            continue;
        }
        table.add_row(Row::new(vec![
            Cell::new(&(position + 1).to_string()),
            Cell::new(&rule.id),
            Cell::new(&rule.severity.to_string()),
            Cell::new(&rule.score.to_string()),
            Cell::new(&rule.category),
            Cell::new(check_kind(rule)),
            Cell::new(&rule.description),
        ]));
    }

    table.printstd();
    Ok(())
}

pub fn explain(config_path: Option<&PathBuf>, rule_id: &str) -> Result<()> {
    let rules = load_rules(config_path)?;
    let total = rules.len();

    let Some((position, rule)) = rules.iter().enumerate().find(|(_, r)| r.id == rule_id) else {
        bail!("Rule not found: {}", rule_id);
    };

    println!("{} {}", rule.id.bold(), format!("({})", rule.category).dimmed());
    println!("  {}", rule.description);
    println!();
    println!("  Severity:   {}", rule.severity);
    println!("  Score:      {} (added to the candidate's risk score, capped at 100)", rule.score);
    println!("  Evaluated:  {} of {}", position + 1, total);
    match &rule.check {
        RuleCheck::Heuristic(_) => println!("  Check:      built-in heuristic"),
        RuleCheck::Pattern(pattern) => {
            println!("  Check:      pattern over the raw URL");
            println!("  Pattern:    {}", pattern.as_str());
        }
    }

    Ok(())
}
