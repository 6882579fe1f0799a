use crate::formatters::{Formatter, RenderOptions};
use anyhow::Result;
use colored::Colorize;
use lure_core::{Grade, Report};
use std::fmt::Write;

pub struct TextFormatter;

fn grade_label(grade: Grade) -> colored::ColoredString {
    let label = format!("{:<8}", grade.to_string());
    match grade {
        Grade::Critical => label.red().bold(),
        Grade::High => label.red(),
        Grade::Medium => label.yellow(),
        Grade::Low => label.blue(),
        Grade::Safe => label.green(),
    }
}

impl Formatter for TextFormatter {
    fn render(&self, report: &Report, options: &RenderOptions) -> Result<String> {
        let summary = report.summary();
        let mut out = String::new();

        writeln!(
            out,
            "{} (session {})",
            "🔎 Advanced Scan Results".bold(),
            report.session
        )?;

        let visible = options.visible(report);
        if summary.suspicious == 0 {
            writeln!(out, "{}", "✅ No suspicious links or images found.".green())?;
        }

        for result in visible {
            writeln!(
                out,
                "{} {:>3}  {} ({})",
                grade_label(result.grade),
                result.score,
                result.url,
                result.kind
            )?;
            for finding in &result.findings {
                writeln!(
                    out,
                    "           - {} {}",
                    finding.message,
                    format!("[{}]", finding.rule_id).dimmed()
                )?;
            }
        }

        write!(
            out,
            "\n{} candidates, {} classified, {} skipped, {} suspicious, {} clean ({}ms)",
            summary.total_candidates,
            summary.classified,
            summary.skipped,
            summary.suspicious.to_string().red().bold(),
            summary.clean.to_string().green(),
            report.duration_ms
        )?;

        Ok(out)
    }
}
