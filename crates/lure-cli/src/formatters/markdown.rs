use crate::formatters::{Formatter, RenderOptions};
use anyhow::Result;
use lure_core::Report;
use std::fmt::Write;

pub struct MarkdownFormatter;

impl Formatter for MarkdownFormatter {
    fn render(&self, report: &Report, options: &RenderOptions) -> Result<String> {
        let summary = report.summary();
        let mut out = String::new();

        writeln!(out, "# Lure Scan Report")?;
        writeln!(out, "\n## Summary")?;
        writeln!(out, "- **Candidates**: {}", summary.total_candidates)?;
        writeln!(out, "- **Classified**: {}", summary.classified)?;
        writeln!(out, "- **Skipped (no URL)**: {}", summary.skipped)?;
        writeln!(out, "- **Suspicious**: {}", summary.suspicious)?;
        writeln!(out, "- **Duration**: {}ms", report.duration_ms)?;

        let visible = options.visible(report);
        if summary.suspicious == 0 && visible.is_empty() {
            write!(out, "\n✅ No suspicious links or images found.")?;
            return Ok(out);
        }

        writeln!(out, "\n## Results")?;
        writeln!(out, "| Grade | Score | Kind | URL | Findings |")?;
        write!(out, "|---|---|---|---|---|")?;

        for result in visible {
            let findings = if result.is_clean() {
                "Clean".to_string()
            } else {
                result
                    .findings
                    .iter()
                    .map(|f| f.message.clone())
                    .collect::<Vec<_>>()
                    .join("<br>")
            };
            // Escape pipe chars to prevent breaking md table
            write!(
                out,
                "\n| {} | {} | {} | `{}` | {} |",
                result.grade,
                result.score,
                result.kind,
                result.url.replace('|', "\\|"),
                findings.replace('|', "\\|")
            )?;
        }

        Ok(out)
    }
}
