use crate::formatters::{Formatter, RenderOptions};
use anyhow::Result;
use lure_core::Report;

/// Renders the results overlay panel shown over the scanned page.
pub struct HtmlFormatter;

impl Formatter for HtmlFormatter {
    fn render(&self, report: &Report, options: &RenderOptions) -> Result<String> {
        let flagged: Vec<_> = report.suspicious().collect();

        let body = if flagged.is_empty() {
            "<p>✅ No suspicious links or images found.</p>".to_string()
        } else {
            let items = flagged
                .iter()
                .map(|r| {
                    let findings = r
                        .findings
                        .iter()
                        .map(|f| html_escape(&f.message))
                        .collect::<Vec<_>>()
                        .join(", ");
                    format!(
                        r#"<li><b>{}</b><br><span style="color:#f66">{}</span></li>"#,
                        html_escape(&r.url),
                        findings
                    )
                })
                .collect::<String>();
            format!("<ul>{}</ul>", items)
        };

        let clean = if options.only_suspicious {
            String::new()
        } else {
            let count = report.results.len() - flagged.len();
            format!(r#"<p style="color:#6f6">{} clean</p>"#, count)
        };

        Ok(format!(
            r#"<div id="scan-overlay" style="position:fixed;top:20px;right:20px;z-index:999999;">
  <div style="background:#111;color:white;padding:15px;border-radius:10px;max-width:400px;max-height:60vh;overflow:auto;box-shadow:0 0 15px rgba(0,0,0,0.4);">
    <h3>🔎 Advanced Scan Results</h3>
    {}{}
    <button id="closeOverlay" onclick="document.getElementById('scan-overlay').remove()" style="background:#333;color:white;padding:6px 10px;border:none;border-radius:5px;margin-top:10px;cursor:pointer;">Close</button>
  </div>
</div>"#,
            body, clean
        ))
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatters::fixtures::sample_report;

    #[test]
    fn test_overlay_lists_flagged_urls_escaped() {
        let out = HtmlFormatter
            .render(&sample_report(), &RenderOptions::default())
            .unwrap();
        assert!(out.contains(r#"id="scan-overlay""#));
        assert!(out.contains("<b>http://secure-login.tk/a?x=&lt;b&gt;|</b>"));
        assert!(out.contains("Contains suspicious keyword (login, secure), Untrusted TLD: .tk"));
        assert!(!out.contains("https://docs.rs/"));
        assert!(out.contains("1 clean"));
    }

    #[test]
    fn test_overlay_without_findings() {
        let out = HtmlFormatter
            .render(&Report::default(), &RenderOptions::default())
            .unwrap();
        assert!(out.contains("No suspicious links or images found."));
    }
}
