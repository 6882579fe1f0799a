use crate::formatters::{Formatter, RenderOptions};
use anyhow::Result;
use lure_core::{Report, ReportSummary, ScanResult};
use serde::Serialize;

pub struct JsonFormatter;

const SCHEMA_VERSION: &str = "lure-v1";

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(rename = "schemaVersion")]
    schema_version: &'a str,
    session: u64,
    #[serde(rename = "durationMs")]
    duration_ms: u128,
    summary: ReportSummary,
    results: Vec<&'a ScanResult>,
}

impl Formatter for JsonFormatter {
    fn render(&self, report: &Report, options: &RenderOptions) -> Result<String> {
        let json = JsonReport {
            schema_version: SCHEMA_VERSION,
            session: report.session,
            duration_ms: report.duration_ms,
            summary: report.summary(),
            results: options.visible(report),
        };
        Ok(serde_json::to_string_pretty(&json)?)
    }
}
