use crate::model::{ScanResult, Severity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tokio::sync::mpsc;

/// Ordered results of one completed scan session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Report {
    pub session: u64,
    pub results: Vec<ScanResult>,
    /// Size of the captured snapshot, including skipped elements.
    pub total_candidates: usize,
    /// Elements without a URL attribute.
    pub skipped: usize,
    pub duration_ms: u128,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub total_candidates: usize,
    pub classified: usize,
    pub skipped: usize,
    pub suspicious: usize,
    pub clean: usize,
    pub max_score: u32,
    pub severity_counts: BTreeMap<Severity, usize>,
}

impl Report {
    pub fn suspicious(&self) -> impl Iterator<Item = &ScanResult> {
        self.results.iter().filter(|r| !r.is_clean())
    }

    pub fn summary(&self) -> ReportSummary {
        let mut severity_counts = BTreeMap::new();
        for finding in self.results.iter().flat_map(|r| r.findings.iter()) {
            *severity_counts.entry(finding.severity.clone()).or_insert(0) += 1;
        }

        let suspicious = self.suspicious().count();
        ReportSummary {
            total_candidates: self.total_candidates,
            classified: self.results.len(),
            skipped: self.skipped,
            suspicious,
            clean: self.results.len() - suspicious,
            max_score: self.results.iter().map(|r| r.score).max().unwrap_or(0),
            severity_counts,
        }
    }
}

/// Receives the finished report, once per completed session.
pub trait ReportSink: Send + Sync {
    fn deliver(&self, report: Report);
}

/// Forwards reports into an unbounded channel.
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Report>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Report>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl ReportSink for ChannelSink {
    fn deliver(&self, report: Report) {
        if self.tx.send(report).is_err() {
            tracing::warn!("report receiver dropped, discarding report");
        }
    }
}
