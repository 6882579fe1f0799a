//! Boundary between the scan engine and whatever hosts the page.

use crate::model::{Candidate, ElementKind, Finding};
use std::sync::Arc;

/// Visual verdict applied to an element once it has been classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marking {
    Suspicious { findings: Vec<Finding> },
    Clean,
}

impl Marking {
    pub fn for_findings(findings: &[Finding]) -> Self {
        if findings.is_empty() {
            Marking::Clean
        } else {
            Marking::Suspicious {
                findings: findings.to_vec(),
            }
        }
    }

    pub fn is_suspicious(&self) -> bool {
        matches!(self, Marking::Suspicious { .. })
    }

    /// CSS border the host draws around the element.
    pub fn border_style(&self) -> &'static str {
        match self {
            Marking::Suspicious { .. } => "3px solid red",
            Marking::Clean => "2px solid green",
        }
    }

    pub fn tooltip(&self) -> String {
        match self {
            Marking::Suspicious { findings } => {
                let lines: Vec<String> = findings.iter().map(|f| f.to_string()).collect();
                format!("⚠️ Suspicious:\n{}", lines.join("\n"))
            }
            Marking::Clean => "✅ Clean".to_string(),
        }
    }
}

/// A link or image living in the host document.
pub trait PageElement: Send + Sync {
    fn kind(&self) -> ElementKind;

    /// Raw attribute value, `None` when the attribute is missing.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Rendered text content (links only).
    fn text(&self) -> Option<String>;

    fn mark(&self, marking: &Marking);
}

/// Captures the candidate snapshot for a session.
pub trait PageSource: Send + Sync {
    /// Scheme of the document being scanned, e.g. `"https"`.
    fn document_scheme(&self) -> Option<String>;

    /// Candidate elements in document order.
    fn snapshot(&self) -> Vec<Arc<dyn PageElement>>;
}

/// Reads the element's URL attribute; empty values count as absent.
pub fn capture_candidate(element: &dyn PageElement) -> Option<Candidate> {
    let kind = element.kind();
    let url = element
        .attribute(kind.url_attribute())
        .filter(|u| !u.trim().is_empty())?;
    let text = match kind {
        ElementKind::Link => element.text(),
        ElementKind::Image => None,
    };
    Some(Candidate { kind, url, text })
}
