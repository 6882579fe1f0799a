use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("scan controller is no longer running")]
    ControllerClosed,

    #[error("rule '{rule_id}' has invalid pattern: {source}")]
    InvalidPattern {
        rule_id: String,
        #[source]
        source: regex::Error,
    },
}
