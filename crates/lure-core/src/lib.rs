pub mod classifier;
pub mod entropy;
pub mod error;
pub mod model;
pub mod page;
pub mod report;
pub mod rules;
pub mod scanner;

pub use classifier::Classifier;
pub use entropy::shannon_entropy;
pub use error::ScanError;
pub use model::{Candidate, ElementKind, Finding, ScanResult, Severity};
pub use page::{capture_candidate, Marking, PageElement, PageSource};
pub use report::{ChannelSink, Report, ReportSink, ReportSummary};
pub use rules::builtin::{get_all_rules, get_default_rules};
pub use rules::grade::{calculate_grade, Grade};
pub use rules::{HeuristicContext, Rule, RuleCheck, UrlView};
pub use scanner::{
    RecordingSleeper, ScanCommand, ScanController, ScanHandle, ScanState, ScanStatus, Sleeper,
    TokioSleeper,
};
