use anyhow::Result;
use lure_core::{Report, ScanResult};

pub mod html;
pub mod json;
pub mod markdown;
pub mod text;

pub use html::HtmlFormatter;
pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub only_suspicious: bool,
}

impl RenderOptions {
    pub fn visible<'a>(&self, report: &'a Report) -> Vec<&'a ScanResult> {
        report
            .results
            .iter()
            .filter(|r| !self.only_suspicious || !r.is_clean())
            .collect()
    }
}

pub trait Formatter {
    fn render(&self, report: &Report, options: &RenderOptions) -> Result<String>;

    fn print(&self, report: &Report, options: &RenderOptions) -> Result<()> {
        println!("{}", self.render(report, options)?);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Format {
    Text,
    Json,
    Html,
    Markdown,
}

impl From<&str> for Format {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Format::Json,
            "html" => Format::Html,
            "md" | "markdown" => Format::Markdown,
            _ => Format::Text,
        }
    }
}

impl Format {
    pub fn formatter(self) -> Box<dyn Formatter> {
        match self {
            Format::Text => Box::new(TextFormatter),
            Format::Json => Box::new(JsonFormatter),
            Format::Html => Box::new(HtmlFormatter),
            Format::Markdown => Box::new(MarkdownFormatter),
        }
    }
}
