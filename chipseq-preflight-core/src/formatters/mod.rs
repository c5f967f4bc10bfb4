//! Output formatters for preflight reports
//!
//! - [`HumanFormatter`]: the sectioned console report, optionally coloured
//! - [`JsonFormatter`]: the full report as one JSON document
//! - [`JsonLinesFormatter`]: one diagnostic per line plus a closing summary line

pub mod human;
pub mod json;

use std::{
    fmt,
    str::FromStr,
};

pub use human::HumanFormatter;
pub use json::{
    JsonFormatter,
    JsonLinesFormatter,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    error::PreflightResult,
    report::PreflightReport,
};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Human-readable sectioned report (default)
    #[default]
    Human,
    /// Pretty-printed JSON document
    Json,
    /// JSON Lines for streaming consumers
    JsonLines,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Human => write!(f, "human"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::JsonLines => write!(f, "json-lines"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            "json-lines" | "jsonl" => Ok(OutputFormat::JsonLines),
            other => Err(format!(
                "Invalid output format: {}. Valid values: human, json, json-lines",
                other
            )),
        }
    }
}

/// Renders a report to text
pub trait OutputFormatter {
    /// Render the whole report
    fn format_report(&self, report: &PreflightReport) -> PreflightResult<String>;
}

/// Creates the formatter for an output format
pub struct FormatterFactory;

impl FormatterFactory {
    /// Formatter for `format`; `colored` only affects human output
    pub fn create(format: OutputFormat, colored: bool) -> Box<dyn OutputFormatter> {
        match format {
            OutputFormat::Human => Box::new(HumanFormatter::new(colored)),
            OutputFormat::Json => Box::new(JsonFormatter),
            OutputFormat::JsonLines => Box::new(JsonLinesFormatter),
        }
    }
}
