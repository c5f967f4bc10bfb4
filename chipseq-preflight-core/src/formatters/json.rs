//! JSON and JSON Lines output

use serde::Serialize;

use super::OutputFormatter;
use crate::{
    diagnostics::DiagnosticSummary,
    error::PreflightResult,
    report::{
        Outcome,
        PreflightReport,
    },
};

/// Full report as one pretty-printed JSON document
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonDocument<'a> {
    version: &'static str,
    valid:   bool,
    summary: DiagnosticSummary,
    #[serde(flatten)]
    report:  &'a PreflightReport,
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &PreflightReport) -> PreflightResult<String> {
        let document = JsonDocument {
            version: crate::VERSION,
            valid: report.is_valid(),
            summary: report.summary(),
            report,
        };
        let mut out = serde_json::to_string_pretty(&document)?;
        out.push('\n');
        Ok(out)
    }
}

/// One diagnostic per line, closed by a summary line
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLinesFormatter;

#[derive(Serialize)]
struct SummaryLine<'a> {
    outcome: &'a Outcome,
    valid:   bool,
    summary: DiagnosticSummary,
}

impl OutputFormatter for JsonLinesFormatter {
    fn format_report(&self, report: &PreflightReport) -> PreflightResult<String> {
        let mut out = String::new();
        for diagnostic in report.diagnostics.all() {
            out.push_str(&serde_json::to_string(diagnostic)?);
            out.push('\n');
        }

        let summary = SummaryLine {
            outcome: &report.outcome,
            valid:   report.is_valid(),
            summary: report.summary(),
        };
        out.push_str(&serde_json::to_string(&summary)?);
        out.push('\n');
        Ok(out)
    }
}
