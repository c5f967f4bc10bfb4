//! Human-readable console report

use std::fmt::Write;

use colored::Colorize;

use super::OutputFormatter;
use crate::{
    error::PreflightResult,
    report::{
        EnvironmentListing,
        Outcome,
        PreflightReport,
        Stage,
    },
};

const WIDTH: usize = 80;

/// Status marker in front of a report line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Pass,
    Fail,
    Warn,
    Pending,
}

impl Marker {
    fn symbol(self) -> &'static str {
        match self {
            Marker::Pass => "✓",
            Marker::Fail => "✗",
            Marker::Warn => "⚠",
            Marker::Pending => "○",
        }
    }

    fn paint(self, colored: bool) -> String {
        if !colored {
            return self.symbol().to_string();
        }
        match self {
            Marker::Pass => self.symbol().bright_green().to_string(),
            Marker::Fail => self.symbol().bright_red().to_string(),
            Marker::Warn => self.symbol().bright_yellow().to_string(),
            Marker::Pending => self.symbol().dimmed().to_string(),
        }
    }
}

/// Sectioned console report
#[derive(Debug, Clone, Default)]
pub struct HumanFormatter {
    colored: bool,
}

impl HumanFormatter {
    /// Create a formatter, with or without ANSI colours
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    fn mark(&self, marker: Marker) -> String {
        marker.paint(self.colored)
    }

    fn heading(&self, out: &mut String, title: &str) {
        let title = if self.colored { title.bold().to_string() } else { title.to_string() };
        let _ = writeln!(out, "{}", title);
        let _ = writeln!(out, "{}", "-".repeat(WIDTH));
    }

    fn files(&self, out: &mut String, report: &PreflightReport) -> bool {
        self.heading(out, "FILE EXISTENCE CHECK");
        for file in &report.files {
            let marker = if file.exists { Marker::Pass } else { Marker::Fail };
            let _ = writeln!(
                out,
                "  {} {}: {}",
                self.mark(marker),
                file.label,
                file.path.display()
            );
        }
        out.push('\n');

        if report.aborted_at() == Some(Stage::Files) {
            let _ = writeln!(out, "{}", self.error_line("Some required files are missing!"));
            return false;
        }
        true
    }

    fn config(&self, out: &mut String, report: &PreflightReport) -> bool {
        self.heading(out, "CONFIGURATION CONTENT");

        if let Outcome::Aborted {
            stage: Stage::Config,
            reason,
        } = &report.outcome
        {
            let message = format!("Failed to load {}: {}", report.config_file, reason);
            let _ = writeln!(out, "{}", self.error_line(&message));
            return false;
        }

        let _ = writeln!(out, "Configuration loaded successfully:");
        out.push('\n');
        for entry in report.config.iter().flatten() {
            let _ = writeln!(out, "  {}: {}", entry.key, entry.value);
        }
        out.push('\n');

        self.heading(out, "CONFIGURATION VALIDATION");
        for check in &report.required_keys {
            match &check.value {
                Some(value) => {
                    let _ = writeln!(out, "  {} {}: {}", self.mark(Marker::Pass), check.key, value);
                },
                None => {
                    let _ = writeln!(
                        out,
                        "  {} Missing required parameter: {}",
                        self.mark(Marker::Fail),
                        check.key
                    );
                },
            }
        }
        out.push('\n');
        true
    }

    fn accessions(&self, out: &mut String, report: &PreflightReport) -> bool {
        self.heading(out, "SRR ACCESSION LIST VALIDATION");

        if let Outcome::Aborted {
            stage: Stage::Accessions,
            reason,
        } = &report.outcome
        {
            let _ = writeln!(
                out,
                "  {} Failed to load SRR list: {}",
                self.mark(Marker::Fail),
                reason
            );
            return false;
        }

        let pass = self.mark(Marker::Pass);
        if let Some(summary) = &report.accessions {
            let _ = writeln!(out, "  {} SRR list loaded successfully", pass);
            let _ = writeln!(out, "  {} Total samples: {}", pass, summary.total);
            match (&summary.first, &summary.last) {
                (Some(first), Some(last)) => {
                    let _ = writeln!(out, "  {} Sample range: {} to {}", pass, first, last);
                },
                _ => {
                    let _ = writeln!(out, "  {} Accession list is empty", self.mark(Marker::Warn));
                },
            }
        }
        out.push('\n');
        true
    }

    fn directories(&self, out: &mut String, report: &PreflightReport) {
        self.heading(out, "REQUIRED DIRECTORIES CHECK");
        for dir in &report.input_dirs {
            let marker = if dir.exists { Marker::Pass } else { Marker::Warn };
            let _ = writeln!(
                out,
                "  {} {}: {}",
                self.mark(marker),
                dir.label,
                dir.path.display()
            );
        }

        out.push('\n');
        let _ = writeln!(out, "  Output directories (will be created during pipeline run):");
        for dir in &report.output_dirs {
            let marker = if dir.exists { Marker::Pass } else { Marker::Pending };
            let _ = writeln!(out, "    {} {}", self.mark(marker), dir.label);
        }
        out.push('\n');
    }

    fn environments(&self, out: &mut String, report: &PreflightReport) {
        self.heading(out, "CONDA ENVIRONMENTS CHECK");
        match &report.environments {
            Some(EnvironmentListing::Found(files)) => {
                let _ = writeln!(
                    out,
                    "  {} Found {} environment definitions:",
                    self.mark(Marker::Pass),
                    files.len()
                );
                for file in files {
                    let _ = writeln!(out, "    - {}", file);
                }
            },
            Some(EnvironmentListing::MissingDirectory) | None => {
                let _ = writeln!(
                    out,
                    "  {} {}/ directory not found",
                    self.mark(Marker::Fail),
                    report.envs_dir
                );
            },
        }
        out.push('\n');
    }

    fn summary(&self, out: &mut String, report: &PreflightReport) {
        self.heading(out, "VALIDATION SUMMARY");
        if report.is_valid() {
            let _ = writeln!(out, "{} Configuration appears valid!", self.mark(Marker::Pass));
            out.push('\n');
            let _ = writeln!(out, "Ready to run analysis with commands:");
            out.push('\n');
            for command in report.suggested_commands() {
                let _ = writeln!(out, "  {}", command);
            }
        } else {
            let _ = writeln!(
                out,
                "{} Configuration needs review/fixes before running pipeline",
                self.mark(Marker::Warn)
            );
        }
        out.push('\n');
    }

    fn error_line(&self, message: &str) -> String {
        let label = if self.colored { "ERROR:".bright_red().bold().to_string() } else { "ERROR:".to_string() };
        format!("{} {}", label, message)
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_report(&self, report: &PreflightReport) -> PreflightResult<String> {
        let mut out = String::new();
        let banner = "=".repeat(WIDTH);

        out.push('\n');
        let _ = writeln!(out, "{}", banner);
        let _ = writeln!(out, "ChIP-seq PIPELINE CONFIGURATION VALIDATION");
        let _ = writeln!(out, "{}", banner);
        out.push('\n');

        let completed = self.files(&mut out, report)
            && self.config(&mut out, report)
            && self.accessions(&mut out, report);
        if !completed {
            return Ok(out);
        }

        self.directories(&mut out, report);
        self.environments(&mut out, report);
        self.summary(&mut out, report);

        let _ = writeln!(out, "{}", banner);
        out.push('\n');
        Ok(out)
    }
}
