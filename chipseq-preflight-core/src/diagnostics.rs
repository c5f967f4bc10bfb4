//! Diagnostics collected while checking a pipeline
//!
//! Every finding of a check, from a missing Snakefile to an output directory
//! that does not exist yet, is also recorded as a [`Diagnostic`] so that
//! machine consumers (`--output json`, `--output json-lines`) get the same
//! information as the human report.

use std::{
    collections::HashSet,
    fmt,
    path::Path,
};

use serde::{
    Deserialize,
    Serialize,
};

/// Diagnostic severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Prevents the pipeline from running
    Error,
    /// Should be looked at but does not block the run
    Warning,
    /// Informational message
    Info,
    /// Suggestion for improvement
    Hint,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
            Severity::Hint => write!(f, "hint"),
        }
    }
}

/// Stable codes attached to diagnostics
pub mod codes {
    /// A mandatory file does not exist
    pub const MISSING_FILE: &str = "missing-file";
    /// The pipeline configuration could not be parsed
    pub const CONFIG_PARSE: &str = "config-parse";
    /// A required configuration key is absent
    pub const MISSING_KEY: &str = "missing-required-key";
    /// The accession list could not be read
    pub const ACCESSION_READ: &str = "accession-read";
    /// The accession list has no entries
    pub const EMPTY_ACCESSIONS: &str = "empty-accession-list";
    /// An input directory is missing
    pub const MISSING_DIR: &str = "missing-directory";
    /// A stage output directory has not been created yet
    pub const PENDING_OUTPUT: &str = "pending-output-directory";
    /// The environment directory has no definitions
    pub const NO_ENVIRONMENTS: &str = "no-environments";
    /// An entry of the environment directory could not be read
    pub const UNREADABLE_ENVIRONMENT: &str = "unreadable-environment-entry";
}

/// Individual diagnostic item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Path the diagnostic refers to
    pub path:     String,
    /// Severity level
    pub severity: Severity,
    /// Optional stable code, see [`codes`]
    pub code:     Option<String>,
    /// Human-readable message
    pub message:  String,
    /// Check that produced the diagnostic (e.g. "files", "config")
    pub source:   String,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(
        path: &Path,
        severity: Severity,
        message: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            path: path.display().to_string(),
            severity,
            code: None,
            message: message.into(),
            source: source.into(),
        }
    }

    /// Set diagnostic code
    pub fn with_code(mut self, code: &str) -> Self {
        self.code = Some(code.to_string());
        self
    }
}

/// Summary statistics for a set of diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticSummary {
    /// Total number of diagnostics
    pub total:                  usize,
    /// Number of errors
    pub errors:                 usize,
    /// Number of warnings
    pub warnings:               usize,
    /// Number of info messages
    pub infos:                  usize,
    /// Number of hints
    pub hints:                  usize,
    /// Number of distinct paths with diagnostics
    pub paths_with_diagnostics: usize,
}

impl DiagnosticSummary {
    /// Create summary from diagnostics
    pub fn from_diagnostics(diagnostics: &[Diagnostic]) -> Self {
        let mut summary = Self {
            total: diagnostics.len(),
            ..Self::default()
        };
        let mut paths = HashSet::new();

        for diagnostic in diagnostics {
            match diagnostic.severity {
                Severity::Error => summary.errors += 1,
                Severity::Warning => summary.warnings += 1,
                Severity::Info => summary.infos += 1,
                Severity::Hint => summary.hints += 1,
            }
            paths.insert(diagnostic.path.as_str());
        }

        summary.paths_with_diagnostics = paths.len();
        summary
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }
}

/// Ordered collection of diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic to the collection
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// All diagnostics in the order they were raised
    pub fn all(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get diagnostics by severity
    pub fn by_severity(&self, severity: Severity) -> Vec<&Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity == severity).collect()
    }

    /// Get diagnostics by code
    pub fn by_code(&self, code: &str) -> Vec<&Diagnostic> {
        self.diagnostics.iter().filter(|d| d.code.as_deref() == Some(code)).collect()
    }

    /// Summary statistics
    pub fn summary(&self) -> DiagnosticSummary {
        DiagnosticSummary::from_diagnostics(&self.diagnostics)
    }

    /// Number of diagnostics
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Whether no diagnostics were raised
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
