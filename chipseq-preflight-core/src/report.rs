//! Result model of one preflight run

use std::{
    fmt,
    path::PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    config::PipelineLayout,
    diagnostics::{
        DiagnosticCollection,
        DiagnosticSummary,
    },
};

/// Existence record for a mandatory file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCheck {
    /// Name shown in the report
    pub label:  String,
    /// Absolute path
    pub path:   PathBuf,
    /// Whether the path exists
    pub exists: bool,
}

/// Existence record for a directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirCheck {
    /// Name shown in the report (e.g. `rawfastqs/`)
    pub label:  String,
    /// Absolute path
    pub path:   PathBuf,
    /// Whether the path exists
    pub exists: bool,
}

/// One configuration entry, rendered for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntry {
    /// Configuration key
    pub key:   String,
    /// Display form of the value
    pub value: String,
}

/// Presence of one required configuration key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyCheck {
    /// Required key
    pub key:   String,
    /// Display form of the value, `None` when the key is missing
    pub value: Option<String>,
}

impl KeyCheck {
    /// Whether the key was found
    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }
}

/// Accession list statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessionSummary {
    /// Number of non-blank accessions
    pub total: usize,
    /// First accession, `None` for an empty list
    pub first: Option<String>,
    /// Last accession, `None` for an empty list
    pub last:  Option<String>,
}

/// Environment definitions found in the environment directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "files", rename_all = "kebab-case")]
pub enum EnvironmentListing {
    /// Directory exists; sorted file names
    Found(Vec<String>),
    /// Directory does not exist
    MissingDirectory,
}

/// Stage at which a run was aborted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Mandatory file existence
    Files,
    /// Configuration parsing
    Config,
    /// Accession list reading
    Accessions,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Files => write!(f, "files"),
            Stage::Config => write!(f, "config"),
            Stage::Accessions => write!(f, "accessions"),
        }
    }
}

/// Final verdict of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum Outcome {
    /// All required keys present, pipeline can be started
    Ready,
    /// Report completed but required keys are missing
    NeedsReview,
    /// A hard failure stopped the checks
    Aborted {
        /// Stage that failed
        stage:  Stage,
        /// Reason shown to the user
        reason: String,
    },
}

impl Outcome {
    /// Process exit code for this outcome
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Ready => 0,
            Outcome::NeedsReview => 1,
            Outcome::Aborted { .. } => 2,
        }
    }
}

/// Everything one preflight run found
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreflightReport {
    /// Pipeline root
    pub root:          PathBuf,
    /// Pipeline directory name, used in the suggested commands
    pub pipeline_dir:  String,
    /// Configuration file name
    pub config_file:   String,
    /// Environment directory name
    pub envs_dir:      String,
    /// Conda environment, used in the suggested commands
    pub conda_env:     String,
    /// Mandatory file checks
    pub files:         Vec<FileCheck>,
    /// Configuration entries in document order, `None` if not loaded
    pub config:        Option<Vec<ConfigEntry>>,
    /// Required key checks
    pub required_keys: Vec<KeyCheck>,
    /// Accession list statistics, `None` if not loaded
    pub accessions:    Option<AccessionSummary>,
    /// Input directory checks
    pub input_dirs:    Vec<DirCheck>,
    /// Stage output directory checks
    pub output_dirs:   Vec<DirCheck>,
    /// Environment definitions, `None` if not checked
    pub environments:  Option<EnvironmentListing>,
    /// Final verdict
    pub outcome:       Outcome,
    /// Diagnostics in the order they were raised
    pub diagnostics:   DiagnosticCollection,
}

impl PreflightReport {
    /// Create an empty report for a pipeline layout
    pub fn new(layout: &PipelineLayout) -> Self {
        Self {
            root: layout.root.clone(),
            pipeline_dir: layout.settings.pipeline_dir.clone(),
            config_file: layout.settings.config_file.clone(),
            envs_dir: layout.settings.envs_dir.clone(),
            conda_env: layout.settings.conda_env.clone(),
            files: Vec::new(),
            config: None,
            required_keys: Vec::new(),
            accessions: None,
            input_dirs: Vec::new(),
            output_dirs: Vec::new(),
            environments: None,
            outcome: Outcome::NeedsReview,
            diagnostics: DiagnosticCollection::new(),
        }
    }

    /// Whether the pipeline is considered runnable
    pub fn is_valid(&self) -> bool {
        self.outcome == Outcome::Ready
    }

    /// Stage the run stopped at, if any
    pub fn aborted_at(&self) -> Option<Stage> {
        match &self.outcome {
            Outcome::Aborted { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Diagnostic statistics
    pub fn summary(&self) -> DiagnosticSummary {
        self.diagnostics.summary()
    }

    /// Commands suggested once the configuration is valid (never executed)
    pub fn suggested_commands(&self) -> Vec<String> {
        vec![
            format!("cd {}", self.pipeline_dir),
            format!("conda activate {}", self.conda_env),
            "snakemake -n  # Dry run first".to_string(),
            "snakemake --cores all --use-conda".to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PreflightSettings;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Outcome::Ready.exit_code(), 0);
        assert_eq!(Outcome::NeedsReview.exit_code(), 1);
        let aborted = Outcome::Aborted {
            stage:  Stage::Config,
            reason: "bad yaml".to_string(),
        };
        assert_eq!(aborted.exit_code(), 2);
    }

    #[test]
    fn test_new_report_is_not_valid() {
        let layout = PipelineLayout::new("/p", PreflightSettings::default());
        let report = PreflightReport::new(&layout);
        assert!(!report.is_valid());
        assert_eq!(report.aborted_at(), None);
        assert_eq!(report.suggested_commands()[0], "cd snakemake_ChIPseq_pipeline");
        assert_eq!(report.suggested_commands()[1], "conda activate chipseq");
    }

    #[test]
    fn test_outcome_serialization() {
        let aborted = Outcome::Aborted {
            stage:  Stage::Accessions,
            reason: "is a directory".to_string(),
        };
        let json = serde_json::to_value(&aborted).unwrap();
        assert_eq!(json["status"], "aborted");
        assert_eq!(json["stage"], "accessions");

        let json = serde_json::to_value(Outcome::NeedsReview).unwrap();
        assert_eq!(json["status"], "needs-review");
    }
}
