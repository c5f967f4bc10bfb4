//! Preflight validation of a ChIP-seq pipeline tree
//!
//! [`PreflightValidator::run`] walks the checks in a fixed order and applies
//! the failure policy:
//!
//! - **hard failures** (a mandatory file missing, `config.yaml` unparsable,
//!   accession list unreadable) stop the run with [`Outcome::Aborted`];
//! - **soft failures** (required configuration keys missing) let the run
//!   finish with [`Outcome::NeedsReview`];
//! - **cosmetic warnings** (input/output directories, environment files)
//!   never change the outcome.
//!
//! A run only reads the filesystem, so running it twice on an unchanged tree
//! yields equal reports.

use std::path::PathBuf;

use tracing::{
    debug,
    info,
    warn,
};

use crate::{
    checks::{
        check_input_dirs,
        check_output_dirs,
        check_required_files,
        list_environment_files,
        AccessionList,
        PipelineConfig,
    },
    config::PipelineLayout,
    diagnostics::{
        codes,
        Diagnostic,
        Severity,
    },
    error::PreflightResult,
    report::{
        EnvironmentListing,
        Outcome,
        PreflightReport,
        Stage,
    },
};

/// Runs all preflight checks against one pipeline layout
#[derive(Debug, Clone)]
pub struct PreflightValidator {
    layout: PipelineLayout,
}

impl PreflightValidator {
    /// Create a validator for a resolved layout
    pub fn new(layout: PipelineLayout) -> Self {
        Self { layout }
    }

    /// Layout being checked
    pub fn layout(&self) -> &PipelineLayout {
        &self.layout
    }

    /// Run every check and return the report
    ///
    /// Pipeline problems end up in the report's [`Outcome`]; `Err` is
    /// reserved for failures of the checker itself.
    pub fn run(&self) -> PreflightResult<PreflightReport> {
        let layout = &self.layout;
        info!(root = %layout.root.display(), "running pipeline preflight checks");

        let mut report = PreflightReport::new(layout);

        report.files = check_required_files(layout, &mut report.diagnostics);
        let missing: Vec<String> = report
            .files
            .iter()
            .filter(|f| !f.exists)
            .map(|f| f.label.clone())
            .collect();
        if !missing.is_empty() {
            return Ok(abort(
                report,
                Stage::Files,
                format!("Some required files are missing: {}", missing.join(", ")),
            ));
        }

        let config = match PipelineConfig::load(&layout.config_file) {
            Ok(config) => config,
            Err(e) => {
                report.diagnostics.push(
                    Diagnostic::new(
                        &layout.config_file,
                        Severity::Error,
                        format!("Failed to load {}: {}", layout.settings.config_file, e),
                        "config",
                    )
                    .with_code(codes::CONFIG_PARSE),
                );
                return Ok(abort(report, Stage::Config, e.to_string()));
            },
        };
        debug!(keys = config.len(), "configuration loaded");
        report.config = Some(config.entries());

        report.required_keys = config.check_required_keys(&layout.settings.required_keys);
        for check in report.required_keys.iter().filter(|c| !c.is_present()) {
            warn!(key = %check.key, "missing required configuration key");
            report.diagnostics.push(
                Diagnostic::new(
                    &layout.config_file,
                    Severity::Error,
                    format!("Missing required parameter: {}", check.key),
                    "config",
                )
                .with_code(codes::MISSING_KEY),
            );
        }
        let keys_valid = report.required_keys.iter().all(|c| c.is_present());

        let accessions = match AccessionList::load(&layout.accession_list) {
            Ok(list) => list,
            Err(e) => {
                report.diagnostics.push(
                    Diagnostic::new(
                        &layout.accession_list,
                        Severity::Error,
                        format!("Failed to load SRR list: {}", e),
                        "accessions",
                    )
                    .with_code(codes::ACCESSION_READ),
                );
                return Ok(abort(report, Stage::Accessions, e.to_string()));
            },
        };
        if accessions.is_empty() {
            warn!(path = %layout.accession_list.display(), "accession list is empty");
            report.diagnostics.push(
                Diagnostic::new(
                    &layout.accession_list,
                    Severity::Warning,
                    "Accession list is empty",
                    "accessions",
                )
                .with_code(codes::EMPTY_ACCESSIONS),
            );
        }
        report.accessions = Some(accessions.summary());

        report.input_dirs = check_input_dirs(layout, &mut report.diagnostics);
        report.output_dirs = check_output_dirs(layout, &mut report.diagnostics);

        let environments = self.environments(&mut report);
        report.environments = Some(environments);

        report.outcome = if keys_valid { Outcome::Ready } else { Outcome::NeedsReview };
        info!(outcome = ?report.outcome, "preflight checks finished");
        Ok(report)
    }

    fn environments(&self, report: &mut PreflightReport) -> EnvironmentListing {
        let envs_dir = &self.layout.envs_dir;
        let listing = list_environment_files(
            envs_dir,
            &self.layout.settings.env_extension,
            &mut report.diagnostics,
        );

        match listing {
            Some(files) => {
                if files.is_empty() {
                    report.diagnostics.push(
                        Diagnostic::new(
                            envs_dir,
                            Severity::Hint,
                            format!(
                                "No *.{} environment definitions found",
                                self.layout.settings.env_extension.trim_start_matches('.')
                            ),
                            "environments",
                        )
                        .with_code(codes::NO_ENVIRONMENTS),
                    );
                }
                EnvironmentListing::Found(files)
            },
            None => EnvironmentListing::MissingDirectory,
        }
    }
}

fn abort(mut report: PreflightReport, stage: Stage, reason: String) -> PreflightReport {
    warn!(%stage, %reason, "preflight aborted");
    report.outcome = Outcome::Aborted { stage, reason };
    report
}

/// Run all checks for the pipeline rooted at `root`
pub fn run_preflight(root: impl Into<PathBuf>) -> PreflightResult<PreflightReport> {
    let root = root.into();
    let layout = PipelineLayout::discover(&root)?;
    PreflightValidator::new(layout).run()
}
