//! ChIP-seq Preflight Core - pre-run checks for the ChIP-seq Snakemake pipeline
//!
//! This library verifies that a pipeline tree is ready to run before any job
//! is scheduled: the configuration, accession list and Snakefile exist, the
//! configuration carries the keys the pipeline cannot run without, and the
//! expected directories and conda environment definitions are in place.
//!
//! # Architecture
//!
//! - [`config`]: pipeline layout and optional `preflight.toml` settings
//! - [`checks`]: the individual checks (files, configuration, accessions,
//!   environments)
//! - [`validation`]: [`PreflightValidator`] sequencing the checks and applying
//!   the hard/soft failure policy
//! - [`report`] and [`diagnostics`]: the result model
//! - [`formatters`]: human, JSON and JSON Lines rendering
//!
//! # Example
//!
//! ```no_run
//! use chipseq_preflight_core::{
//!     formatters::{FormatterFactory, OutputFormat, OutputFormatter},
//!     run_preflight,
//! };
//!
//! let report = run_preflight(".")?;
//! let text = FormatterFactory::create(OutputFormat::Human, false).format_report(&report)?;
//! print!("{}", text);
//! std::process::exit(report.outcome.exit_code());
//! # Ok::<(), chipseq_preflight_core::PreflightError>(())
//! ```

#![forbid(unsafe_code)]

pub mod checks;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod formatters;
pub mod report;
pub mod validation;

// Public API
pub use config::{
    PipelineLayout,
    PreflightSettings,
};
pub use error::{
    PreflightError,
    PreflightResult,
};
pub use report::{
    Outcome,
    PreflightReport,
    Stage,
};
pub use validation::{
    run_preflight,
    PreflightValidator,
};

/// Checker version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable overriding the pipeline root
pub const ROOT_ENV_VAR: &str = "CHIPSEQ_PIPELINE_ROOT";
