//! chipseq-preflight - command-line front end of the ChIP-seq preflight checker
//!
//! The binary is a thin layer over `chipseq-preflight-core`: it parses
//! arguments, sets up logging, resolves the pipeline root, renders the report
//! in the requested format and turns the outcome into an exit code.

pub mod cli;
pub mod logging;

use std::{
    io::Write,
    path::PathBuf,
};

use anyhow::{
    Context,
    Result,
};
use chipseq_preflight_core::{
    formatters::{
        FormatterFactory,
        OutputFormatter,
    },
    PipelineLayout,
    PreflightValidator,
};
pub use cli::{
    Cli,
    OutputFormatArg,
};
use tracing::debug;

/// Exit code for failures of the checker itself
pub const EXIT_TOOL_ERROR: i32 = 3;

/// Resolve the pipeline root: explicit argument (or its env var), else the
/// current directory
pub fn resolve_root(root: Option<PathBuf>) -> Result<PathBuf> {
    match root {
        Some(root) => Ok(root),
        None => std::env::current_dir().context("Failed to get current directory"),
    }
}

/// Run the checker and write the report to `out`
///
/// Returns the process exit code: 0 ready, 1 needs review, 2 aborted.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<i32> {
    let root = resolve_root(cli.root.clone())?;
    debug!(root = %root.display(), "resolved pipeline root");

    let layout = PipelineLayout::discover(&root)
        .with_context(|| format!("Failed to resolve pipeline layout at {}", root.display()))?;
    let report = PreflightValidator::new(layout).run().context("Preflight checks failed")?;

    let formatter = FormatterFactory::create(cli.output.into(), cli.use_colors());
    let rendered = formatter.format_report(&report).context("Failed to render report")?;
    out.write_all(rendered.as_bytes()).context("Failed to write report")?;
    out.flush().context("Failed to write report")?;

    Ok(report.outcome.exit_code())
}
