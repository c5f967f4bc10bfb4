//! Command-line arguments

use std::path::PathBuf;

use atty::Stream;
use chipseq_preflight_core::{
    formatters::OutputFormat,
    ROOT_ENV_VAR,
};
use clap::Parser;

/// Pre-flight checker for the ChIP-seq Snakemake pipeline
#[derive(Parser, Debug, Clone)]
#[command(name = "chipseq-preflight")]
#[command(
    version,
    about = "Check that the ChIP-seq pipeline is ready to run",
    long_about = "
Check that the ChIP-seq Snakemake pipeline is ready to run.

Verifies that config.yaml, the SRR accession list and the Snakefile exist,
that the configuration defines idx_bt1 and macs_g, and lists the expected
directories and conda environment definitions. Nothing is written or run.

Exit codes:
  0  configuration valid, ready to run
  1  configuration needs review (required keys missing)
  2  checks aborted (missing files, unparsable config, unreadable SRR list)
  3  checker error (bad root, malformed preflight.toml)

Examples:
  chipseq-preflight
  chipseq-preflight --root /data/chipseq
  chipseq-preflight --output json
"
)]
pub struct Cli {
    /// Pipeline root directory (defaults to the current directory)
    #[arg(long, short, env = ROOT_ENV_VAR)]
    pub root: Option<PathBuf>,

    /// Output format for the report
    #[arg(long, short, value_enum, default_value = "human")]
    pub output: OutputFormatArg,

    /// Disable coloured output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose logging on stderr
    #[arg(long, short)]
    pub verbose: bool,
}

/// Available output formats
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormatArg {
    /// Human-readable report (default)
    Human,
    /// JSON document for tooling
    Json,
    /// JSON Lines, one diagnostic per line
    JsonLines,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(format: OutputFormatArg) -> Self {
        match format {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::JsonLines => OutputFormat::JsonLines,
        }
    }
}

impl Cli {
    /// Whether the human report should be coloured
    pub fn use_colors(&self) -> bool {
        !self.no_color
            && self.output == OutputFormatArg::Human
            && atty::is(Stream::Stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["chipseq-preflight", "--no-color"]).unwrap();
        assert_eq!(cli.output, OutputFormatArg::Human);
        assert!(!cli.verbose);
        assert!(!cli.use_colors());
    }

    #[test]
    fn test_root_and_output() {
        let cli = Cli::try_parse_from([
            "chipseq-preflight",
            "--root",
            "/data/chipseq",
            "--output",
            "json-lines",
        ])
        .unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("/data/chipseq")));
        assert_eq!(OutputFormat::from(cli.output), OutputFormat::JsonLines);
        assert!(!cli.use_colors());
    }

    #[test]
    fn test_unknown_output_rejected() {
        assert!(Cli::try_parse_from(["chipseq-preflight", "--output", "xml"]).is_err());
    }

    #[test]
    fn test_command_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
