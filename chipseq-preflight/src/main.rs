//! chipseq-preflight - pre-flight checker for the ChIP-seq Snakemake pipeline
//!
//! Prints the preflight report on stdout and exits with
//! 0 (ready), 1 (needs review), 2 (aborted) or 3 (checker error).

use std::process;

use chipseq_preflight::{
    logging::initialize_tracing,
    run,
    Cli,
    EXIT_TOOL_ERROR,
};
use clap::Parser;
use colored::Colorize;
use tracing::error;

fn main() {
    let cli = Cli::parse();
    initialize_tracing(cli.verbose);
    colored::control::set_override(cli.use_colors());

    let stdout = std::io::stdout();
    let code = match run(&cli, &mut stdout.lock()) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("{} {:#}", "❌".bright_red(), e);
            EXIT_TOOL_ERROR
        },
    };

    process::exit(code);
}
