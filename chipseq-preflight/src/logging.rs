//! Tracing setup
//!
//! Logs go to stderr so they never mix with the report on stdout. The level
//! comes from `RUST_LOG` when set, otherwise `debug` with `--verbose` and
//! `error` without. `RUST_LOG_FORMAT` selects `pretty`, `compact` or `json`.

use std::env;

use tracing_subscriber::{
    fmt::format::FmtSpan,
    EnvFilter,
};

/// Log output style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line, human oriented
    Pretty,
    /// One line per event
    Compact,
    /// Structured JSON events
    Json,
}

impl LogFormat {
    /// Parse a `RUST_LOG_FORMAT` value, defaulting to compact
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::to_lowercase).as_deref() {
            Some("json") => LogFormat::Json,
            Some("pretty") => LogFormat::Pretty,
            _ => LogFormat::Compact,
        }
    }
}

/// Default filter directive when `RUST_LOG` is not set
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "error" }
}

/// Initialize the tracing system for logging
pub fn initialize_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    let format = LogFormat::parse(env::var("RUST_LOG_FORMAT").ok().as_deref());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(verbose);

    let installed = match format {
        LogFormat::Json => subscriber.json().try_init(),
        LogFormat::Pretty => subscriber.pretty().try_init(),
        LogFormat::Compact => subscriber.compact().try_init(),
    };
    if installed.is_err() {
        tracing::debug!("global tracing subscriber already installed");
    }
}
