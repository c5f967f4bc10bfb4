//! Error types for the preflight checker
//!
//! Problems with the *pipeline* (missing files, bad YAML, unreadable accession
//! list) are not errors here: they are recorded as an
//! [`Outcome`](crate::report::Outcome) so the report can still be rendered.
//! [`PreflightError`] covers failures of the checker itself.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the checker itself
#[derive(Error, Debug)]
pub enum PreflightError {
    /// I/O failure outside the checked pipeline files
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path being accessed
        path:   PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Malformed or unreadable `preflight.toml`
    #[error("Invalid settings in {path}: {message}")]
    Settings {
        /// Settings file that failed
        path:    PathBuf,
        /// Parser or I/O message
        message: String,
    },

    /// Pipeline root does not exist or is not a directory
    #[error("Pipeline root is not a directory: {0}")]
    InvalidRoot(PathBuf),

    /// Report could not be serialized
    #[error("Failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PreflightError {
    /// Wrap an I/O error with the path it occurred on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a settings error
    pub fn settings(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Settings {
            path:    path.into(),
            message: message.into(),
        }
    }
}

/// Result alias used throughout the crate
pub type PreflightResult<T> = Result<T, PreflightError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_path() {
        let err = PreflightError::settings("/data/preflight.toml", "expected a table");
        assert_eq!(
            err.to_string(),
            "Invalid settings in /data/preflight.toml: expected a table"
        );

        let err = PreflightError::InvalidRoot(PathBuf::from("/nowhere"));
        assert!(err.to_string().contains("/nowhere"));
    }

    #[test]
    fn test_io_error_keeps_source() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = PreflightError::io("/data/envs", source);
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("I/O error on /data/envs"));
    }
}
