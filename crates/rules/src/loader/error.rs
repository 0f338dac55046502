//! Error types for rule loading and validation.

use std::path::PathBuf;

/// Errors that can occur while building or loading a reminder rule set.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// Filesystem I/O error.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse/deserialization error.
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// One or more rules failed validation. All problems are listed.
    #[error("invalid rule configuration: {}", .0.join("; "))]
    InvalidConfiguration(Vec<String>),
}

/// Result alias for rule operations.
pub type Result<T> = std::result::Result<T, RuleError>;
