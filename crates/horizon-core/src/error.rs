//! Error taxonomy shared across the pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced to the caller of a scenario run.
///
/// Data-source failures never appear here: the exposure analyzer recovers
/// them locally and records a diagnostic instead.
#[derive(Debug, Error)]
pub enum HorizonError {
    /// A request parameter is out of range. Reported to the client as-is.
    #[error("invalid {field}: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: String,
    },

    /// The named catalog entry does not exist.
    #[error("unknown asteroid id: {0}")]
    UnknownAsteroid(String),

    /// A logic defect or malformed data inside the pipeline.
    #[error("internal error: {0}")]
    Internal(String),
}

impl HorizonError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        HorizonError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Whether the error was caused by the request rather than the system.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            HorizonError::InvalidInput { .. } | HorizonError::UnknownAsteroid(_)
        )
    }
}

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
