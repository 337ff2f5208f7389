//! Error types for gw-core

use thiserror::Error;

/// Core error type for gw
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Wire document does not match the workflow model
    #[error("[C001] Malformed input: {message}")]
    MalformedInput { message: String },

    /// C002: Configuration file not found
    #[error("[C002] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C003: Failed to parse configuration file
    #[error("[C003] Failed to parse config: {0}")]
    ConfigParseError(#[from] serde_yaml::Error),

    /// C004: Invalid configuration value
    #[error("[C004] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// C005: IO error with file path context
    #[error("[C005] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

impl CoreError {
    /// Shorthand for a [`CoreError::MalformedInput`] with the given message.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
