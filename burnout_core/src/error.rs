//! Error types for the burnout_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for burnout_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Persisted profile has a schema we cannot read
    #[error("Schema error: {0}")]
    Schema(String),

    /// A required setup field was left empty
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Stored profile values cannot feed the estimator
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    /// Heart-rate reading could not be interpreted
    #[error("Invalid heart rate reading: {0}")]
    InvalidReading(String),
}
