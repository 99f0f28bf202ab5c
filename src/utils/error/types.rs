//! Error types for the gateway

use thiserror::Error;

/// Result type alias for the gateway
pub type Result<T> = std::result::Result<T, MeterError>;

/// Main error type for the gateway
#[derive(Error, Debug)]
pub enum MeterError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Errors talking to the upstream memory API
    #[error("Upstream error: {0}")]
    Upstream(#[from] reqwest::Error),

    /// Upstream memory API not configured or not reachable
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}
