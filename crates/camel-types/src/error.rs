//! Error types for camel-weigh

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}

/// Failure of the alarm notification side effect.
///
/// Callers of the alarm evaluator never see this; it is swallowed there.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Notification output unavailable: {0}")]
    Unavailable(#[from] std::io::Error),

    #[error("Notifications disabled")]
    Disabled,
}

/// A price rate outside the allowed set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported price rate: {0} (allowed: 30000, 40000)")]
pub struct ParseRateError(pub String);

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;
