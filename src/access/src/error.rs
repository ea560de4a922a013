//! Error types for the access layer

use thiserror::Error;
use volunteerverse_core::CoreError;

/// Access layer errors
#[derive(Debug, Error)]
pub enum AccessError {
    /// Collaborator (identity provider, directory, notices) failure
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// HTTP client construction failed
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for access operations
pub type Result<T> = std::result::Result<T, AccessError>;
