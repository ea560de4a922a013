//! Unified error types for the VolunteerVerse client
//!
//! Collaborator traits (identity provider, directory service) report failures
//! through `CoreError` so the session store can treat them uniformly.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type shared by all collaborators
#[derive(Debug, Error)]
pub enum CoreError {
    /// Transport layer errors (connect, timeout, TLS)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Remote service answered with a non-success status
    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    /// Identity provider could not issue a token
    #[error("Auth error: {0}")]
    Auth(String),

    /// Serialization/Deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Operation timeout
    #[error("Timeout")]
    Timeout,
}

impl CoreError {
    /// Create a transport error
    pub fn transport<S: Into<String>>(msg: S) -> Self {
        CoreError::Transport(msg.into())
    }

    /// Create an auth error
    pub fn auth<S: Into<String>>(msg: S) -> Self {
        CoreError::Auth(msg.into())
    }

    /// Create a serialization error
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        CoreError::Serialization(msg.into())
    }

    /// Whether retrying the same call later could succeed
    pub fn is_transient(&self) -> bool {
        match self {
            CoreError::Transport(_) | CoreError::Timeout => true,
            CoreError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
