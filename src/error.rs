//! Gatewatch error types.
//!
//! The inspection core is total: malformed input is its domain and always
//! resolves to a classification, never an `Err`. The variants here cover
//! only the collaborators around the core — configuration loading and the
//! server plumbing.

use thiserror::Error;

/// Gatewatch errors.
#[derive(Error, Debug)]
pub enum GatewatchError {
    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Server-side error.
    #[error("Server error: {0}")]
    Server(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for gatewatch operations
pub type Result<T> = std::result::Result<T, GatewatchError>;

impl From<toml::de::Error> for GatewatchError {
    fn from(err: toml::de::Error) -> Self {
        GatewatchError::Config(err.to_string())
    }
}
