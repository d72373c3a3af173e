//! Error types for the core crate.
//!
//! Pitch parsing and card generation never fail; they fall back to defaults.
//! Errors here only come from explicit conversions and from persisting
//! settings.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An interval id that is not in the catalog.
    #[error("unknown interval id '{0}'")]
    UnknownInterval(String),

    /// An engine id that is not one of the known engines.
    #[error("unknown engine id '{0}'")]
    UnknownEngine(String),

    /// Settings could not be serialized.
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),

    /// I/O error from a file-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A store key that cannot be mapped to storage.
    #[error("invalid store key '{key}': {message}")]
    InvalidKey {
        /// The offending key.
        key: String,
        /// Why it was rejected.
        message: String,
    },
}

impl CoreError {
    /// Creates an invalid key error.
    pub fn invalid_key(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidKey {
            key: key.into(),
            message: message.into(),
        }
    }
}
