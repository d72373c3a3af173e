//! Error types for the sound engines.

use std::sync::Arc;

use thiserror::Error;

/// Result type for audio operations.
pub type AudioResult<T> = Result<T, AudioError>;

/// Errors that can occur while initializing an engine or playing a note.
#[derive(Debug, Error)]
pub enum AudioError {
    /// Invalid sample rate.
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: u32,
    },

    /// Invalid note duration.
    #[error("invalid duration: {duration_ms} ms")]
    InvalidDuration {
        /// The invalid duration.
        duration_ms: u32,
    },

    /// Sample assets could not be loaded.
    #[error("failed to load samples: {message}")]
    SampleLoad {
        /// Error message.
        message: String,
    },

    /// A sample bank with nothing in it.
    #[error("sample bank is empty")]
    EmptySampleBank,

    /// WAV decoding error.
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    /// No system audio player could be found.
    #[error("no audio player found (tried {tried})")]
    NoPlayer {
        /// Comma-separated candidates that were searched for.
        tried: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A failed sample load, shared between every caller that awaited it.
    #[error(transparent)]
    SharedLoad(Arc<AudioError>),

    /// The engine was disposed while the caller waited on it.
    #[error("engine disposed while loading")]
    Disposed,

    /// Internal synthesis error.
    #[error("synthesis error: {message}")]
    Synthesis {
        /// Error message.
        message: String,
    },
}

impl AudioError {
    /// Creates a sample load error.
    pub fn sample_load(message: impl Into<String>) -> Self {
        Self::SampleLoad {
            message: message.into(),
        }
    }

    /// Creates a synthesis error.
    pub fn synthesis(message: impl Into<String>) -> Self {
        Self::Synthesis {
            message: message.into(),
        }
    }
}
