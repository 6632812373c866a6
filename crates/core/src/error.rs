//! Error types for the wordbpe tokenizer library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the tokenizer library.
///
/// Encoding an unknown character or decoding an unknown id is not an error:
/// both are dropped silently because the vocabulary is closed over the
/// training corpus.
#[derive(Error, Debug)]
pub enum TokenizerError {
    /// Error during training
    #[error("Training error: {0}")]
    Training(String),

    /// Error loading a persisted model
    #[error("Load error: {0}")]
    Load(String),

    /// Error saving a model
    #[error("Save error: {0}")]
    Save(String),

    /// I/O error with file context
    #[error("I/O error for {path}: {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration, e.g. no training target given
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Malformed merge rule in a persisted model
    #[error("Invalid merge rule: {0}")]
    InvalidMerge(String),
}

impl TokenizerError {
    /// Wrap an I/O error together with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            err,
        }
    }
}

/// Result type alias for tokenizer operations.
pub type Result<T> = std::result::Result<T, TokenizerError>;
