//! Error types for anno-coref.

use thiserror::Error;

/// Result type for anno-coref operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for anno-coref operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Discourse state rejected an operation.
    ///
    /// An [`anno_coref_core::Error::EntityNotFound`] here means the linker
    /// and the model lost track of each other; the run is aborted.
    #[error(transparent)]
    Discourse(#[from] anno_coref_core::Error),

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration could not be parsed or is inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A resolver failed to fit its model.
    #[error("Training failed: {0}")]
    Training(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML decoding error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a training error.
    pub fn training(msg: impl Into<String>) -> Self {
        Error::Training(msg.into())
    }
}
