//! Error types for anno-coref-core.

use crate::EntityKey;
use thiserror::Error;

/// Result type for discourse-state operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for discourse-state operations.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An entity was addressed that the model does not hold.
    ///
    /// Raised when the caller and the model disagree about which entities
    /// are live. Not recoverable within a run.
    #[error("Entity {0} is not present in the discourse model")]
    EntityNotFound(EntityKey),
}

impl Error {
    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an entity-not-found error.
    #[must_use]
    pub fn entity_not_found(key: EntityKey) -> Self {
        Self::EntityNotFound(key)
    }

    /// Whether this error signals that caller and model state diverged.
    #[must_use]
    pub fn is_consistency_violation(&self) -> bool {
        matches!(self, Self::EntityNotFound(_))
    }
}
