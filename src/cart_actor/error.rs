//! Error types for the Cart actor.

use crate::modifiers::SelectionError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// The cart does not exist (closed session).
    #[error("Cart not found: {0}")]
    NotFound(String),

    /// The product is switched off in the catalog.
    #[error("{0} is currently unavailable")]
    Unavailable(String),

    #[error(transparent)]
    InvalidSelection(#[from] SelectionError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
