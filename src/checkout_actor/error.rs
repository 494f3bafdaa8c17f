//! Error types for the Checkout actor.

use crate::cart_actor::CartError;
use crate::model::OrderType;
use thiserror::Error;

/// Shown whenever the order service could not take the order.
pub const RETRY_MESSAGE: &str =
    "We could not place your order. Please check your connection and try again.";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    #[error("Checkout not found: {0}")]
    NotFound(String),

    #[error("Your cart is empty. Please add some items first.")]
    EmptyCart,

    #[error("{0} orders are not available at this shop")]
    OrderTypeUnavailable(OrderType),

    #[error("Dine-in orders need a table. Please scan the code on your table.")]
    MissingDesk,

    #[error("An order is already being placed")]
    SubmissionInFlight,

    /// `submit` outside of identity collection.
    #[error("No order is waiting for customer details")]
    NotCollecting,

    #[error("Please enter your {0}")]
    MissingField(&'static str),

    #[error("{0}")]
    SubmissionFailed(String),

    #[error(transparent)]
    Cart(#[from] CartError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
