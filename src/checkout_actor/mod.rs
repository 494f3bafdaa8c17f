//! # Checkout Actor
//!
//! Drives the order flow of each menu session:
//!
//! ```text
//! Idle ──initiate──▶ CollectingIdentity ──submit──▶ Submitting ──▶ Succeeded
//!   │                      │                                  └──▶ Failed
//!   │                      └──cancel──▶ Idle
//!   └──initiate (identity known, dine-in/takeaway)──▶ Submitting
//! ```
//!
//! The actor depends on the cart actor, the identity memo and the order gateway,
//! all injected through [`CheckoutContext`] when the actor is started. The gateway
//! call is awaited inside the actor loop, so submissions for a session are strictly
//! serialized and a cart snapshot is never submitted twice.

mod actions;
pub mod entity;
pub mod error;
pub mod messages;

pub use actions::*;
pub use error::*;
pub use messages::*;

use crate::clients::{CartClient, CheckoutClient};
use crate::framework::ResourceActor;
use crate::gateway::OrderGateway;
use crate::identity::IdentityMemo;
use crate::model::Checkout;
use std::sync::Arc;
use std::time::Duration;

/// Dependencies of the checkout actor.
#[derive(Clone)]
pub struct CheckoutContext {
    pub cart: CartClient,
    pub identity: IdentityMemo,
    pub gateway: Arc<dyn OrderGateway>,
    /// Upper bound on one order submission. Expiry counts as a failure.
    pub submit_timeout: Duration,
}

/// Creates a new Checkout actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Checkout>, CheckoutClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, CheckoutClient::new(generic_client))
}
