//! # Cart Actor
//!
//! Owns every open cart. All mutations (add, quantity changes, removal, clearing
//! after a successful order) are [`CartAction`]s handled inside the actor loop, so a
//! cart has exactly one writer no matter how many tasks hold a [`CartClient`].
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Cart`]
//! - [`actions`] - [`CartAction`] and its 1:1 [`CartActionResult`]
//! - [`error`] - [`CartError`]
//! - [`new()`] - Factory that creates the actor and its client

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::CartClient;
use crate::framework::ResourceActor;
use crate::model::Cart;

/// Creates a new Cart actor and its client. The actor takes no context.
pub fn new(buffer_size: usize) -> (ResourceActor<Cart>, CartClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, CartClient::new(generic_client))
}
