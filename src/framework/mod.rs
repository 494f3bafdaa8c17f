//! Generic actor runtime for the menu's stateful resources.
//!
//! Every mutable piece of a menu session (the cart, the checkout flow) is an
//! [`ActorEntity`] owned by a [`ResourceActor`]. The actor runs in its own Tokio task
//! and processes one request at a time, so an entity is only ever mutated by a single
//! writer. Callers talk to it through a cloneable [`ResourceClient`], usually wrapped
//! in a domain client that implements [`ActorClient`].
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that resource types implement to be managed by actors
//! - [`ResourceActor`] - Generic actor that owns a store of entities
//! - [`ResourceClient`] - Typed request/response handle to an actor
//! - [`FrameworkError`] - Transport-level failures (closed actor, missing entity)
//!
//! # Testing
//!
//! See [`mock`] for utilities to test clients and dependent actors without spawning
//! the real actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
