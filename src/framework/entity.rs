//! # ActorEntity Trait
//!
//! The contract every menu resource implements to be owned by a [`ResourceActor`].
//! Associated types pin down the id, the creation payload, the actions and the
//! injected context, so a `CartAction` can never be sent to the checkout actor.
//!
//! Lifecycle hooks (`on_create`, `on_delete`) default to `Ok(())`.
//!
//! [`ResourceActor`]: super::ResourceActor

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by `ResourceActor`.
///
/// # Async & Context
/// Hooks are async so they can call other actors or external gateways. The
/// `Context` is handed to `run()` rather than `new()`, which lets actors be
/// created first and wired together afterwards.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Identifier, generated by the actor from a monotonically increasing `u32`.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload required to create a new instance.
    type Create: Send + Sync + Debug;

    /// Resource-specific operations.
    type Action: Send + Sync + Debug;

    /// Result returned by [`ActorEntity::handle_action`].
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected into the actor at `run()`. Use `()` when none.
    type Context: Send + Sync;

    /// One error enum per actor, the union of everything its actions can fail with.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the entity from its id and payload. Called before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Called after construction and before the entity is stored.
    /// Returning an error aborts the creation.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called immediately before the entity is removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle a resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
