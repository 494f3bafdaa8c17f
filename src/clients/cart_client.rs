//! # Cart Client
//!
//! Domain API over `ResourceClient<Cart>`: open a cart, mutate its lines, read it back.
use crate::cart_actor::{CartAction, CartActionResult, CartCreate, CartError};
use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{Cart, CartId, CartLine, LineKey, Modifier, Product};
use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

/// Client for interacting with the Cart actor.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
}

impl CartClient {
    pub fn new(inner: ResourceClient<Cart>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Cart> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &ResourceClient<Cart> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<CartError>() {
            Ok(cart_error) => cart_error,
            Err(FrameworkError::NotFound(id)) => CartError::NotFound(id),
            Err(other) => CartError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl CartClient {
    #[instrument(skip(self))]
    pub async fn open(&self) -> Result<CartId, CartError> {
        debug!("Sending request");
        self.inner.create(CartCreate).await.map_err(Self::map_error)
    }

    /// Current contents of the cart. A missing cart is an error.
    #[instrument(skip(self))]
    pub async fn snapshot(&self, id: CartId) -> Result<Cart, CartError> {
        self.get(id)
            .await?
            .ok_or_else(|| CartError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn total(&self, id: CartId) -> Result<Decimal, CartError> {
        Ok(self.snapshot(id).await?.total())
    }

    /// Adds one unit of `product`. Returns the line it landed on.
    #[instrument(skip(self, product), fields(product = %product.id))]
    pub async fn add(
        &self,
        id: CartId,
        product: Product,
        modifiers: Vec<Modifier>,
    ) -> Result<CartLine, CartError> {
        debug!(?modifiers, "Adding to cart");
        match self.act(id, CartAction::Add { product, modifiers }).await? {
            CartActionResult::Add(line) => Ok(line),
            other => unreachable!("Add action must return Add result, got {other:?}"),
        }
    }

    #[instrument(skip(self))]
    pub async fn increase(&self, id: CartId, key: LineKey) -> Result<Option<u32>, CartError> {
        match self.act(id, CartAction::Increase(key)).await? {
            CartActionResult::Increase(quantity) => Ok(quantity),
            other => unreachable!("Increase action must return Increase result, got {other:?}"),
        }
    }

    #[instrument(skip(self))]
    pub async fn decrease(&self, id: CartId, key: LineKey) -> Result<Option<u32>, CartError> {
        match self.act(id, CartAction::Decrease(key)).await? {
            CartActionResult::Decrease(quantity) => Ok(quantity),
            other => unreachable!("Decrease action must return Decrease result, got {other:?}"),
        }
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, id: CartId, key: LineKey) -> Result<bool, CartError> {
        match self.act(id, CartAction::Remove(key)).await? {
            CartActionResult::Remove(removed) => Ok(removed),
            other => unreachable!("Remove action must return Remove result, got {other:?}"),
        }
    }

    #[instrument(skip(self))]
    pub async fn clear(&self, id: CartId) -> Result<(), CartError> {
        match self.act(id, CartAction::Clear).await? {
            CartActionResult::Clear(()) => Ok(()),
            other => unreachable!("Clear action must return Clear result, got {other:?}"),
        }
    }

    async fn act(&self, id: CartId, action: CartAction) -> Result<CartActionResult, CartError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }
}
