//! # Checkout Client
//!
//! Domain API over `ResourceClient<Checkout>`.
use crate::cart_actor::CartError;
use crate::checkout_actor::{
    CheckoutAction, CheckoutActionResult, CheckoutCreate, CheckoutError, CheckoutStep, Confirmation,
};
use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{Checkout, CheckoutId, CheckoutState, CustomerDetails, OrderType};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Checkout actor.
#[derive(Clone)]
pub struct CheckoutClient {
    inner: ResourceClient<Checkout>,
}

impl CheckoutClient {
    pub fn new(inner: ResourceClient<Checkout>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Checkout> for CheckoutClient {
    type Error = CheckoutError;

    fn inner(&self) -> &ResourceClient<Checkout> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        let e = match e.downcast_entity::<CheckoutError>() {
            Ok(checkout_error) => return checkout_error,
            Err(e) => e,
        };
        match e.downcast_entity::<CartError>() {
            Ok(cart_error) => CheckoutError::Cart(cart_error),
            Err(FrameworkError::NotFound(id)) => CheckoutError::NotFound(id),
            Err(other) => CheckoutError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl CheckoutClient {
    #[instrument(skip(self))]
    pub async fn open(&self, params: CheckoutCreate) -> Result<CheckoutId, CheckoutError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn state(&self, id: CheckoutId) -> Result<CheckoutState, CheckoutError> {
        self.get(id)
            .await?
            .map(|checkout| checkout.state)
            .ok_or_else(|| CheckoutError::NotFound(id.to_string()))
    }

    /// Starts an order of `order_type`.
    ///
    /// Either asks for the customer's details or, for a returning dine-in or
    /// takeaway customer, places the order right away.
    #[instrument(skip(self))]
    pub async fn initiate(
        &self,
        id: CheckoutId,
        order_type: OrderType,
    ) -> Result<CheckoutStep, CheckoutError> {
        info!("Initiating order");
        match self.act(id, CheckoutAction::Initiate(order_type)).await? {
            CheckoutActionResult::Initiate(step) => Ok(step),
            other => unreachable!("Initiate action must return Initiate result, got {other:?}"),
        }
    }

    #[instrument(skip(self, details))]
    pub async fn submit(
        &self,
        id: CheckoutId,
        details: CustomerDetails,
    ) -> Result<Confirmation, CheckoutError> {
        debug!(?details, "submit called");
        match self.act(id, CheckoutAction::Submit(details)).await? {
            CheckoutActionResult::Submit(confirmation) => Ok(confirmation),
            other => unreachable!("Submit action must return Submit result, got {other:?}"),
        }
    }

    #[instrument(skip(self))]
    pub async fn cancel(&self, id: CheckoutId) -> Result<(), CheckoutError> {
        match self.act(id, CheckoutAction::Cancel).await? {
            CheckoutActionResult::Cancel(()) => Ok(()),
            other => unreachable!("Cancel action must return Cancel result, got {other:?}"),
        }
    }

    async fn act(
        &self,
        id: CheckoutId,
        action: CheckoutAction,
    ) -> Result<CheckoutActionResult, CheckoutError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }
}
