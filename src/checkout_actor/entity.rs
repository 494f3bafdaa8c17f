//! [`ActorEntity`] implementation for [`Checkout`]: the order-flow state machine.

use super::actions::{CheckoutAction, CheckoutActionResult, CheckoutCreate, CheckoutStep};
use super::error::{CheckoutError, RETRY_MESSAGE};
use super::messages::Confirmation;
use super::CheckoutContext;
use crate::framework::ActorEntity;
use crate::model::{
    Checkout, CheckoutId, CheckoutState, CustomerDetails, CustomerIdentity, Fulfillment,
    IdentityForm, OrderDraft, OrderType,
};
use async_trait::async_trait;
use rand::Rng;
use tracing::{debug, info, warn};

#[async_trait]
impl ActorEntity for Checkout {
    type Id = CheckoutId;
    type Create = CheckoutCreate;
    type Action = CheckoutAction;
    type ActionResult = CheckoutActionResult;
    type Context = CheckoutContext;
    type Error = CheckoutError;

    fn from_create_params(id: CheckoutId, params: CheckoutCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            cart_id: params.cart_id,
            shop_id: params.shop_id,
            offers: params.offers,
            desk: params.desk,
            state: CheckoutState::Idle,
        })
    }

    /// Refuses to open a checkout for a cart that does not exist.
    async fn on_create(&mut self, ctx: &CheckoutContext) -> Result<(), Self::Error> {
        ctx.cart.snapshot(self.cart_id).await?;
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: CheckoutAction,
        ctx: &CheckoutContext,
    ) -> Result<CheckoutActionResult, Self::Error> {
        match action {
            CheckoutAction::Initiate(order_type) => self
                .initiate(order_type, ctx)
                .await
                .map(CheckoutActionResult::Initiate),
            CheckoutAction::Submit(details) => self
                .submit(details, ctx)
                .await
                .map(CheckoutActionResult::Submit),
            CheckoutAction::Cancel => {
                if matches!(self.state, CheckoutState::CollectingIdentity(_)) {
                    debug!(checkout = %self.id, "Identity collection cancelled");
                    self.state = CheckoutState::Idle;
                }
                Ok(CheckoutActionResult::Cancel(()))
            }
        }
    }
}

impl Checkout {
    async fn initiate(
        &mut self,
        order_type: OrderType,
        ctx: &CheckoutContext,
    ) -> Result<CheckoutStep, CheckoutError> {
        if matches!(self.state, CheckoutState::Submitting { .. }) {
            return Err(CheckoutError::SubmissionInFlight);
        }
        if !self.accepts(order_type) {
            return Err(CheckoutError::OrderTypeUnavailable(order_type));
        }
        if order_type == OrderType::DineIn && self.desk.is_none() {
            return Err(CheckoutError::MissingDesk);
        }
        if ctx.cart.snapshot(self.cart_id).await?.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let known = match ctx.identity.get().await {
            Ok(identity) => identity,
            Err(e) => {
                warn!(checkout = %self.id, error = %e, "Identity memo unreadable");
                None
            }
        };

        match (order_type, known) {
            (OrderType::DineIn | OrderType::Takeaway, Some(identity)) => {
                info!(checkout = %self.id, %order_type, "Known customer, placing order directly");
                let details = CustomerDetails::contact(identity.name, identity.phone);
                self.place(order_type, details, ctx)
                    .await
                    .map(CheckoutStep::Placed)
            }
            (_, prefill) => {
                let form = IdentityForm::new(order_type, prefill);
                self.state = CheckoutState::CollectingIdentity(form.clone());
                Ok(CheckoutStep::CollectIdentity(form))
            }
        }
    }

    async fn submit(
        &mut self,
        details: CustomerDetails,
        ctx: &CheckoutContext,
    ) -> Result<Confirmation, CheckoutError> {
        let CheckoutState::CollectingIdentity(form) = &self.state else {
            return Err(match self.state {
                CheckoutState::Submitting { .. } => CheckoutError::SubmissionInFlight,
                _ => CheckoutError::NotCollecting,
            });
        };
        let order_type = form.order_type;
        let details = merge_prefill(details, form.prefill.as_ref());
        self.place(order_type, details, ctx).await
    }

    /// Builds the draft from a fresh cart snapshot and sends it exactly once.
    async fn place(
        &mut self,
        order_type: OrderType,
        details: CustomerDetails,
        ctx: &CheckoutContext,
    ) -> Result<Confirmation, CheckoutError> {
        let customer = CustomerIdentity::new(
            required(details.name.as_deref(), "name")?,
            required(details.phone.as_deref(), "phone")?,
        );
        let fulfillment = match order_type {
            OrderType::DineIn => Fulfillment::DineIn {
                desk: self.desk.ok_or(CheckoutError::MissingDesk)?,
            },
            OrderType::Takeaway => Fulfillment::Takeaway,
            OrderType::Delivery => Fulfillment::Delivery {
                address: required(details.address.as_deref(), "address")?,
                landmark: optional(details.landmark.as_deref()),
                notes: optional(details.notes.as_deref()),
            },
        };

        let cart = ctx.cart.snapshot(self.cart_id).await?;
        let draft = OrderDraft::new(self.shop_id, customer.clone(), fulfillment, &cart)
            .map_err(|_| CheckoutError::EmptyCart)?;

        self.state = CheckoutState::Submitting { order_type };
        debug!(checkout = %self.id, ?draft, "Submitting order");

        let outcome = tokio::time::timeout(ctx.submit_timeout, ctx.gateway.create_order(&draft)).await;
        let created = match outcome {
            Ok(Ok(created)) => created,
            Ok(Err(e)) => return Err(self.fail(order_type, &e.to_string())),
            Err(_) => {
                let reason = format!("no response within {:?}", ctx.submit_timeout);
                return Err(self.fail(order_type, &reason));
            }
        };

        let order_number = created
            .order_number
            .unwrap_or_else(|| fallback_order_number(order_type));
        info!(checkout = %self.id, %order_type, %order_number, "Order placed");

        if let Err(e) = ctx.cart.clear(self.cart_id).await {
            warn!(checkout = %self.id, error = %e, "Order placed but cart not cleared");
        }
        if let Err(e) = ctx.identity.set(&customer).await {
            warn!(checkout = %self.id, error = %e, "Could not remember customer");
        }

        self.state = CheckoutState::Succeeded {
            order_type,
            order_number: order_number.clone(),
        };
        Ok(Confirmation::new(order_type, order_number, &customer))
    }

    fn fail(&mut self, order_type: OrderType, reason: &str) -> CheckoutError {
        warn!(checkout = %self.id, %order_type, reason, "Order submission failed");
        self.state = CheckoutState::Failed {
            order_type,
            message: RETRY_MESSAGE.to_string(),
        };
        CheckoutError::SubmissionFailed(RETRY_MESSAGE.to_string())
    }
}

/// Fills fields the customer left empty from the remembered identity.
fn merge_prefill(mut details: CustomerDetails, prefill: Option<&CustomerIdentity>) -> CustomerDetails {
    if let Some(known) = prefill {
        if optional(details.name.as_deref()).is_none() {
            details.name = Some(known.name.clone());
        }
        if optional(details.phone.as_deref()).is_none() {
            details.phone = Some(known.phone.clone());
        }
    }
    details
}

fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn required(value: Option<&str>, field: &'static str) -> Result<String, CheckoutError> {
    optional(value).ok_or(CheckoutError::MissingField(field))
}

/// Local order number for when the service does not return one.
fn fallback_order_number(order_type: OrderType) -> String {
    let n: u32 = rand::thread_rng().gen_range(0..10_000);
    match order_type.number_prefix() {
        Some(prefix) => format!("{prefix}-{n:04}"),
        None => {
            warn!(%order_type, "Service returned no order number, issuing an unprefixed one");
            format!("{n:04}")
        }
    }
}
