//! Custom actions for the Checkout actor.

use super::messages::Confirmation;
use crate::model::{BusinessInfo, CartId, CustomerDetails, DeskNumber, IdentityForm, OrderType, ShopId};

/// Payload for opening a checkout alongside a cart.
#[derive(Debug, Clone)]
pub struct CheckoutCreate {
    pub cart_id: CartId,
    pub shop_id: ShopId,
    pub offers: BusinessInfo,
    pub desk: Option<DeskNumber>,
}

#[derive(Debug, Clone)]
pub enum CheckoutAction {
    /// Starts an order of the given type.
    Initiate(OrderType),
    /// Completes identity collection and places the order.
    Submit(CustomerDetails),
    /// Abandons identity collection.
    Cancel,
}

/// Where initiating an order led.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutStep {
    /// The customer has to fill in the form.
    CollectIdentity(IdentityForm),
    /// The identity was already known and the order went straight through.
    Placed(Confirmation),
}

/// Results from CheckoutActions - variants match 1:1 with CheckoutAction
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutActionResult {
    Initiate(CheckoutStep),
    Submit(Confirmation),
    Cancel(()),
}
