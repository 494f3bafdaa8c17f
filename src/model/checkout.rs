//! The checkout flow of one menu session.
//!
//! # Actor Framework
//! [`Checkout`] implements [`ActorEntity`](crate::framework::ActorEntity) in
//! [`checkout_actor`](crate::checkout_actor), where the state transitions live.

use crate::model::{BusinessInfo, CartId, CustomerIdentity, DeskNumber, OrderType, ShopId};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for checkouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CheckoutId(pub u32);

impl From<u32> for CheckoutId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for CheckoutId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "checkout_{}", self.0)
    }
}

/// A field the customer has to fill in before an order can be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Phone,
    Address,
    Landmark,
    Notes,
}

impl FormField {
    pub fn is_required(self) -> bool {
        matches!(self, FormField::Name | FormField::Phone | FormField::Address)
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Phone => "phone",
            FormField::Address => "address",
            FormField::Landmark => "landmark",
            FormField::Notes => "notes",
        }
    }
}

/// What to ask the customer for, with known values filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityForm {
    pub order_type: OrderType,
    pub fields: Vec<FormField>,
    pub prefill: Option<CustomerIdentity>,
}

impl IdentityForm {
    pub fn new(order_type: OrderType, prefill: Option<CustomerIdentity>) -> Self {
        let fields = match order_type {
            OrderType::DineIn | OrderType::Takeaway => vec![FormField::Name, FormField::Phone],
            OrderType::Delivery => vec![
                FormField::Name,
                FormField::Phone,
                FormField::Address,
                FormField::Landmark,
                FormField::Notes,
            ],
        };
        Self {
            order_type,
            fields,
            prefill,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CheckoutState {
    #[default]
    Idle,
    CollectingIdentity(IdentityForm),
    Submitting {
        order_type: OrderType,
    },
    Succeeded {
        order_type: OrderType,
        order_number: String,
    },
    Failed {
        order_type: OrderType,
        message: String,
    },
}

#[derive(Debug, Clone)]
pub struct Checkout {
    pub id: CheckoutId,
    pub cart_id: CartId,
    pub shop_id: ShopId,
    /// Order types the shop accepts.
    pub offers: BusinessInfo,
    /// Set when the session was opened from a table QR code.
    pub desk: Option<DeskNumber>,
    pub state: CheckoutState,
}

impl Checkout {
    pub fn accepts(&self, order_type: OrderType) -> bool {
        match order_type {
            OrderType::DineIn => self.offers.has_dine_in,
            OrderType::Takeaway => self.offers.has_takeaway,
            OrderType::Delivery => self.offers.has_delivery,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_form_asks_for_address() {
        let form = IdentityForm::new(OrderType::Delivery, None);
        assert!(form.fields.contains(&FormField::Address));
        assert!(!FormField::Landmark.is_required());

        let form = IdentityForm::new(OrderType::Takeaway, None);
        assert_eq!(form.fields, vec![FormField::Name, FormField::Phone]);
    }
}
