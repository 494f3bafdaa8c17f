//! Order types: what the customer asks for and what the order service reports back.

use crate::model::{Cart, DeskNumber, Modifier, ProductId, ShopId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    DineIn,
    Takeaway,
    Delivery,
}

impl OrderType {
    /// Prefix of a locally generated order number. Dine-in numbers carry none.
    pub fn number_prefix(self) -> Option<&'static str> {
        match self {
            OrderType::DineIn => None,
            OrderType::Takeaway => Some("T"),
            OrderType::Delivery => Some("D"),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderType::DineIn => "dine_in",
            OrderType::Takeaway => "takeaway",
            OrderType::Delivery => "delivery",
        }
    }
}

impl Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "dine_in" | "dinein" => Ok(OrderType::DineIn),
            "takeaway" => Ok(OrderType::Takeaway),
            "delivery" => Ok(OrderType::Delivery),
            other => Err(format!("unknown order type `{other}`")),
        }
    }
}

/// The remembered customer: enough to place dine-in and takeaway orders without
/// asking again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerIdentity {
    pub name: String,
    pub phone: String,
}

impl CustomerIdentity {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
        }
    }
}

/// Raw form input collected during checkout. Fields not asked for stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerDetails {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub landmark: Option<String>,
    pub notes: Option<String>,
}

impl CustomerDetails {
    pub fn contact(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            phone: Some(phone.into()),
            ..Self::default()
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_landmark(mut self, landmark: impl Into<String>) -> Self {
        self.landmark = Some(landmark.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// How the order reaches the customer, with the data each mode needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fulfillment {
    DineIn {
        desk: DeskNumber,
    },
    Takeaway,
    Delivery {
        address: String,
        landmark: Option<String>,
        notes: Option<String>,
    },
}

impl Fulfillment {
    pub fn order_type(&self) -> OrderType {
        match self {
            Fulfillment::DineIn { .. } => OrderType::DineIn,
            Fulfillment::Takeaway => OrderType::Takeaway,
            Fulfillment::Delivery { .. } => OrderType::Delivery,
        }
    }
}

/// One cart line flattened for submission.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftItem {
    pub product_id: ProductId,
    pub quantity: u32,
    /// Base price of the product; adjustments travel in `modifiers`.
    pub unit_price: Decimal,
    pub modifiers: Vec<Modifier>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DraftError {
    #[error("cannot build an order from an empty cart")]
    EmptyCart,
}

/// An immutable order request, built from a cart snapshot at submission time.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    shop_id: ShopId,
    customer: CustomerIdentity,
    fulfillment: Fulfillment,
    items: Vec<DraftItem>,
}

impl OrderDraft {
    pub fn new(
        shop_id: ShopId,
        customer: CustomerIdentity,
        fulfillment: Fulfillment,
        cart: &Cart,
    ) -> Result<Self, DraftError> {
        if cart.is_empty() {
            return Err(DraftError::EmptyCart);
        }
        let items = cart
            .lines
            .iter()
            .map(|line| DraftItem {
                product_id: line.product.id,
                quantity: line.quantity,
                unit_price: line.product.price,
                modifiers: line.modifiers.clone(),
            })
            .collect();
        Ok(Self {
            shop_id,
            customer,
            fulfillment,
            items,
        })
    }

    pub fn shop_id(&self) -> ShopId {
        self.shop_id
    }

    pub fn order_type(&self) -> OrderType {
        self.fulfillment.order_type()
    }

    pub fn customer(&self) -> &CustomerIdentity {
        &self.customer
    }

    pub fn fulfillment(&self) -> &Fulfillment {
        &self.fulfillment
    }

    pub fn items(&self) -> &[DraftItem] {
        &self.items
    }
}

/// What the order service returned for a created order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreatedOrder {
    pub id: Option<u64>,
    /// Absent when the service did not issue one.
    pub order_number: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Served,
    OutForDelivery,
    Delivered,
    Completed,
    Cancelled,
    Refunded,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Ready => "Ready",
            OrderStatus::Served => "Served",
            OrderStatus::OutForDelivery => "Out for delivery",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Refunded => "Refunded",
            OrderStatus::Unknown => "Unknown",
        }
    }
}

/// An entry of the customer's order history.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderSummary {
    pub id: u64,
    #[serde(default)]
    pub order_number: Option<String>,
    pub status: OrderStatus,
    pub order_type: OrderType,
    #[serde(default)]
    pub total: Decimal,
    #[serde(default)]
    pub placed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, rename = "order_items")]
    pub items: Vec<OrderSummaryItem>,
}

/// One line of a past order, as the order service reports it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderSummaryItem {
    pub quantity: u32,
    #[serde(default)]
    pub product: Option<OrderedProduct>,
    #[serde(default, rename = "order_item_modifiers")]
    pub modifiers: Vec<Modifier>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderedProduct {
    pub name: String,
    #[serde(default)]
    pub price: Decimal,
}

impl OrderSummaryItem {
    pub fn name(&self) -> &str {
        self.product.as_ref().map_or("?", |p| p.name.as_str())
    }

    /// Quantity times the product price plus every add-on adjustment.
    pub fn subtotal(&self) -> Decimal {
        let base = self.product.as_ref().map_or(Decimal::ZERO, |p| p.price);
        let extras: Decimal = self.modifiers.iter().filter_map(|m| m.price_adjustment).sum();
        (base + extras) * Decimal::from(self.quantity)
    }
}

impl OrderSummary {
    /// The number shown to the customer, falling back to the raw id.
    pub fn display_number(&self) -> String {
        self.order_number
            .clone()
            .unwrap_or_else(|| self.id.to_string())
    }

    fn sort_time(&self) -> Option<DateTime<Utc>> {
        self.placed_at.or(self.created_at)
    }
}

/// Orders the history newest first, by placement time or creation time.
pub fn sort_newest_first(orders: &mut [OrderSummary]) {
    orders.sort_by(|a, b| b.sort_time().cmp(&a.sort_time()));
}
