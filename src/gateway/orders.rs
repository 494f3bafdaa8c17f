//! Order creation and history over HTTP.

use super::{endpoint, GatewayError};
use crate::model::{
    sort_newest_first, CreatedOrder, CustomerIdentity, Fulfillment, Modifier, OrderDraft,
    OrderSummary, OrderType, ShopId,
};
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// The order-creation endpoint, as seen by the checkout flow.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Places one order. Called at most once per draft.
    async fn create_order(&self, draft: &OrderDraft) -> Result<CreatedOrder, GatewayError>;

    /// Order history, newest first. Scoped to `customer` when one is known.
    async fn list_orders(
        &self,
        customer: Option<&CustomerIdentity>,
    ) -> Result<Vec<OrderSummary>, GatewayError>;
}

#[derive(Debug, Clone)]
pub struct HttpOrderGateway {
    base_url: String,
    http: Client,
}

impl HttpOrderGateway {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        Ok(Self {
            base_url: base_url.into(),
            http: Client::builder().timeout(timeout).build()?,
        })
    }
}

#[async_trait]
impl OrderGateway for HttpOrderGateway {
    #[instrument(skip(self, draft), fields(order_type = %draft.order_type()))]
    async fn create_order(&self, draft: &OrderDraft) -> Result<CreatedOrder, GatewayError> {
        let body = CreateOrderRequest::from(draft);
        debug!(?body, "create_order payload");

        let response = self
            .http
            .post(endpoint(&self.base_url, "orders"))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            warn!(status, "Order rejected");
            return Err(GatewayError::Rejected { status, body });
        }

        let created = parse_created(response.json().await?)?;
        info!(order_number = ?created.order_number, "Order accepted");
        Ok(created)
    }

    #[instrument(skip(self, customer))]
    async fn list_orders(
        &self,
        customer: Option<&CustomerIdentity>,
    ) -> Result<Vec<OrderSummary>, GatewayError> {
        let mut request = self.http.get(endpoint(&self.base_url, "orders"));
        if let Some(customer) = customer {
            request = request.query(&[("customer_phone", customer.phone.as_str())]);
        }
        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Rejected { status, body });
        }

        let mut orders = parse_list(response.json().await?)?;
        sort_newest_first(&mut orders);
        debug!(count = orders.len(), "Orders fetched");
        Ok(orders)
    }
}

/// Wire shape of `POST /orders`.
#[derive(Debug, Serialize)]
pub(crate) struct CreateOrderRequest<'a> {
    shop_id: ShopId,
    order_type: OrderType,
    status: &'static str,
    payment_status: &'static str,
    customer_name: &'a str,
    customer_phone: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    desk_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    takeaway_customer_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    takeaway_customer_phone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    delivery_customer_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    delivery_customer_phone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    delivery_address: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    delivery_landmark: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    delivery_instructions: Option<&'a str>,
    items: Vec<OrderItemRequest<'a>>,
}

#[derive(Debug, Serialize)]
struct OrderItemRequest<'a> {
    product_id: u64,
    quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
    notes: Option<&'a str>,
    modifiers: Vec<ModifierRequest<'a>>,
}

#[derive(Debug, Serialize)]
struct ModifierRequest<'a> {
    name: &'a str,
    #[serde(with = "rust_decimal::serde::float_option")]
    price_adjustment: Option<Decimal>,
}

impl<'a> From<&'a Modifier> for ModifierRequest<'a> {
    fn from(modifier: &'a Modifier) -> Self {
        Self {
            name: &modifier.name,
            price_adjustment: modifier.price_adjustment,
        }
    }
}

impl<'a> From<&'a OrderDraft> for CreateOrderRequest<'a> {
    fn from(draft: &'a OrderDraft) -> Self {
        let customer = draft.customer();
        let mut request = CreateOrderRequest {
            shop_id: draft.shop_id(),
            order_type: draft.order_type(),
            status: "pending",
            payment_status: "unpaid",
            customer_name: &customer.name,
            customer_phone: &customer.phone,
            desk_number: None,
            takeaway_customer_name: None,
            takeaway_customer_phone: None,
            delivery_customer_name: None,
            delivery_customer_phone: None,
            delivery_address: None,
            delivery_landmark: None,
            delivery_instructions: None,
            items: draft
                .items()
                .iter()
                .map(|item| OrderItemRequest {
                    product_id: item.product_id.0,
                    quantity: item.quantity,
                    price: item.unit_price,
                    notes: None,
                    modifiers: item.modifiers.iter().map(ModifierRequest::from).collect(),
                })
                .collect(),
        };

        match draft.fulfillment() {
            Fulfillment::DineIn { desk } => request.desk_number = Some(desk.get()),
            Fulfillment::Takeaway => {
                request.takeaway_customer_name = Some(customer.name.as_str());
                request.takeaway_customer_phone = Some(customer.phone.as_str());
            }
            Fulfillment::Delivery {
                address,
                landmark,
                notes,
            } => {
                request.delivery_customer_name = Some(customer.name.as_str());
                request.delivery_customer_phone = Some(customer.phone.as_str());
                request.delivery_address = Some(address.as_str());
                request.delivery_landmark = landmark.as_deref();
                request.delivery_instructions = notes.as_deref();
            }
        }
        request
    }
}

/// The created order may come back bare or wrapped in `order` / `data`.
fn parse_created(body: Value) -> Result<CreatedOrder, GatewayError> {
    let order = ["order", "data"]
        .iter()
        .find_map(|key| body.get(key).filter(|v| v.is_object()).cloned())
        .unwrap_or(body);
    if !order.is_object() {
        return Err(GatewayError::UnexpectedResponse(format!(
            "expected an order object, got {order}"
        )));
    }
    let order_number = match order.get("order_number") {
        Some(Value::String(number)) if !number.trim().is_empty() => Some(number.clone()),
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    };
    Ok(CreatedOrder {
        id: order.get("id").and_then(Value::as_u64),
        order_number,
    })
}

fn parse_list(body: Value) -> Result<Vec<OrderSummary>, GatewayError> {
    let list = match body {
        Value::Array(_) => body,
        Value::Object(mut map) => map
            .remove("data")
            .or_else(|| map.remove("orders"))
            .unwrap_or(Value::Array(Vec::new())),
        other => {
            return Err(GatewayError::UnexpectedResponse(format!(
                "expected a list of orders, got {other}"
            )))
        }
    };
    serde_json::from_value(list).map_err(|e| GatewayError::UnexpectedResponse(e.to_string()))
}
