use serde_json::Value;
use std::time::Duration;
use tracing::warn;

pub const ORDER_UPDATED: &str = "order-updated";
pub const DESK_FREED: &str = "desk-freed";

const LEGACY_ORDER_UPDATED: &str = "order updated";
const LEGACY_DESK_FREED: &str = "desk freed";

const ORDER_UPDATED_FALLBACK: &str = "Your order status changed. Please review the details.";

/// An event as it came off the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEvent {
    pub name: String,
    pub payload: Value,
}

impl RawEvent {
    pub fn new(name: impl Into<String>, payload: Value) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RealtimeEvent {
    OrderUpdated { message: Option<String> },
    DeskFreed,
}

impl RealtimeEvent {
    /// Recognizes the events the customer cares about; anything else is `None`.
    pub fn parse(raw: &RawEvent) -> Option<Self> {
        let name = match raw.name.as_str() {
            LEGACY_ORDER_UPDATED => {
                warn!(name = %raw.name, canonical = ORDER_UPDATED, "Deprecated event name");
                ORDER_UPDATED
            }
            LEGACY_DESK_FREED => {
                warn!(name = %raw.name, canonical = DESK_FREED, "Deprecated event name");
                DESK_FREED
            }
            other => other,
        };

        match name {
            ORDER_UPDATED => Some(Self::OrderUpdated {
                message: raw
                    .payload
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|m| !m.is_empty())
                    .map(str::to_string),
            }),
            DESK_FREED => Some(Self::DeskFreed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    OrderUpdate,
    Farewell,
}

/// A toast-style message for the customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
    /// How long the host should keep it on screen.
    pub display_for: Duration,
}

impl From<RealtimeEvent> for Alert {
    fn from(event: RealtimeEvent) -> Self {
        match event {
            RealtimeEvent::OrderUpdated { message } => Alert {
                kind: AlertKind::OrderUpdate,
                title: "Order update".to_string(),
                message: message.unwrap_or_else(|| ORDER_UPDATED_FALLBACK.to_string()),
                display_for: Duration::from_secs(5),
            },
            RealtimeEvent::DeskFreed => Alert {
                kind: AlertKind::Farewell,
                title: "Thank you for visiting".to_string(),
                message: "We hope you enjoyed your time with us. We look forward to seeing you again soon!"
                    .to_string(),
                display_for: Duration::from_secs(8),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_updated_uses_payload_message() {
        let raw = RawEvent::new(ORDER_UPDATED, json!({"message": "Order #12 is being prepared"}));
        let alert = Alert::from(RealtimeEvent::parse(&raw).unwrap());
        assert_eq!(alert.kind, AlertKind::OrderUpdate);
        assert_eq!(alert.message, "Order #12 is being prepared");
    }

    #[test]
    fn test_order_updated_without_message_falls_back() {
        for payload in [json!({}), json!({"message": ""}), json!({"message": 7}), Value::Null] {
            let event = RealtimeEvent::parse(&RawEvent::new(ORDER_UPDATED, payload)).unwrap();
            assert_eq!(Alert::from(event).message, ORDER_UPDATED_FALLBACK);
        }
    }

    #[test]
    fn test_legacy_names_still_accepted() {
        let updated = RealtimeEvent::parse(&RawEvent::new("order updated", json!({}))).unwrap();
        assert_eq!(updated, RealtimeEvent::OrderUpdated { message: None });

        let freed = RealtimeEvent::parse(&RawEvent::new("desk freed", json!({}))).unwrap();
        assert_eq!(freed, RealtimeEvent::DeskFreed);
    }

    #[test]
    fn test_desk_freed_is_a_farewell() {
        let alert = Alert::from(RealtimeEvent::DeskFreed);
        assert_eq!(alert.kind, AlertKind::Farewell);
        assert_eq!(alert.title, "Thank you for visiting");
    }

    #[test]
    fn test_unknown_events_ignored() {
        assert!(RealtimeEvent::parse(&RawEvent::new("order-created", json!({}))).is_none());
        assert!(RealtimeEvent::parse(&RawEvent::new("Order-Updated", json!({}))).is_none());
    }
}
