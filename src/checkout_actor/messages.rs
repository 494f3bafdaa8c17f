//! Customer-facing confirmation copy for a placed order.

use crate::model::{CustomerIdentity, OrderType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub order_type: OrderType,
    pub order_number: String,
    pub title: String,
    pub lines: Vec<String>,
}

impl Confirmation {
    pub fn new(order_type: OrderType, order_number: String, customer: &CustomerIdentity) -> Self {
        let (title, lines) = match order_type {
            OrderType::DineIn => (
                "Your order has been received!".to_string(),
                vec![
                    "Your order is now being prepared.".to_string(),
                    "Estimated preparation time: 15-20 minutes.".to_string(),
                ],
            ),
            OrderType::Takeaway => (
                "Your order is ready for pickup!".to_string(),
                vec![
                    format!("Thank you for your order, {}.", customer.name),
                    "Please proceed to pay and collect your order.".to_string(),
                ],
            ),
            OrderType::Delivery => (
                "Delivery order confirmed!".to_string(),
                vec![
                    format!("Thank you {}, your order is on its way.", customer.name),
                    format!("We will contact you at {} shortly.", customer.phone),
                ],
            ),
        };
        Self {
            order_type,
            order_number,
            title,
            lines,
        }
    }

    /// Whole message as one block, order number last.
    pub fn render(&self) -> String {
        let mut out = self.title.clone();
        for line in &self.lines {
            out.push('\n');
            out.push_str(line);
        }
        out.push_str(&format!("\nOrder number: {}", self.order_number));
        out
    }
}
