//! Fixtures shared by the integration tests: a scripted order gateway and a shop.

#![allow(dead_code)]

use async_trait::async_trait;
use emenu::gateway::{GatewayError, OrderGateway};
use emenu::model::{
    BusinessInfo, CreatedOrder, CustomerIdentity, Modifier, OrderDraft, OrderSummary, Product, Shop,
    ShopId,
};
use rust_decimal_macros::dec;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// How the fake order service answers.
#[derive(Debug, Clone)]
pub enum Reply {
    Number(Option<String>),
    Reject(u16),
    Hang,
}

/// Records every draft it receives and answers with a fixed [`Reply`].
#[derive(Debug)]
pub struct FakeGateway {
    reply: Mutex<Reply>,
    drafts: Mutex<Vec<OrderDraft>>,
}

impl FakeGateway {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply: Mutex::new(reply),
            drafts: Mutex::new(Vec::new()),
        })
    }

    pub fn answering(number: &str) -> Arc<Self> {
        Self::new(Reply::Number(Some(number.to_string())))
    }

    pub fn set_reply(&self, reply: Reply) {
        *self.reply.lock().unwrap() = reply;
    }

    pub fn drafts(&self) -> Vec<OrderDraft> {
        self.drafts.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.drafts.lock().unwrap().len()
    }
}

#[async_trait]
impl OrderGateway for FakeGateway {
    async fn create_order(&self, draft: &OrderDraft) -> Result<CreatedOrder, GatewayError> {
        self.drafts.lock().unwrap().push(draft.clone());
        let reply = self.reply.lock().unwrap().clone();
        match reply {
            Reply::Number(order_number) => Ok(CreatedOrder {
                id: Some(1),
                order_number,
            }),
            Reply::Reject(status) => Err(GatewayError::Rejected {
                status,
                body: "unavailable".to_string(),
            }),
            Reply::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(CreatedOrder::default())
            }
        }
    }

    async fn list_orders(
        &self,
        _customer: Option<&CustomerIdentity>,
    ) -> Result<Vec<OrderSummary>, GatewayError> {
        Ok(Vec::new())
    }
}

pub fn burger() -> Product {
    Product::new(1, "Burger", dec!(8.00))
}

/// 10.00 with a Small/Large variation and a +2.50 cheese add-on.
pub fn pizza() -> Product {
    Product::new(2, "Pizza", dec!(10.00)).with_modifiers(vec![
        Modifier::variation("Small"),
        Modifier::variation("Large"),
        Modifier::addon("Extra cheese", dec!(2.50)),
    ])
}

pub fn shop() -> Shop {
    Shop {
        id: ShopId(7),
        name: "Nile Grill".to_string(),
        description: None,
        business_info: BusinessInfo::all(),
        theme: None,
        categories: Vec::new(),
        products: vec![burger(), pizza(), Product::new(3, "Soup", dec!(4.00)).inactive()],
    }
}

pub fn sara() -> CustomerIdentity {
    CustomerIdentity::new("Sara", "0100000000")
}
