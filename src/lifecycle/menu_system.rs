use crate::cart_actor::CartError;
use crate::checkout_actor::{CheckoutContext, CheckoutCreate, CheckoutError};
use crate::clients::{CartClient, CheckoutClient};
use crate::config::Config;
use crate::framework::ActorClient;
use crate::gateway::OrderGateway;
use crate::identity::IdentityMemo;
use crate::model::{CartId, CheckoutId, DeskNumber, Shop, ShopId};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// One customer's visit: a cart and the checkout that will submit it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuSession {
    pub shop_id: ShopId,
    pub desk: Option<DeskNumber>,
    pub cart_id: CartId,
    pub checkout_id: CheckoutId,
}

/// The running menu: cart and checkout actors plus their shared dependencies.
///
/// # Example
///
/// ```ignore
/// let system = MenuSystem::new(gateway, IdentityMemo::in_memory(), &config);
/// let session = system.open_session(&shop, DeskNumber::new(12)).await?;
/// system.cart_client.add(session.cart_id, product, vec![]).await?;
/// let step = system.checkout_client.initiate(session.checkout_id, OrderType::DineIn).await?;
/// system.shutdown().await?;
/// ```
pub struct MenuSystem {
    pub cart_client: CartClient,
    pub checkout_client: CheckoutClient,
    pub identity: IdentityMemo,
    // Checkout first: its context holds a CartClient that keeps the cart actor alive.
    checkout_handle: JoinHandle<()>,
    cart_handle: JoinHandle<()>,
}

impl MenuSystem {
    /// Spawns the actors on the current Tokio runtime.
    pub fn new(gateway: Arc<dyn OrderGateway>, identity: IdentityMemo, config: &Config) -> Self {
        let (cart_actor, cart_client) = crate::cart_actor::new(config.actor_buffer);
        let (checkout_actor, checkout_client) = crate::checkout_actor::new(config.actor_buffer);

        let cart_handle = tokio::spawn(cart_actor.run(()));
        let checkout_handle = tokio::spawn(checkout_actor.run(CheckoutContext {
            cart: cart_client.clone(),
            identity: identity.clone(),
            gateway,
            submit_timeout: config.submit_timeout,
        }));

        Self {
            cart_client,
            checkout_client,
            identity,
            checkout_handle,
            cart_handle,
        }
    }

    /// Opens an empty cart and its checkout for `shop`.
    ///
    /// `desk` comes from the table's QR code; without it dine-in is refused later.
    pub async fn open_session(
        &self,
        shop: &Shop,
        desk: Option<DeskNumber>,
    ) -> Result<MenuSession, CheckoutError> {
        let cart_id = self.cart_client.open().await?;
        let checkout_id = self
            .checkout_client
            .open(CheckoutCreate {
                cart_id,
                shop_id: shop.id,
                offers: shop.business_info.clone(),
                desk,
            })
            .await?;
        info!(shop = %shop.id, ?desk, %cart_id, %checkout_id, "Session opened");
        Ok(MenuSession {
            shop_id: shop.id,
            desk,
            cart_id,
            checkout_id,
        })
    }

    /// Drops the session's checkout and cart.
    pub async fn close_session(&self, session: MenuSession) -> Result<(), CheckoutError> {
        self.checkout_client.delete(session.checkout_id).await?;
        match self.cart_client.delete(session.cart_id).await {
            Ok(()) | Err(CartError::NotFound(_)) => {}
            Err(e) => return Err(e.into()),
        }
        info!(cart = %session.cart_id, checkout = %session.checkout_id, "Session closed");
        Ok(())
    }

    /// Stops both actors and waits for them to finish.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down menu...");

        drop(self.checkout_client);
        if let Err(e) = self.checkout_handle.await {
            error!("Checkout actor failed: {:?}", e);
            return Err(format!("Checkout actor failed: {:?}", e));
        }

        drop(self.cart_client);
        if let Err(e) = self.cart_handle.await {
            error!("Cart actor failed: {:?}", e);
            return Err(format!("Cart actor failed: {:?}", e));
        }

        info!("Menu shutdown complete.");
        Ok(())
    }
}
