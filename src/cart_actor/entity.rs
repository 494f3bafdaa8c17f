//! [`ActorEntity`] implementation for [`Cart`].

use super::actions::{CartAction, CartActionResult, CartCreate};
use super::error::CartError;
use crate::framework::ActorEntity;
use crate::model::{Cart, CartId, CartLine, LineKey, Modifier, Product};
use crate::modifiers::validate_selection;
use async_trait::async_trait;
use tracing::{debug, info};

#[async_trait]
impl ActorEntity for Cart {
    type Id = CartId;
    type Create = CartCreate;
    type Action = CartAction;
    type ActionResult = CartActionResult;
    type Context = ();
    type Error = CartError;

    fn from_create_params(id: CartId, _params: CartCreate) -> Result<Self, Self::Error> {
        Ok(Cart::new(id))
    }

    async fn handle_action(
        &mut self,
        action: CartAction,
        _ctx: &Self::Context,
    ) -> Result<CartActionResult, Self::Error> {
        match action {
            CartAction::Add { product, modifiers } => {
                self.add(product, modifiers).map(CartActionResult::Add)
            }
            CartAction::Increase(key) => Ok(CartActionResult::Increase(self.increase(&key))),
            CartAction::Decrease(key) => Ok(CartActionResult::Decrease(self.decrease(&key))),
            CartAction::Remove(key) => {
                let before = self.lines.len();
                self.lines.retain(|line| line.key != key);
                Ok(CartActionResult::Remove(self.lines.len() != before))
            }
            CartAction::Clear => {
                self.lines.clear();
                info!(cart = %self.id, "Cart cleared");
                Ok(CartActionResult::Clear(()))
            }
        }
    }
}

impl Cart {
    fn add(&mut self, product: Product, modifiers: Vec<Modifier>) -> Result<CartLine, CartError> {
        if !product.is_active {
            return Err(CartError::Unavailable(product.name));
        }
        validate_selection(&product, &modifiers)?;

        let key = LineKey::new(product.id, &modifiers);
        if let Some(line) = self.lines.iter_mut().find(|line| line.key == key) {
            line.quantity += 1;
            debug!(cart = %self.id, %key, quantity = line.quantity, "Merged into line");
            return Ok(line.clone());
        }

        let line = CartLine::new(product, modifiers);
        debug!(cart = %self.id, key = %line.key, "New line");
        self.lines.push(line.clone());
        Ok(line)
    }

    fn increase(&mut self, key: &LineKey) -> Option<u32> {
        let line = self.lines.iter_mut().find(|line| &line.key == key)?;
        line.quantity += 1;
        Some(line.quantity)
    }

    fn decrease(&mut self, key: &LineKey) -> Option<u32> {
        let index = self.lines.iter().position(|line| &line.key == key)?;
        if self.lines[index].quantity > 1 {
            self.lines[index].quantity -= 1;
            Some(self.lines[index].quantity)
        } else {
            self.lines.remove(index);
            Some(0)
        }
    }
}
