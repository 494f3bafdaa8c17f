//! Custom actions for the Cart actor.

use crate::model::{CartLine, LineKey, Modifier, Product};

/// Payload for opening a cart. Carts always start empty.
#[derive(Debug, Clone, Default)]
pub struct CartCreate;

#[derive(Debug, Clone)]
pub enum CartAction {
    /// Adds one unit of `product` with `modifiers`, merging into an identical line.
    ///
    /// # Errors
    /// Fails if the product is inactive or the modifier choice is not valid for it.
    Add {
        product: Product,
        modifiers: Vec<Modifier>,
    },
    /// One more unit of a line. Missing lines are ignored.
    Increase(LineKey),
    /// One less unit of a line; a line at quantity 1 is removed.
    Decrease(LineKey),
    /// Drops a line regardless of quantity.
    Remove(LineKey),
    /// Empties the cart.
    Clear,
}

/// Results from CartActions - variants match 1:1 with CartAction
#[derive(Debug, Clone, PartialEq)]
pub enum CartActionResult {
    /// The line the product ended up on.
    Add(CartLine),
    /// New quantity, `None` if the line does not exist.
    Increase(Option<u32>),
    /// New quantity (0 once removed), `None` if the line does not exist.
    Decrease(Option<u32>),
    /// Whether a line was removed.
    Remove(bool),
    Clear(()),
}
