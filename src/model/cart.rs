//! The cart: an ordered list of priced lines.
//!
//! # Actor Framework
//! [`Cart`] implements [`ActorEntity`](crate::framework::ActorEntity) in
//! [`cart_actor`](crate::cart_actor); this module only holds its data and the
//! read-side queries (totals, lookups).

use crate::model::{Modifier, Product, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for carts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartId(pub u32);

impl From<u32> for CartId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for CartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cart_{}", self.0)
    }
}

/// Identity of a cart line: the product plus the exact modifier set chosen.
///
/// Two adds of the same product with the same modifiers merge into one line;
/// a different selection yields a separate line. Modifiers are kept sorted so the
/// order in which they were picked does not matter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    pub product_id: ProductId,
    modifiers: Vec<Modifier>,
}

impl LineKey {
    pub fn new(product_id: ProductId, modifiers: &[Modifier]) -> Self {
        let mut modifiers = modifiers.to_vec();
        modifiers.sort();
        Self {
            product_id,
            modifiers,
        }
    }

    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }
}

/// The key of an unmodified product.
impl From<ProductId> for LineKey {
    fn from(product_id: ProductId) -> Self {
        Self {
            product_id,
            modifiers: Vec::new(),
        }
    }
}

impl Display for LineKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.product_id)?;
        for modifier in &self.modifiers {
            write!(f, "+{}", modifier.name)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub key: LineKey,
    /// Product as it was when added.
    pub product: Product,
    pub quantity: u32,
    /// Modifiers as selected, variation first.
    pub modifiers: Vec<Modifier>,
}

impl CartLine {
    pub fn new(product: Product, modifiers: Vec<Modifier>) -> Self {
        Self {
            key: LineKey::new(product.id, &modifiers),
            product,
            quantity: 1,
            modifiers,
        }
    }

    /// Base price plus every add-on adjustment.
    pub fn unit_price(&self) -> Decimal {
        self.product.price + self.modifiers.iter().map(Modifier::adjustment).sum::<Decimal>()
    }

    pub fn line_total(&self) -> Decimal {
        self.unit_price() * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub id: CartId,
    pub lines: Vec<CartLine>,
}

impl Cart {
    pub fn new(id: CartId) -> Self {
        Self {
            id,
            lines: Vec::new(),
        }
    }

    pub fn line(&self, key: &LineKey) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.key == key)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines, shown on the cart badge.
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of every line's `(price + adjustments) * quantity`.
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_total_matches_reference_cart() {
        let burger = Product::new(1, "Burger", dec!(10.00)).with_modifiers(vec![
            Modifier::variation("Large"),
            Modifier::addon("Cheese", dec!(1.50)),
        ]);
        let fries = Product::new(2, "Fries", dec!(5.00));

        let mut burger_line = CartLine::new(
            burger,
            vec![Modifier::variation("Large"), Modifier::addon("Cheese", dec!(1.50))],
        );
        burger_line.quantity = 2;
        let fries_line = CartLine::new(fries, Vec::new());

        let cart = Cart {
            id: CartId(1),
            lines: vec![burger_line, fries_line],
        };

        assert_eq!(cart.total(), dec!(28.00));
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_line_key_ignores_selection_order() {
        let a = Modifier::addon("Cheese", dec!(1));
        let b = Modifier::addon("Bacon", dec!(2));
        assert_eq!(
            LineKey::new(ProductId(1), &[a.clone(), b.clone()]),
            LineKey::new(ProductId(1), &[b, a])
        );
        assert_eq!(LineKey::new(ProductId(3), &[]), LineKey::from(ProductId(3)));
    }

    #[test]
    fn test_empty_cart_totals_zero() {
        assert_eq!(Cart::new(CartId(1)).total(), Decimal::ZERO);
    }
}
