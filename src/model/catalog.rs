//! Read-only catalog data: the shop, its categories and its products.
//!
//! These types mirror the JSON served by the catalog endpoints and are never
//! mutated by the menu. Money is held as [`Decimal`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identifier of a shop in the catalog service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShopId(pub u64);

impl Display for ShopId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

/// A selectable modifier attached to a product.
///
/// `price_adjustment == None` marks a variation (exactly one must be chosen when a
/// product has any). `Some(_)`, including `Some(0)`, marks an optional add-on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Modifier {
    pub name: String,
    #[serde(default)]
    pub price_adjustment: Option<Decimal>,
}

impl Modifier {
    pub fn variation(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price_adjustment: None,
        }
    }

    pub fn addon(name: impl Into<String>, price_adjustment: Decimal) -> Self {
        Self {
            name: name.into(),
            price_adjustment: Some(price_adjustment),
        }
    }

    pub fn is_variation(&self) -> bool {
        self.price_adjustment.is_none()
    }

    /// What this modifier adds to the unit price. Variations add nothing.
    pub fn adjustment(&self) -> Decimal {
        self.price_adjustment.unwrap_or(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, rename = "product_category_id")]
    pub category_id: Option<u64>,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
}

fn default_active() -> bool {
    true
}

impl Product {
    pub fn new(id: u64, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: ProductId(id),
            name: name.into(),
            description: None,
            price,
            is_active: true,
            category_id: None,
            modifiers: Vec::new(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Vec<Modifier>) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
}

/// Which order types a shop accepts, plus the delivery terms it advertises.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessInfo {
    #[serde(default)]
    pub has_dine_in: bool,
    #[serde(default)]
    pub has_takeaway: bool,
    #[serde(default)]
    pub has_delivery: bool,
    #[serde(default)]
    pub delivery_cost: Option<Decimal>,
    #[serde(default)]
    pub minimum_order: Option<Decimal>,
}

impl BusinessInfo {
    /// A shop that takes every kind of order.
    pub fn all() -> Self {
        Self {
            has_dine_in: true,
            has_takeaway: true,
            has_delivery: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    pub id: ShopId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub business_info: BusinessInfo,
    /// Presentation data, carried through untouched.
    #[serde(default, rename = "shop_theme")]
    pub theme: Option<serde_json::Value>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub products: Vec<Product>,
}

impl Shop {
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn find_product_by_name(&self, name: &str) -> Option<&Product> {
        self.products
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_modifier_kinds_follow_price_adjustment() {
        let json = r#"[
            {"name": "Large", "price_adjustment": null},
            {"name": "Ice", "price_adjustment": 0},
            {"name": "Cheese", "price_adjustment": 1.5}
        ]"#;
        let modifiers: Vec<Modifier> = serde_json::from_str(json).unwrap();

        assert!(modifiers[0].is_variation());
        assert!(!modifiers[1].is_variation());
        assert_eq!(modifiers[1].adjustment(), Decimal::ZERO);
        assert_eq!(modifiers[2].adjustment(), Decimal::from_str("1.5").unwrap());
    }

    #[test]
    fn test_product_defaults_from_sparse_json() {
        let product: Product =
            serde_json::from_str(r#"{"id": 7, "name": "Tea", "price": "3.25"}"#).unwrap();

        assert!(product.is_active);
        assert!(product.modifiers.is_empty());
        assert_eq!(product.price, Decimal::from_str("3.25").unwrap());
    }

    #[test]
    fn test_shop_business_flags() {
        let shop: Shop = serde_json::from_str(
            r#"{"id": 1, "name": "Cafe", "business_info": {"has_dine_in": true, "has_delivery": false}}"#,
        )
        .unwrap();

        assert!(shop.business_info.has_dine_in);
        assert!(!shop.business_info.has_takeaway);
        assert!(!shop.business_info.has_delivery);
    }
}
