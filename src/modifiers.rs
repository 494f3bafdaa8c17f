//! Modifier selection for a single product.
//!
//! A product's modifiers split into *variations* (no price adjustment, pick exactly
//! one) and *add-ons* (priced, pick any). [`ModifierSelection`] holds the choice
//! while the customer is making it; [`validate_selection`] re-checks a finished
//! selection when it reaches the cart.

use crate::model::{Modifier, Product};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("{product} has no modifier named {modifier}")]
    UnknownModifier { product: String, modifier: String },
    #[error("{product} requires choosing one option")]
    MissingVariation { product: String },
    #[error("{product} allows only one option, got {count}")]
    MultipleVariations { product: String, count: usize },
    #[error("{modifier} was chosen more than once for {product}")]
    DuplicateModifier { product: String, modifier: String },
}

#[derive(Debug, Clone, PartialEq)]
struct Choice {
    modifier: Modifier,
    selected: bool,
}

/// In-progress modifier choice for one product.
#[derive(Debug, Clone, PartialEq)]
pub struct ModifierSelection {
    variations: Vec<Choice>,
    addons: Vec<Choice>,
}

impl ModifierSelection {
    /// Starts a selection for `product`.
    ///
    /// Returns `None` when the product has no modifiers; such products go to the
    /// cart directly. With `prior` (editing an existing line) exactly those
    /// modifiers start selected; otherwise the first variation is pre-selected.
    pub fn resolve(product: &Product, prior: Option<&[Modifier]>) -> Option<Self> {
        if product.modifiers.is_empty() {
            return None;
        }

        let choice = |modifier: &Modifier| Choice {
            modifier: modifier.clone(),
            selected: prior.is_some_and(|p| p.contains(modifier)),
        };
        let mut variations: Vec<Choice> = product
            .modifiers
            .iter()
            .filter(|m| m.is_variation())
            .map(choice)
            .collect();
        let addons = product
            .modifiers
            .iter()
            .filter(|m| !m.is_variation())
            .map(choice)
            .collect();

        if prior.is_none() {
            if let Some(first) = variations.first_mut() {
                first.selected = true;
            }
        }

        Some(Self { variations, addons })
    }

    pub fn variations(&self) -> impl Iterator<Item = (&Modifier, bool)> {
        self.variations.iter().map(|c| (&c.modifier, c.selected))
    }

    pub fn addons(&self) -> impl Iterator<Item = (&Modifier, bool)> {
        self.addons.iter().map(|c| (&c.modifier, c.selected))
    }

    /// Selects variation `index` and deselects the others. Out-of-range is ignored.
    pub fn select_variation(&mut self, index: usize) {
        if index >= self.variations.len() {
            return;
        }
        for (i, choice) in self.variations.iter_mut().enumerate() {
            choice.selected = i == index;
        }
    }

    /// Flips add-on `index`. Out-of-range is ignored.
    pub fn toggle_addon(&mut self, index: usize) {
        if let Some(choice) = self.addons.get_mut(index) {
            choice.selected = !choice.selected;
        }
    }

    /// Selects a modifier by name, whichever group it belongs to.
    pub fn choose(&mut self, name: &str) -> bool {
        if let Some(index) = self.variations.iter().position(|c| c.modifier.name == name) {
            self.select_variation(index);
            return true;
        }
        if let Some(choice) = self.addons.iter_mut().find(|c| c.modifier.name == name) {
            choice.selected = true;
            return true;
        }
        false
    }

    /// False while variations exist and none is selected.
    pub fn can_finalize(&self) -> bool {
        self.variations.is_empty() || self.variations.iter().any(|c| c.selected)
    }

    /// The chosen modifiers, variation first, or `None` if the choice is incomplete.
    pub fn finalize(&self) -> Option<Vec<Modifier>> {
        if !self.can_finalize() {
            return None;
        }
        Some(
            self.variations
                .iter()
                .chain(self.addons.iter())
                .filter(|c| c.selected)
                .map(|c| c.modifier.clone())
                .collect(),
        )
    }
}

/// Checks that `selected` is a legal choice for `product`.
pub fn validate_selection(product: &Product, selected: &[Modifier]) -> Result<(), SelectionError> {
    if let Some(unknown) = selected.iter().find(|m| !product.modifiers.contains(m)) {
        return Err(SelectionError::UnknownModifier {
            product: product.name.clone(),
            modifier: unknown.name.clone(),
        });
    }

    if let Some((_, repeated)) = selected
        .iter()
        .enumerate()
        .find(|(i, m)| selected[..*i].contains(m))
    {
        return Err(SelectionError::DuplicateModifier {
            product: product.name.clone(),
            modifier: repeated.name.clone(),
        });
    }

    let chosen = selected.iter().filter(|m| m.is_variation()).count();
    let offered = product.modifiers.iter().any(Modifier::is_variation);
    match chosen {
        0 if offered => Err(SelectionError::MissingVariation {
            product: product.name.clone(),
        }),
        0 | 1 => Ok(()),
        count => Err(SelectionError::MultipleVariations {
            product: product.name.clone(),
            count,
        }),
    }
}
