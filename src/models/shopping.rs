use serde::{Deserialize, Serialize};

use super::{amount_or_default, default_amount, default_name, name_or_default, null_as_default};

/// One line of the shopping list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListItem {
    #[serde(default = "default_name", deserialize_with = "name_or_default")]
    pub name: String,

    /// Deficit in product units (`need - have`, floored at 0).
    #[serde(default = "default_amount", deserialize_with = "amount_or_default")]
    pub units: f64,

    /// Whole packs to buy.
    #[serde(default, deserialize_with = "null_as_default")]
    pub packs: u32,

    /// `packs * pack price`.
    #[serde(default = "default_amount", deserialize_with = "amount_or_default")]
    pub cost: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub purchased: bool,
}

/// A shopping list. Serialized as a bare array of items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShoppingList {
    pub items: Vec<ShoppingListItem>,
}

impl ShoppingList {
    pub fn new(items: Vec<ShoppingListItem>) -> Self {
        Self { items }
    }

    pub fn get(&self, name: &str) -> Option<&ShoppingListItem> {
        self.items.iter().find(|i| i.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ShoppingListItem> {
        self.items.iter_mut().find(|i| i.name == name)
    }

    pub fn total_cost(&self) -> f64 {
        self.items.iter().map(|i| i.cost).sum()
    }

    /// Cost of the items not yet marked purchased.
    pub fn outstanding_cost(&self) -> f64 {
        self.items
            .iter()
            .filter(|i| !i.purchased)
            .map(|i| i.cost)
            .sum()
    }

    pub fn purchased_count(&self) -> usize {
        self.items.iter().filter(|i| i.purchased).count()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
