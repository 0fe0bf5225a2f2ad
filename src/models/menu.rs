use serde::{Deserialize, Serialize};

use super::{amount_or_default, default_amount, default_name, name_or_default, null_as_default};

/// One ingredient of a dish, per serving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    #[serde(default = "default_name", deserialize_with = "name_or_default")]
    pub name: String,

    #[serde(default = "default_amount", deserialize_with = "amount_or_default")]
    pub amount: f64,
}

/// A dish and its per-serving ingredient composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default = "default_name", deserialize_with = "name_or_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub ingredients: Vec<RecipeIngredient>,
}

impl Recipe {
    pub fn new(name: impl Into<String>, ingredients: &[(&str, f64)]) -> Self {
        Self {
            name: name.into(),
            ingredients: ingredients
                .iter()
                .map(|(n, a)| RecipeIngredient {
                    name: n.to_string(),
                    amount: *a,
                })
                .collect(),
        }
    }
}

/// A scheduled occurrence of a dish on the weekly menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub day: String,

    #[serde(default = "default_name", deserialize_with = "name_or_default")]
    pub dish: String,

    /// Servings of the dish for this occurrence.
    #[serde(default = "default_amount", deserialize_with = "amount_or_default")]
    pub amount: f64,
}

impl MenuEntry {
    pub fn new(day: impl Into<String>, dish: impl Into<String>, amount: f64) -> Self {
        Self {
            day: day.into(),
            dish: dish.into(),
            amount,
        }
    }
}

/// The weekly menu.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    #[serde(default, deserialize_with = "null_as_default")]
    pub entries: Vec<MenuEntry>,
}

impl Menu {
    pub fn new(entries: Vec<MenuEntry>) -> Self {
        Self { entries }
    }

    /// Change the servings of the entry at `index`.
    pub fn set_amount(&mut self, index: usize, amount: f64) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) => {
                entry.amount = amount.max(0.0);
                true
            }
            None => false,
        }
    }

    pub fn add_entry(&mut self, entry: MenuEntry) {
        self.entries.push(entry);
    }

    pub fn remove_entry(&mut self, index: usize) -> Option<MenuEntry> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
