mod ingredient;
mod menu;
mod product;
mod shopping;

pub use ingredient::{IngredientDemand, PantryEntry, ReconciledNeed};
pub use menu::{Menu, MenuEntry, Recipe, RecipeIngredient};
pub use product::{Product, ProductCatalog};
pub use shopping::{ShoppingList, ShoppingListItem};

use serde::{Deserialize, Deserializer};
use tracing::warn;

use crate::planner::constants::UNNAMED;

// Serde fallbacks for partial remote payloads. Each one logs, so a backend
// that drops fields shows up in the logs instead of failing the view.

pub(crate) fn default_name() -> String {
    warn!("remote payload is missing a name, using '{}'", UNNAMED);
    UNNAMED.to_string()
}

pub(crate) fn default_amount() -> f64 {
    warn!("remote payload is missing an amount, using 0");
    0.0
}

pub(crate) fn default_batch_size() -> f64 {
    warn!("remote payload is missing a batch size, using 1");
    1.0
}

// `default = ...` only covers an absent key. These also map an explicit
// `null` to the same default.

pub(crate) fn name_or_default<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_else(default_name))
}

pub(crate) fn amount_or_default<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(d)?.unwrap_or_else(default_amount))
}

pub(crate) fn batch_size_or_default<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(d)?.unwrap_or_else(default_batch_size))
}

/// `T::default()` for `null`, without a warning.
pub(crate) fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}
