use std::collections::{BTreeMap, HashMap};

use crate::error::{PlannerError, Result};
use crate::models::{IngredientDemand, Menu, Recipe};

/// Sum ingredient demand over every scheduled dish occurrence.
///
/// Each occurrence contributes `occurrence.amount * ingredient.amount` for
/// every ingredient of its dish. The result holds one entry per ingredient
/// name, ordered by name.
pub fn aggregate_demand(menu: &Menu, recipes: &[Recipe]) -> Result<Vec<IngredientDemand>> {
    let by_name: HashMap<&str, &Recipe> = recipes.iter().map(|r| (r.name.as_str(), r)).collect();
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();

    for entry in &menu.entries {
        if entry.amount <= 0.0 {
            continue;
        }

        let recipe = by_name
            .get(entry.dish.as_str())
            .ok_or_else(|| PlannerError::RecipeNotFound(entry.dish.clone()))?;

        for ingredient in &recipe.ingredients {
            *totals.entry(ingredient.name.as_str()).or_insert(0.0) +=
                entry.amount * ingredient.amount;
        }
    }

    Ok(totals
        .into_iter()
        .map(|(name, amount)| IngredientDemand::new(name, amount))
        .collect())
}
