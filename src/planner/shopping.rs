use std::collections::HashSet;

use tracing::{debug, warn};

use crate::models::{Product, ProductCatalog, ReconciledNeed, ShoppingList, ShoppingListItem};
use crate::planner::constants::QUANTITY_RESOLUTION;

/// Whole packs needed to cover `units`, always rounding up.
///
/// `units` is first snapped to [`QUANTITY_RESOLUTION`]. The division is then
/// allowed a few ulps of error relative to its result, so `1.1 / 0.1` is 11
/// packs while anything a full quantity step above a multiple still rounds up.
pub fn packs_for(units: f64, batch_size: f64) -> u32 {
    let units = (units / QUANTITY_RESOLUTION).round() * QUANTITY_RESOLUTION;
    if units <= 0.0 {
        return 0;
    }
    let batch = if batch_size > 0.0 { batch_size } else { 1.0 };
    let ratio = units / batch;
    let noise = ratio * 4.0 * f64::EPSILON;
    (ratio - noise).ceil().max(1.0) as u32
}

/// Turn reconciled needs into a priced shopping list.
///
/// Only needs with a positive deficit produce an item. Quantities are
/// recomputed from scratch; the `purchased` mark is carried over by name
/// from `prior` even when the quantity changed.
pub fn synthesize(
    needs: &[ReconciledNeed],
    prior: &ShoppingList,
    catalog: &ProductCatalog,
) -> ShoppingList {
    let already_purchased: HashSet<&str> = prior
        .items
        .iter()
        .filter(|i| i.purchased)
        .map(|i| i.name.as_str())
        .collect();

    let mut items = Vec::new();
    for need in needs {
        let units = need.deficit();
        if units <= 0.0 {
            continue;
        }

        let fallback;
        let product = match catalog.get(&need.name) {
            Some(p) => p,
            None => {
                warn!("no catalog product for '{}', pricing at 0 per unit", need.name);
                fallback = Product::new(need.name.clone(), 0.0, 1.0);
                &fallback
            }
        };

        let packs = packs_for(units, product.effective_batch_size());
        let purchased = already_purchased.contains(need.name.as_str());

        items.push(ShoppingListItem {
            name: need.name.clone(),
            units,
            packs,
            cost: packs as f64 * product.pack_price,
            purchased,
        });
    }

    debug!(
        "synthesized {} items ({} carried as purchased)",
        items.len(),
        items.iter().filter(|i| i.purchased).count()
    );
    ShoppingList::new(items)
}

/// Copy of `list` with every purchased mark cleared. Quantities are untouched.
pub fn reset_purchased(list: &ShoppingList) -> ShoppingList {
    ShoppingList::new(
        list.items
            .iter()
            .map(|item| ShoppingListItem {
                purchased: false,
                ..item.clone()
            })
            .collect(),
    )
}

/// Flip the purchased mark of the named item. Returns the new mark.
pub fn toggle_purchased(list: &mut ShoppingList, name: &str) -> Option<bool> {
    let item = list.get_mut(name)?;
    item.purchased = !item.purchased;
    Some(item.purchased)
}
