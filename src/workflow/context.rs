use crate::models::{
    Menu, PantryEntry, ProductCatalog, Recipe, ReconciledNeed, ShoppingList,
};

/// The shared planning record.
///
/// Owned by the [`Workflow`](super::Workflow) and handed to one stage at a
/// time. Each stage fills the fields the next one reads.
#[derive(Debug, Default)]
pub struct PlanningContext {
    pub menu: Option<Menu>,
    pub recipes: Vec<Recipe>,
    pub catalog: ProductCatalog,
    pub pantry: Option<Vec<PantryEntry>>,
    pub needs: Option<Vec<ReconciledNeed>>,
    /// Before reconciliation this is the previously saved list, used to
    /// carry purchased marks forward.
    pub shopping_list: Option<ShoppingList>,
    generation: u64,
}

impl PlanningContext {
    /// Bumped on every restart; loads issued under an older generation are
    /// discarded.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Clear per-run data for a fresh pass. The shopping list is kept so its
    /// purchased marks survive into the next synthesis.
    pub(crate) fn reset_for_restart(&mut self) {
        self.generation += 1;
        self.menu = None;
        self.pantry = None;
        self.needs = None;
    }

    /// The prior list to reconcile purchased marks against.
    pub fn prior_list(&self) -> ShoppingList {
        self.shopping_list.clone().unwrap_or_default()
    }
}
