use std::sync::Arc;

use tracing::{debug, info};

use crate::cache::CacheAside;
use crate::config::CacheSettings;
use crate::error::{PlannerError, Result};
use crate::models::{IngredientDemand, Menu, PantryEntry, Product, Recipe, ShoppingList};
use crate::planner::constants::{
    MENU_PATH, PANTRY_PATH, PRODUCTS_PATH, RECIPES_PATH, SHOPPING_LIST_PATH,
};
use crate::planner::search::filter_by_name;
use crate::remote::RemoteStore;

/// Everything the menu stages read, fetched together.
#[derive(Debug, Clone)]
pub struct MenuBundle {
    pub menu: Menu,
    pub recipes: Vec<Recipe>,
    pub products: Vec<Product>,
    pub saved_list: ShoppingList,
}

/// Cache-aside accessors for every resource family the planner uses.
pub struct PlanningService {
    products: CacheAside,
    recipes: CacheAside,
    menu: CacheAside,
    pantry: CacheAside,
    shopping_list: CacheAside,
}

impl PlanningService {
    pub fn new(remote: Arc<dyn RemoteStore>, settings: &CacheSettings) -> Self {
        Self {
            products: CacheAside::new(PRODUCTS_PATH, remote.clone(), settings),
            recipes: CacheAside::new(RECIPES_PATH, remote.clone(), settings),
            menu: CacheAside::new(MENU_PATH, remote.clone(), settings),
            pantry: CacheAside::new(PANTRY_PATH, remote.clone(), settings),
            shopping_list: CacheAside::new(SHOPPING_LIST_PATH, remote, settings),
        }
    }

    fn accessors(&self) -> [&CacheAside; 5] {
        [
            &self.products,
            &self.recipes,
            &self.menu,
            &self.pantry,
            &self.shopping_list,
        ]
    }

    /// Start the background sweep of every accessor's cache.
    pub fn start_sweepers(&self) {
        for accessor in self.accessors() {
            accessor.start_sweeper();
        }
    }

    pub fn stop_sweepers(&self) {
        for accessor in self.accessors() {
            accessor.stop_sweeper();
        }
    }

    pub fn products(&self) -> &CacheAside {
        &self.products
    }

    pub fn pantry(&self) -> &CacheAside {
        &self.pantry
    }

    pub async fn load_products(&self) -> Result<Vec<Product>> {
        self.products.read().await
    }

    pub async fn load_recipes(&self) -> Result<Vec<Recipe>> {
        self.recipes.read().await
    }

    pub async fn load_menu(&self) -> Result<Menu> {
        self.menu.read().await
    }

    pub async fn load_pantry(&self) -> Result<Vec<PantryEntry>> {
        self.pantry.read().await
    }

    /// The saved shopping list; an absent one reads as empty.
    pub async fn load_shopping_list(&self) -> Result<ShoppingList> {
        match self.shopping_list.read().await {
            Err(PlannerError::Remote { status: 404, .. }) => {
                debug!("no saved shopping list, starting empty");
                Ok(ShoppingList::default())
            }
            other => other,
        }
    }

    /// Fetch the menu and everything needed to edit and price it. Calls are
    /// issued one after another.
    pub async fn load_menu_bundle(&self) -> Result<MenuBundle> {
        let menu = self.load_menu().await?;
        let recipes = self.load_recipes().await?;
        let products = self.load_products().await?;
        let saved_list = self.load_shopping_list().await?;

        info!(
            "loaded menu with {} entries, {} recipes, {} products",
            menu.entries.len(),
            recipes.len(),
            products.len()
        );
        Ok(MenuBundle {
            menu,
            recipes,
            products,
            saved_list,
        })
    }

    /// Save the menu and receive its aggregated ingredient demand.
    pub async fn submit_menu(&self, menu: &Menu) -> Result<Vec<IngredientDemand>> {
        self.menu.submit(menu).await
    }

    pub async fn save_shopping_list(&self, list: &ShoppingList) -> Result<()> {
        self.shopping_list.write(list).await.map(|_| ())
    }

    /// Catalog products whose name matches `query`, ignoring accents and case.
    pub async fn search_products(&self, query: &str) -> Result<Vec<Product>> {
        let products = self.load_products().await?;
        Ok(filter_by_name(&products, query, |p| p.name.as_str())
            .into_iter()
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::{MockStore, RemoteMethod};
    use serde_json::json;

    fn remote() -> Arc<MockStore> {
        Arc::new(
            MockStore::new()
                .with_document(
                    "products",
                    json!([
                        {"name": "Crème fraîche", "unitPriceInPack": 1.2, "batchSize": 1},
                        {"name": "Carrot", "unitPriceInPack": 0.17, "batchSize": 1}
                    ]),
                )
                .with_document("recipes", json!([]))
                .with_document("menu", json!({"entries": []})),
        )
    }

    fn service(remote: &Arc<MockStore>) -> PlanningService {
        let store: Arc<dyn RemoteStore> = remote.clone();
        PlanningService::new(store, &CacheSettings::default())
    }

    #[tokio::test]
    async fn test_missing_shopping_list_reads_empty() {
        let remote = remote();
        let service = service(&remote);
        let list = service.load_shopping_list().await.unwrap();
        assert!(list.is_empty());
    }

    #[tokio::test]
    async fn test_other_failures_propagate() {
        let remote = remote();
        remote.fail_path("shopping-list");
        let service = service(&remote);
        assert!(service.load_shopping_list().await.is_err());
    }

    #[tokio::test]
    async fn test_search_products_folds_accents() {
        let remote = remote();
        let service = service(&remote);

        let hits = service.search_products("creme").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Crème fraîche");

        service.search_products("carrot").await.unwrap();
        assert_eq!(remote.calls_to(RemoteMethod::Get, "products"), 1);
    }

    #[tokio::test]
    async fn test_saving_list_refetches_on_next_read() {
        let remote = remote();
        let service = service(&remote);

        service.load_shopping_list().await.unwrap();
        service
            .save_shopping_list(&ShoppingList::default())
            .await
            .unwrap();
        service.load_shopping_list().await.unwrap();

        assert_eq!(remote.calls_to(RemoteMethod::Get, "shopping-list"), 2);
    }
}
