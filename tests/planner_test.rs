use std::io::Write;

use assert_float_eq::assert_float_absolute_eq;
use tempfile::NamedTempFile;

use menu_planner_rs::config::{Backend, PlannerConfig};
use menu_planner_rs::models::{
    Menu, MenuEntry, PantryEntry, Product, ProductCatalog, Recipe, ShoppingList,
};
use menu_planner_rs::planner::{aggregate_demand, reconcile, reset_purchased, synthesize};
use menu_planner_rs::remote::connect;
use menu_planner_rs::workflow::PlanningService;

fn recipes() -> Vec<Recipe> {
    vec![
        Recipe::new("Omelette", &[("Egg", 2.0), ("Milk", 0.05)]),
        Recipe::new("Pancakes", &[("Flour", 60.0), ("Egg", 1.0), ("Milk", 0.15)]),
    ]
}

fn catalog() -> ProductCatalog {
    ProductCatalog::new(vec![
        Product::new("Egg", 1.8, 6.0),
        Product::new("Flour", 1.1, 1000.0),
        Product::new("Milk", 0.95, 1.0),
    ])
}

#[test]
fn test_menu_to_shopping_list() {
    let menu = Menu::new(vec![
        MenuEntry::new("Monday", "Omelette", 2.0),
        MenuEntry::new("Wednesday", "Pancakes", 4.0),
    ]);
    let pantry = vec![PantryEntry::new("Egg", 3.0), PantryEntry::new("Milk", 1.0)];

    let demand = aggregate_demand(&menu, &recipes()).unwrap();
    let needs = reconcile(&pantry, &demand);
    let list = synthesize(&needs, &ShoppingList::default(), &catalog());

    // Eggs: 4 + 4 = 8 needed, 3 on hand, 5 to buy in one box of six.
    let egg = list.get("Egg").unwrap();
    assert_float_absolute_eq!(egg.units, 5.0, 1e-9);
    assert_eq!(egg.packs, 1);
    assert_float_absolute_eq!(egg.cost, 1.8, 1e-9);

    // Milk: 0.1 + 0.6 = 0.7 needed, covered by the litre on hand.
    assert!(list.get("Milk").is_none());

    let flour = list.get("Flour").unwrap();
    assert_eq!(flour.packs, 1);

    assert_float_absolute_eq!(list.total_cost(), 2.9, 1e-9);
}

#[test]
fn test_exact_pack_multiple_does_not_round_up() {
    // Three servings of a third of a pack each: floating error must not add
    // a fourth pack.
    let recipes = vec![Recipe::new("Tea", &[("Milk", 0.1)])];
    let menu = Menu::new(vec![MenuEntry::new("Sunday", "Tea", 3.0)]);
    let catalog = ProductCatalog::new(vec![Product::new("Milk", 1.0, 0.1)]);

    let demand = aggregate_demand(&menu, &recipes).unwrap();
    let needs = reconcile(&[], &demand);
    let list = synthesize(&needs, &ShoppingList::default(), &catalog);

    assert_eq!(list.get("Milk").unwrap().packs, 3);
}

#[test]
fn test_reset_then_regenerate_keeps_marks_cleared() {
    let menu = Menu::new(vec![MenuEntry::new("Monday", "Omelette", 6.0)]);
    let demand = aggregate_demand(&menu, &recipes()).unwrap();
    let needs = reconcile(&[], &demand);

    let mut list = synthesize(&needs, &ShoppingList::default(), &catalog());
    for item in &mut list.items {
        item.purchased = true;
    }

    let cleared = reset_purchased(&list);
    let regenerated = synthesize(&needs, &cleared, &catalog());
    assert_eq!(regenerated.purchased_count(), 0);
    assert_eq!(regenerated, cleared);
}

#[tokio::test]
async fn test_mock_backend_from_fixture_file() {
    let fixture = r#"{
        "products": [{"name": "Crème fraîche", "unitPriceInPack": 1.2, "batchSize": 1}],
        "recipes": [],
        "menu": {"entries": []}
    }"#;
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(fixture.as_bytes()).unwrap();

    let config = PlannerConfig {
        backend: Backend::Mock {
            fixture: Some(file.path().to_path_buf()),
        },
        ..PlannerConfig::default()
    };
    let remote = connect(&config.backend).unwrap();
    let service = PlanningService::new(remote, &config.cache);

    let hits = service.search_products("CREME").await.unwrap();
    assert_eq!(hits.len(), 1);

    let bundle = service.load_menu_bundle().await.unwrap();
    assert!(bundle.menu.is_empty());
    assert!(bundle.saved_list.is_empty());
}
