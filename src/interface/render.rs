use crate::models::{Menu, Product, Recipe, ReconciledNeed, ShoppingList};
use crate::workflow::View;

/// Print whatever the active stage shows.
pub fn display_view(view: &View) {
    match view {
        View::Loading(stage) => println!("{}...", stage.label()),
        View::Menu {
            menu,
            recipes,
            editable,
        } => display_menu(menu, recipes, *editable),
        View::Needs(needs) => display_needs(needs),
        View::ShoppingList(list) => display_shopping_list(list),
    }
}

/// Display the weekly menu, flagging dishes without a recipe.
pub fn display_menu(menu: &Menu, recipes: &[Recipe], editable: bool) {
    println!();
    println!("=== Weekly Menu{} ===", if editable { " (editing)" } else { "" });
    println!();

    if menu.is_empty() {
        println!("  (no dishes planned)");
        println!();
        return;
    }

    let day_width = menu.entries.iter().map(|e| e.day.len()).max().unwrap_or(3);
    for (i, entry) in menu.entries.iter().enumerate() {
        let known = recipes.iter().any(|r| r.name == entry.dish);
        println!(
            "{:>3}. {:<width$}  {} x{}{}",
            i + 1,
            entry.day,
            entry.dish,
            entry.amount,
            if known { "" } else { "  [no recipe]" },
            width = day_width
        );
    }
    println!();
}

/// Display demand against stock.
pub fn display_needs(needs: &[ReconciledNeed]) {
    println!();
    println!("=== Pantry Check ===");
    println!();

    let name_width = needs.iter().map(|n| n.name.len()).max().unwrap_or(10);
    for need in needs {
        let status = if need.deficit() > 0.0 {
            format!("short {:.2}", need.deficit())
        } else {
            "covered".to_string()
        };
        println!(
            "  {:<width$}  need {:>7.2}  have {:>7.2}  {}",
            need.name,
            need.need,
            need.have,
            status,
            width = name_width
        );
    }
    println!();
}

/// Display the shopping list with totals.
pub fn display_shopping_list(list: &ShoppingList) {
    println!();
    println!("=== Shopping List ===");
    println!();

    if list.is_empty() {
        println!("Nothing to buy: the pantry covers this week's menu.");
        println!();
        return;
    }

    let name_width = list.items.iter().map(|i| i.name.len()).max().unwrap_or(10);
    for item in &list.items {
        println!(
            "  [{}] {:<width$}  {:>7.2} units  {:>3} packs  {:>8.2}",
            if item.purchased { "x" } else { " " },
            item.name,
            item.units,
            item.packs,
            item.cost,
            width = name_width
        );
    }

    println!();
    println!("--- Summary ---");
    println!("Items: {} ({} purchased)", list.len(), list.purchased_count());
    println!("Total cost: {:.2}", list.total_cost());
    println!("Still to buy: {:.2}", list.outstanding_cost());
    println!();
}

/// Display catalog products.
pub fn display_products(products: &[Product], title: &str) {
    if products.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} items) ===", title, products.len());
    println!();

    for product in products {
        println!(
            "  {} - {:.2} per pack of {}{}",
            product.name,
            product.pack_price,
            product.batch_size,
            product
                .unit
                .as_deref()
                .map(|u| format!(" {}", u))
                .unwrap_or_default()
        );
    }

    println!();
}
