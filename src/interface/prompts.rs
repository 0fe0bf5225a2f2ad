use dialoguer::{Confirm, Input, MultiSelect, Select};

use crate::error::{PlannerError, Result};
use crate::models::{Menu, MenuEntry, Recipe, ShoppingList};
use crate::planner::suggest;

/// Prompt for a number of servings.
pub fn prompt_servings(dish: &str, default: f64) -> Result<f64> {
    let input: String = Input::new()
        .with_prompt(format!("Servings of '{}'", dish))
        .default(default.to_string())
        .interact_text()?;

    let servings: f64 = input
        .trim()
        .parse()
        .map_err(|_| PlannerError::InvalidInput("Invalid number".to_string()))?;

    if servings < 0.0 {
        return Err(PlannerError::InvalidInput(
            "Servings must be >= 0".to_string(),
        ));
    }

    Ok(servings)
}

/// Prompt for a dish name, resolved against the known recipes with fuzzy
/// matching. Returns `None` when the user gives up.
pub fn prompt_dish(recipes: &[Recipe]) -> Result<Option<String>> {
    let names: Vec<&str> = recipes.iter().map(|r| r.name.as_str()).collect();

    loop {
        let input: String = Input::new()
            .with_prompt("Dish (or press Enter to cancel)")
            .allow_empty(true)
            .interact_text()?;

        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }

        let candidates = suggest(&names, input);

        match candidates.as_slice() {
            [] => {
                println!("No recipe matches '{}'", input);
            }
            [only] => {
                let confirm = Confirm::new()
                    .with_prompt(format!("Use '{}'?", only))
                    .default(true)
                    .interact()?;
                if confirm {
                    return Ok(Some(only.to_string()));
                }
            }
            many => {
                let mut options: Vec<String> = many.iter().map(|n| n.to_string()).collect();
                options.push("None of these".to_string());

                let selection = Select::new()
                    .with_prompt("Which did you mean?")
                    .items(&options)
                    .default(0)
                    .interact()?;

                if selection < many.len() {
                    return Ok(Some(options[selection].clone()));
                }
            }
        }
    }
}

/// Interactive menu editor. Returns whether anything changed.
pub fn edit_menu(menu: &mut Menu, recipes: &[Recipe]) -> Result<bool> {
    let mut changed = false;

    loop {
        let mut options: Vec<String> = menu
            .entries
            .iter()
            .map(|e| format!("{} - {} x{}", e.day, e.dish, e.amount))
            .collect();
        let entry_count = options.len();
        options.push("Add a dish".to_string());
        options.push("Done".to_string());

        let selection = Select::new()
            .with_prompt("Edit the menu")
            .items(&options)
            .default(options.len() - 1)
            .interact()?;

        if selection < entry_count {
            let actions = ["Change servings", "Remove", "Back"];
            let action = Select::new()
                .with_prompt(options[selection].as_str())
                .items(&actions)
                .default(0)
                .interact()?;

            match action {
                0 => {
                    let entry = &menu.entries[selection];
                    let servings = prompt_servings(&entry.dish, entry.amount)?;
                    changed |= menu.set_amount(selection, servings);
                }
                1 => {
                    if let Some(removed) = menu.remove_entry(selection) {
                        println!("Removed: {}", removed.dish);
                        changed = true;
                    }
                }
                _ => {}
            }
        } else if selection == entry_count {
            let Some(dish) = prompt_dish(recipes)? else {
                continue;
            };
            let day: String = Input::new()
                .with_prompt("Day")
                .allow_empty(true)
                .interact_text()?;
            let servings = prompt_servings(&dish, 1.0)?;

            println!("Added: {}", dish);
            menu.add_entry(MenuEntry::new(day.trim(), dish, servings));
            changed = true;
        } else {
            return Ok(changed);
        }
    }
}

/// Let the user tick purchased items. Returns the names whose mark changed.
pub fn prompt_purchased(list: &ShoppingList) -> Result<Vec<String>> {
    if list.is_empty() {
        return Ok(Vec::new());
    }

    let labels: Vec<String> = list
        .items
        .iter()
        .map(|i| format!("{} ({} packs, {:.2})", i.name, i.packs, i.cost))
        .collect();
    let defaults: Vec<bool> = list.items.iter().map(|i| i.purchased).collect();

    let chosen = MultiSelect::new()
        .with_prompt("Mark purchased items (space to toggle, enter to confirm)")
        .items(&labels)
        .defaults(&defaults)
        .interact()?;

    Ok(list
        .items
        .iter()
        .enumerate()
        .filter(|(i, item)| chosen.contains(i) != item.purchased)
        .map(|(_, item)| item.name.clone())
        .collect())
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
