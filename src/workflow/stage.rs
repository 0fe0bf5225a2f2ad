use crate::models::{Menu, Recipe, ReconciledNeed, ShoppingList};
use crate::workflow::PlanningContext;

/// Workflow stages, in order. Only an explicit restart goes backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    LoadMenu,
    EditMenu,
    LoadPantryAndReconcile,
    ReviewShoppingList,
}

/// What a stage shows, borrowed from the planning context.
#[derive(Debug)]
pub enum View<'a> {
    /// The stage's data has not arrived yet.
    Loading(Stage),
    Menu {
        menu: &'a Menu,
        recipes: &'a [Recipe],
        editable: bool,
    },
    Needs(&'a [ReconciledNeed]),
    ShoppingList(&'a ShoppingList),
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::LoadMenu,
        Stage::EditMenu,
        Stage::LoadPantryAndReconcile,
        Stage::ReviewShoppingList,
    ];

    /// The following stage. The terminal stage has none.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::LoadMenu => Some(Stage::EditMenu),
            Stage::EditMenu => Some(Stage::LoadPantryAndReconcile),
            Stage::LoadPantryAndReconcile => Some(Stage::ReviewShoppingList),
            Stage::ReviewShoppingList => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Stage::ReviewShoppingList
    }

    /// Whether the context holds everything the following stage reads.
    pub fn is_ready(self, ctx: &PlanningContext) -> bool {
        match self {
            Stage::LoadMenu => ctx.menu.is_some(),
            Stage::EditMenu => ctx.menu.is_some(),
            Stage::LoadPantryAndReconcile => ctx.needs.is_some() && ctx.shopping_list.is_some(),
            Stage::ReviewShoppingList => ctx.shopping_list.is_some(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::LoadMenu => "Loading menu",
            Stage::EditMenu => "Edit menu",
            Stage::LoadPantryAndReconcile => "Pantry check",
            Stage::ReviewShoppingList => "Shopping list",
        }
    }

    pub fn render(self, ctx: &PlanningContext) -> View<'_> {
        match self {
            Stage::LoadMenu | Stage::EditMenu => match &ctx.menu {
                Some(menu) => View::Menu {
                    menu,
                    recipes: &ctx.recipes,
                    editable: self == Stage::EditMenu,
                },
                None => View::Loading(self),
            },
            Stage::LoadPantryAndReconcile => match &ctx.needs {
                Some(needs) => View::Needs(needs),
                None => View::Loading(self),
            },
            Stage::ReviewShoppingList => match &ctx.shopping_list {
                Some(list) => View::ShoppingList(list),
                None => View::Loading(self),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_visits_every_stage_once() {
        let mut visited = vec![Stage::LoadMenu];
        let mut stage = Stage::LoadMenu;
        while let Some(next) = stage.next() {
            visited.push(next);
            stage = next;
        }
        assert_eq!(visited, Stage::ALL.to_vec());
        assert!(stage.is_terminal());
    }

    #[test]
    fn test_only_terminal_stage_is_terminal() {
        let terminal: Vec<Stage> = Stage::ALL.into_iter().filter(|s| s.is_terminal()).collect();
        assert_eq!(terminal, vec![Stage::ReviewShoppingList]);
    }

    #[test]
    fn test_render_without_data_is_loading() {
        let ctx = PlanningContext::default();
        for stage in Stage::ALL {
            assert!(matches!(stage.render(&ctx), View::Loading(s) if s == stage));
        }
    }

    #[test]
    fn test_readiness() {
        let mut ctx = PlanningContext::default();
        assert!(!Stage::LoadMenu.is_ready(&ctx));

        ctx.menu = Some(Menu::default());
        assert!(Stage::LoadMenu.is_ready(&ctx));
        assert!(!Stage::LoadPantryAndReconcile.is_ready(&ctx));

        // A prior list alone does not mean reconciliation ran.
        ctx.shopping_list = Some(ShoppingList::default());
        assert!(!Stage::LoadPantryAndReconcile.is_ready(&ctx));

        ctx.needs = Some(Vec::new());
        assert!(Stage::LoadPantryAndReconcile.is_ready(&ctx));
    }
}
