pub mod export;
pub mod prompts;
pub mod render;

pub use export::write_shopping_list_csv;
pub use prompts::{edit_menu, prompt_dish, prompt_purchased, prompt_servings, prompt_yes_no};
pub use render::{display_menu, display_needs, display_products, display_shopping_list, display_view};
