pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod interface;
pub mod models;
pub mod planner;
pub mod remote;
pub mod workflow;

pub use error::{PlannerError, Result};
pub use models::{Menu, PantryEntry, Product, Recipe, ReconciledNeed, ShoppingList};
pub use workflow::{PlanningService, Stage, Workflow};
