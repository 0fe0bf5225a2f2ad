pub mod constants;
pub mod demand;
pub mod reconcile;
pub mod search;
pub mod shopping;

pub use constants::*;
pub use demand::aggregate_demand;
pub use reconcile::{ensure_unique_names, reconcile};
pub use search::{filter_by_name, fold_name, suggest};
pub use shopping::{packs_for, reset_purchased, synthesize, toggle_purchased};
