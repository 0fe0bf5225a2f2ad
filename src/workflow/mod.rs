//! The menu → pantry → shopping list workflow as an explicit state machine.

mod context;
mod machine;
mod service;
mod stage;

pub use context::PlanningContext;
pub use machine::{LoadOutcome, LoadRequest, LoadResult, Workflow};
pub use service::{MenuBundle, PlanningService};
pub use stage::{Stage, View};
