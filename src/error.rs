use thiserror::Error;

use crate::workflow::Stage;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Remote call to '{path}' failed with status {status}: {message}")]
    Remote {
        path: String,
        status: u16,
        message: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Recipe not found: {0}")]
    RecipeNotFound(String),

    /// Two entries share a name inside one snapshot. Callers must not pass
    /// such snapshots to the reconciler.
    #[error("Duplicate name '{name}' in {collection}")]
    DuplicateName { collection: String, name: String },

    /// Advancing a stage before its load resolved. This is a caller bug.
    #[error("Cannot leave stage {stage:?} before its data is loaded")]
    PrematureTransition { stage: Stage },

    #[error("Stage {stage:?} is terminal")]
    NoNextStage { stage: Stage },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
