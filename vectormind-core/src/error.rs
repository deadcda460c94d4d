use thiserror::Error;

use crate::completion::CompletionError;

#[derive(Error, Debug)]
pub enum VectorMindError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    #[error("Other error: {0}")]
    Other(String),
}
