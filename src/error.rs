use thiserror::Error;

use crate::models::Ingredient;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    #[error("Invalid package facts for {ingredient}: {reason}")]
    InvalidPackageFacts {
        ingredient: Ingredient,
        reason: String,
    },

    #[error("Invalid recipe constant: {0}")]
    InvalidRecipe(String),

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl OrderError {
    pub(crate) fn package(ingredient: Ingredient, reason: impl Into<String>) -> Self {
        OrderError::InvalidPackageFacts {
            ingredient,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, OrderError>;
