use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ValidationError {
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        ValidationError::NotFound { entity, id }
    }
}

pub type Result<T> = std::result::Result<T, ValidationError>;
