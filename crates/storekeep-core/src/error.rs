//! Error types for the Storekeep system.
//!
//! Every mutating operation resolves to exactly one of success or one of
//! these failures. Validation is checked before any persistence call;
//! persistence failures are reported generically.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorekeepError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Entity already exists: {entity}")]
    AlreadyExists { entity: String },

    #[error("Persistence error: {0}")]
    Persistence(String),
}

pub type StorekeepResult<T> = Result<T, StorekeepError>;
