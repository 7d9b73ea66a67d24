//! Database-specific error types and conversions.

use storekeep_core::error::StorekeepError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Record already exists: {entity}")]
    AlreadyExists { entity: String },
}

impl From<DbError> for StorekeepError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => StorekeepError::NotFound { entity, id },
            DbError::AlreadyExists { entity } => StorekeepError::AlreadyExists { entity },
            // Everything else crosses the boundary as a generic
            // persistence failure; no structured codes leak out.
            other => StorekeepError::Persistence(other.to_string()),
        }
    }
}
