//! Database-specific error types and conversions.

use rentbook_core::error::RentbookError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },
}

impl From<DbError> for RentbookError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => RentbookError::NotFound { entity, id },
            DbError::Validation(message) => RentbookError::Validation { message },
            other => RentbookError::Database(other.to_string()),
        }
    }
}
