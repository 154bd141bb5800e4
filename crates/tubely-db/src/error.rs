//! Repository error types.

use thiserror::Error;

/// Result type for repository operations.
pub type DbResult<T> = Result<T, DbError>;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Record already exists: {0}")]
    AlreadyExists(String),
}

impl DbError {
    pub fn not_found(id: impl ToString) -> Self {
        Self::NotFound(id.to_string())
    }

    pub fn already_exists(id: impl ToString) -> Self {
        Self::AlreadyExists(id.to_string())
    }
}
