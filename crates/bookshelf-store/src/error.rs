//! Error types for the storage layer.

use bookshelf_core::BookId;
use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database connection or query error.
    #[error("database error: {0}")]
    Connection(#[from] sqlx::Error),

    /// No book with this id.
    #[error("book not found: {0}")]
    BookNotFound(String),

    /// Store refused the operation (in-memory store in unavailable mode).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Migration error.
    #[error("migration error: {0}")]
    MigrationError(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl StoreError {
    pub fn not_found(id: BookId) -> Self {
        Self::BookNotFound(id.to_string())
    }

    /// Whether this error means the record is absent rather than the store failing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::BookNotFound(_))
    }
}

/// Failure of the add-then-delete pair.
///
/// Either half failing fails the pair. The other half is not rolled back.
#[derive(Debug, Error)]
pub enum CompoundError {
    /// The create half failed.
    #[error("error creating book: {0}")]
    Create(#[source] StoreError),

    /// The delete half failed.
    #[error("error deleting book: {0}")]
    Delete(#[source] StoreError),
}
