use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur when reading or writing entities.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An added row collides with an existing key.
    #[error("Duplicate key in {table}: {id}")]
    DuplicateKey { table: &'static str, id: Uuid },

    /// A row collides with another on a unique constraint other than the key.
    #[error("Unique constraint {constraint} violated in {table}")]
    UniqueViolation {
        table: &'static str,
        constraint: String,
    },

    /// An updated row does not exist.
    #[error("Row not found in {table}: {id}")]
    NotFound { table: &'static str, id: Uuid },
}

/// Result type for persistence operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;
