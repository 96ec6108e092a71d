/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database file could not be opened or created
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    /// Transaction could not be started
    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    /// Table could not be opened
    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    /// Read or write inside a table failed
    #[error("Storage backend error: {0}")]
    Backend(#[from] redb::StorageError),

    /// Commit failed
    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// In-memory store lock was poisoned
    #[error("Store lock poisoned")]
    Poisoned,
}
