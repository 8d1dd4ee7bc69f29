use thiserror::Error;

/// Errors that can occur when reading from or writing to the host store.
#[derive(Debug, Error)]
pub enum HostStoreError {
    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for host store operations.
pub type Result<T> = std::result::Result<T, HostStoreError>;
