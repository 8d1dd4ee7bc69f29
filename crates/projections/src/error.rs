//! Projection error types.

use thiserror::Error;

/// Errors that can occur while producing the public table.
///
/// Missing data is never an error; only the collaborators can fail.
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// An error occurred in the host store.
    #[error("Host store error: {0}")]
    Store(#[from] host_store::HostStoreError),
}

/// Result type for projection operations.
pub type Result<T> = std::result::Result<T, ProjectionError>;
