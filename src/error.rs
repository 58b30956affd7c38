//! Error types for registry operations.

use thiserror::Error;

/// Errors returned by [`UserStore`](crate::store::UserStore) operations.
///
/// Every failed operation leaves the store unchanged; nothing is retried
/// internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A required create field was absent or empty.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The requested username is already taken by an existing record.
    #[error("username already exists: {username}")]
    Conflict { username: String },

    /// No record is stored under the given id.
    #[error("user not found: {id}")]
    NotFound { id: String },
}
