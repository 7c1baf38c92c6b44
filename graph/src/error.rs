//! Store error types.

use hograph_core::{EdgeId, NodeId};
use thiserror::Error;

/// Errors raised by a graph store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Node not found.
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// Relationship not found.
    #[error("Relationship not found: {0}")]
    EdgeNotFound(EdgeId),

    /// A transaction is already open on this handle.
    #[error("transaction already active")]
    AlreadyActive,

    /// Commit or rollback without an open transaction.
    #[error("no transaction is active")]
    NoActiveTransaction,

    /// The handle was closed.
    #[error("store connection is closed")]
    Closed,

    /// Failure reported by the backing store.
    #[error("store failure: {message}")]
    Backend { message: String },
}

impl StoreError {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
