//! Codec error types.

use hograph_core::{EdgeId, NodeId};
use hograph_graph::StoreError;
use thiserror::Error;

/// Errors raised while lowering or lifting.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A member node is unknown to the store.
    #[error("Dangling reference: node {0} does not exist")]
    DanglingNode(NodeId),

    /// A member edge is unknown to the store.
    #[error("Dangling reference: edge {0} does not exist")]
    DanglingEdge(EdgeId),

    /// A user label, type or property key collides with the reserved vocabulary.
    #[error("'{name}' is reserved for the higher-order encoding")]
    ReservedName { name: String },

    /// An identity that should name a subgraph names something else.
    #[error("{0} is not a subgraph")]
    NotASubgraph(NodeId),

    /// The stored shape of an element is inconsistent.
    #[error("corrupt encoding: {message}")]
    Corrupt { message: String },

    /// Store error, propagated unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CodecError {
    pub fn reserved_name(name: impl Into<String>) -> Self {
        Self::ReservedName { name: name.into() }
    }

    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::Corrupt {
            message: message.into(),
        }
    }

    /// True for the dangling-reference family.
    pub fn is_dangling(&self) -> bool {
        matches!(self, Self::DanglingNode(_) | Self::DanglingEdge(_))
    }
}

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
