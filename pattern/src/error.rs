//! Pattern error types.

use hograph_codec::CodecError;
use hograph_graph::StoreError;
use thiserror::Error;

/// Errors that can occur during pattern matching.
#[derive(Debug, Error)]
pub enum PatternError {
    /// The pattern contradicts itself.
    #[error("Malformed pattern: {message}")]
    MalformedPattern { message: String },

    /// More than one element matched under the unique-match policy.
    #[error("Ambiguous match: {count} {kind} elements match the pattern")]
    AmbiguousMatch { kind: String, count: usize },

    /// Lifting failed while matching.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Store error, propagated unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PatternError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedPattern {
            message: message.into(),
        }
    }

    pub fn ambiguous(kind: impl Into<String>, count: usize) -> Self {
        Self::AmbiguousMatch {
            kind: kind.into(),
            count,
        }
    }
}

/// Result type for pattern operations.
pub type PatternResult<T> = Result<T, PatternError>;
