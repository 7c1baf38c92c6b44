//! Storage error types.

use hograph_codec::CodecError;
use hograph_core::ModelError;
use hograph_graph::StoreError;
use hograph_pattern::PatternError;
use hograph_query::PathError;
use thiserror::Error;

/// Errors surfaced by the storage facades.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Model error.
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    /// Store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Encoding error.
    #[error("encoding error: {0}")]
    Codec(#[from] CodecError),

    /// Pattern error.
    #[error("pattern error: {0}")]
    Pattern(#[from] PatternError),

    /// Path error.
    #[error("path error: {0}")]
    Path(#[from] PathError),
}

impl StorageError {
    /// True when an add referenced a node or edge unknown to the store.
    pub fn is_dangling_reference(&self) -> bool {
        match self {
            Self::Codec(err) => err.is_dangling(),
            _ => false,
        }
    }

    /// The store error at the root of this error, however deeply wrapped.
    pub fn store_error(&self) -> Option<&StoreError> {
        match self {
            Self::Store(err) => Some(err),
            Self::Codec(CodecError::Store(err)) => Some(err),
            Self::Pattern(err) => pattern_store_error(err),
            Self::Path(PathError::Store(err)) => Some(err),
            Self::Path(PathError::Codec(CodecError::Store(err))) => Some(err),
            Self::Path(PathError::Pattern(err)) => pattern_store_error(err),
            _ => None,
        }
    }
}

fn pattern_store_error(err: &PatternError) -> Option<&StoreError> {
    match err {
        PatternError::Store(err) => Some(err),
        PatternError::Codec(CodecError::Store(err)) => Some(err),
        _ => None,
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
