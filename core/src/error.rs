//! Model error types.

use crate::PropertyType;
use thiserror::Error;

/// Errors raised while constructing model values.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A value does not match its declared property type.
    #[error("Type mismatch for property '{key}': declared {expected}, got {actual}")]
    TypeMismatch {
        key: String,
        expected: PropertyType,
        actual: PropertyType,
    },

    /// A list property contains a list.
    #[error("Property '{key}' holds a nested list; list elements must be scalars")]
    NestedList { key: String },

    /// An identity was required but the entity was never persisted.
    #[error("{kind} has no store identity; add it before referencing it")]
    Unpersisted { kind: &'static str },
}

impl ModelError {
    pub fn type_mismatch(
        key: impl Into<String>,
        expected: PropertyType,
        actual: PropertyType,
    ) -> Self {
        Self::TypeMismatch {
            key: key.into(),
            expected,
            actual,
        }
    }

    pub fn nested_list(key: impl Into<String>) -> Self {
        Self::NestedList { key: key.into() }
    }

    pub fn unpersisted(kind: &'static str) -> Self {
        Self::Unpersisted { kind }
    }
}

/// Result type for model construction.
pub type ModelResult<T> = Result<T, ModelError>;
