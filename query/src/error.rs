//! Path error types.

use hograph_codec::CodecError;
use hograph_core::PropertyType;
use hograph_graph::StoreError;
use hograph_pattern::PatternError;
use thiserror::Error;

/// Result type for path operations.
pub type PathResult<T> = Result<T, PathError>;

/// Errors that can occur while compiling or traversing paths.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("Path has no elements")]
    EmptyPath,

    #[error("Invalid adjacency: {left} cannot be followed by {right}")]
    InvalidAdjacency { left: String, right: String },

    #[error("Invalid variable name '{name}'")]
    InvalidVariable { name: String },

    #[error("Variable '{var}' is bound to both a {first} and a {second}")]
    ConflictingVariable {
        var: String,
        first: String,
        second: String,
    },

    #[error("Variable '{var}' is not bound when a later step needs it")]
    UnboundVariable { var: String },

    #[error("Invalid projection '{spec}': expected <variable>.<property>")]
    InvalidProjection { spec: String },

    #[error("Projection error: '{var}.{property}' is absent for some row")]
    Projection { var: String, property: String },

    #[error("Cannot sort on '{key}': it holds both {first} and {second} values")]
    UnsortableKey {
        key: String,
        first: PropertyType,
        second: PropertyType,
    },

    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PathError {
    pub fn invalid_adjacency(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::InvalidAdjacency {
            left: left.into(),
            right: right.into(),
        }
    }

    pub fn invalid_variable(name: impl Into<String>) -> Self {
        Self::InvalidVariable { name: name.into() }
    }

    pub fn conflicting_variable(
        var: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Self {
        Self::ConflictingVariable {
            var: var.into(),
            first: first.into(),
            second: second.into(),
        }
    }

    pub fn unbound_variable(var: impl Into<String>) -> Self {
        Self::UnboundVariable { var: var.into() }
    }

    pub fn invalid_projection(spec: impl Into<String>) -> Self {
        Self::InvalidProjection { spec: spec.into() }
    }

    pub fn unsortable_key(key: impl Into<String>, first: PropertyType, second: PropertyType) -> Self {
        Self::UnsortableKey {
            key: key.into(),
            first,
            second,
        }
    }

    pub fn projection(var: impl Into<String>, property: impl Into<String>) -> Self {
        Self::Projection {
            var: var.into(),
            property: property.into(),
        }
    }
}
