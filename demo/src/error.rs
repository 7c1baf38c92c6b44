//! Demo error types.

use hograph_storage::StorageError;
use thiserror::Error;

/// Errors raised while running a scenario.
#[derive(Debug, Error)]
pub enum DemoError {
    /// Storage error.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Model error.
    #[error("model error: {0}")]
    Model(#[from] hograph_core::ModelError),

    /// JSON error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The scenario name is not known.
    #[error("unknown scenario '{name}'")]
    UnknownScenario { name: String },

    /// A scenario observed something other than what it expected.
    #[error("scenario {scenario} failed: {message}")]
    Unexpected { scenario: String, message: String },
}

impl DemoError {
    pub fn unknown_scenario(name: impl Into<String>) -> Self {
        Self::UnknownScenario { name: name.into() }
    }

    pub fn unexpected(scenario: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unexpected {
            scenario: scenario.into(),
            message: message.into(),
        }
    }
}

/// Result type for demo operations.
pub type DemoResult<T> = Result<T, DemoError>;
