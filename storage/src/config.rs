//! Facade configuration.

use serde::{Deserialize, Serialize};

pub use hograph_pattern::MatchPolicy;

/// Policy shared by every facade operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// How get/update/delete treat a pattern with several matches.
    pub match_policy: MatchPolicy,
    /// Reject user labels, edge labels and property keys from the reserved vocabulary.
    pub check_reserved_names: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            match_policy: MatchPolicy::FirstMatch,
            check_reserved_names: true,
        }
    }
}

impl StorageConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_match_policy(mut self, policy: MatchPolicy) -> Self {
        self.match_policy = policy;
        self
    }

    pub fn with_reserved_name_checks(mut self, enabled: bool) -> Self {
        self.check_reserved_names = enabled;
        self
    }

    /// Unique matches required, reserved names rejected.
    pub fn strict() -> Self {
        Self {
            match_policy: MatchPolicy::RequireUnique,
            check_reserved_names: true,
        }
    }

    /// Load a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
