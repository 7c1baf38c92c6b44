//! Reserved vocabulary of the encoding.
//!
//! Labels and relationship types beginning with `_` and property keys
//! beginning with `_ho_` belong to the encoding. User data may not use them
//! when name checking is enabled.

use crate::{CodecError, CodecResult};
use hograph_core::{Label, LabelSet, PropertySet, Value};
use std::fmt;

/// Property on an auxiliary node naming the element kind.
pub const KIND_KEY: &str = "_ho_kind";

/// Property on a subgraph-edge relationship holding the user label.
pub const LABEL_KEY: &str = "_ho_label";

/// Property on ordered membership relationships holding the member index.
pub const POSITION_KEY: &str = "position";

/// Property on edge membership relationships holding the member edge identity.
pub const EDGE_ID_KEY: &str = "edge_id";

/// Member -> tuple auxiliary node.
pub const TUPLE_MEMBERSHIP: &str = "_tuple_membership";

/// Member -> hyperedge auxiliary node.
pub const ADJACENCY: &str = "_adjacency";

/// Member node -> subgraph auxiliary node.
pub const NODE_MEMBERSHIP: &str = "_node_membership";

/// Member edge source -> subgraph auxiliary node.
pub const EDGE_MEMBERSHIP: &str = "_edge_membership";

/// Subgraph auxiliary node -> subgraph auxiliary node.
pub const SUBGRAPH_EDGE: &str = "_subgraph_edge";

const RESERVED_LABEL_PREFIX: &str = "_";
const RESERVED_KEY_PREFIX: &str = "_ho_";

/// The kind of element an auxiliary node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuxKind {
    NodeTuple,
    HyperEdge,
    Subgraph,
}

impl AuxKind {
    /// Marker value stored under `_ho_kind`.
    pub fn as_str(self) -> &'static str {
        match self {
            AuxKind::NodeTuple => "node_tuple",
            AuxKind::HyperEdge => "hyperedge",
            AuxKind::Subgraph => "subgraph",
        }
    }

    /// Parse a stored marker value.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value.as_str()? {
            "node_tuple" => Some(AuxKind::NodeTuple),
            "hyperedge" => Some(AuxKind::HyperEdge),
            "subgraph" => Some(AuxKind::Subgraph),
            _ => None,
        }
    }

    /// Relationship type linking member nodes to the auxiliary node.
    pub fn membership_type(self) -> &'static str {
        match self {
            AuxKind::NodeTuple => TUPLE_MEMBERSHIP,
            AuxKind::HyperEdge => ADJACENCY,
            AuxKind::Subgraph => NODE_MEMBERSHIP,
        }
    }

    /// Whether membership records a position.
    pub fn is_ordered(self) -> bool {
        !matches!(self, AuxKind::Subgraph)
    }
}

impl fmt::Display for AuxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a label or relationship type belongs to the encoding.
pub fn is_reserved_label(name: &str) -> bool {
    name.starts_with(RESERVED_LABEL_PREFIX)
}

/// Whether a property key belongs to the encoding.
pub fn is_reserved_key(key: &str) -> bool {
    key.starts_with(RESERVED_KEY_PREFIX)
}

/// Reject user labels and property keys that collide with the encoding.
pub fn check_user_names(labels: &LabelSet, properties: &PropertySet) -> CodecResult<()> {
    for label in labels.iter() {
        check_user_label(label)?;
    }
    for key in properties.keys() {
        if is_reserved_key(key) {
            return Err(CodecError::reserved_name(key));
        }
    }
    Ok(())
}

/// Reject a single user label or edge type that collides with the encoding.
pub fn check_user_label(label: &Label) -> CodecResult<()> {
    if is_reserved_label(label.as_str()) {
        return Err(CodecError::reserved_name(label.as_str()));
    }
    Ok(())
}
