//! Variable bindings for path traversal.

use hograph_core::{EdgeId, NodeId};
use std::collections::BTreeMap;

/// What a path variable is bound to.
///
/// Nodes and higher-order elements bind by node identity (an element's
/// auxiliary node); edges and subgraph-edges bind by relationship identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// A plain node or an auxiliary node.
    Node(NodeId),
    /// A user edge or a subgraph-edge.
    Edge(EdgeId),
}

impl Binding {
    /// Get as node ID if this is a node binding.
    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            Binding::Node(id) => Some(*id),
            Binding::Edge(_) => None,
        }
    }

    /// Get as edge ID if this is an edge binding.
    pub fn as_edge(&self) -> Option<EdgeId> {
        match self {
            Binding::Edge(id) => Some(*id),
            Binding::Node(_) => None,
        }
    }
}

impl From<NodeId> for Binding {
    fn from(id: NodeId) -> Self {
        Binding::Node(id)
    }
}

impl From<EdgeId> for Binding {
    fn from(id: EdgeId) -> Self {
        Binding::Edge(id)
    }
}

/// One assignment of path variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    map: BTreeMap<String, Binding>,
}

impl Bindings {
    /// Create new empty bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create bindings with a single entry.
    pub fn with(name: impl Into<String>, binding: impl Into<Binding>) -> Self {
        let mut bindings = Self::new();
        bindings.insert(name, binding);
        bindings
    }

    /// Insert a binding, replacing any previous one.
    pub fn insert(&mut self, name: impl Into<String>, binding: impl Into<Binding>) {
        self.map.insert(name.into(), binding.into());
    }

    /// Get a binding by name.
    pub fn get(&self, name: &str) -> Option<Binding> {
        self.map.get(name).copied()
    }

    /// Check if a variable is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Clone with an additional binding, joining on identity.
    ///
    /// Returns `None` when the variable is already bound to something else.
    pub fn extend_with(&self, name: &str, binding: impl Into<Binding>) -> Option<Self> {
        let binding = binding.into();
        match self.map.get(name) {
            Some(existing) if *existing != binding => None,
            Some(_) => Some(self.clone()),
            None => {
                let mut extended = self.clone();
                extended.map.insert(name.to_string(), binding);
                Some(extended)
            }
        }
    }

    /// Get the number of bindings.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over bindings by variable name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Binding)> {
        self.map.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
