//! Indexes for label, type and adjacency lookups.

use hograph_core::{EdgeId, Label, NodeId};
use std::collections::{BTreeMap, BTreeSet};

/// Label index: Label -> Set<NodeId>
#[derive(Debug, Default)]
pub struct LabelIndex {
    index: BTreeMap<Label, BTreeSet<NodeId>>,
}

impl LabelIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: &Label, node_id: NodeId) {
        self.index.entry(label.clone()).or_default().insert(node_id);
    }

    pub fn remove(&mut self, label: &Label, node_id: NodeId) {
        if let Some(set) = self.index.get_mut(label) {
            set.remove(&node_id);
            if set.is_empty() {
                self.index.remove(label);
            }
        }
    }

    pub fn get(&self, label: &str) -> impl Iterator<Item = NodeId> + '_ {
        self.index
            .get(label)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    pub fn clear(&mut self) {
        self.index.clear();
    }
}

/// Relationship type index: Label -> Set<EdgeId>
#[derive(Debug, Default)]
pub struct RelTypeIndex {
    index: BTreeMap<Label, BTreeSet<EdgeId>>,
}

impl RelTypeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, rel_type: &Label, edge_id: EdgeId) {
        self.index
            .entry(rel_type.clone())
            .or_default()
            .insert(edge_id);
    }

    pub fn remove(&mut self, rel_type: &Label, edge_id: EdgeId) {
        if let Some(set) = self.index.get_mut(rel_type) {
            set.remove(&edge_id);
            if set.is_empty() {
                self.index.remove(rel_type);
            }
        }
    }

    pub fn get(&self, rel_type: &str) -> impl Iterator<Item = EdgeId> + '_ {
        self.index
            .get(rel_type)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    pub fn clear(&mut self) {
        self.index.clear();
    }
}

/// Adjacency index: NodeId -> { outbound: Map<Label, Set<EdgeId>>, inbound: ... }
#[derive(Debug, Default)]
pub struct AdjacencyIndex {
    /// Relationships where the node is the source
    outbound: BTreeMap<NodeId, BTreeMap<Label, BTreeSet<EdgeId>>>,
    /// Relationships where the node is the target
    inbound: BTreeMap<NodeId, BTreeMap<Label, BTreeSet<EdgeId>>>,
}

impl AdjacencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, edge_id: EdgeId, rel_type: &Label, source: NodeId, target: NodeId) {
        self.outbound
            .entry(source)
            .or_default()
            .entry(rel_type.clone())
            .or_default()
            .insert(edge_id);
        self.inbound
            .entry(target)
            .or_default()
            .entry(rel_type.clone())
            .or_default()
            .insert(edge_id);
    }

    pub fn remove(&mut self, edge_id: EdgeId, rel_type: &Label, source: NodeId, target: NodeId) {
        Self::remove_from(&mut self.outbound, edge_id, rel_type, source);
        Self::remove_from(&mut self.inbound, edge_id, rel_type, target);
    }

    fn remove_from(
        index: &mut BTreeMap<NodeId, BTreeMap<Label, BTreeSet<EdgeId>>>,
        edge_id: EdgeId,
        rel_type: &Label,
        node_id: NodeId,
    ) {
        if let Some(type_map) = index.get_mut(&node_id) {
            if let Some(set) = type_map.get_mut(rel_type) {
                set.remove(&edge_id);
                if set.is_empty() {
                    type_map.remove(rel_type);
                }
            }
            if type_map.is_empty() {
                index.remove(&node_id);
            }
        }
    }

    /// Relationships leaving a node.
    pub fn edges_from(&self, node_id: NodeId, rel_type: Option<&str>) -> BTreeSet<EdgeId> {
        Self::collect(&self.outbound, node_id, rel_type)
    }

    /// Relationships entering a node.
    pub fn edges_to(&self, node_id: NodeId, rel_type: Option<&str>) -> BTreeSet<EdgeId> {
        Self::collect(&self.inbound, node_id, rel_type)
    }

    fn collect(
        index: &BTreeMap<NodeId, BTreeMap<Label, BTreeSet<EdgeId>>>,
        node_id: NodeId,
        rel_type: Option<&str>,
    ) -> BTreeSet<EdgeId> {
        let Some(type_map) = index.get(&node_id) else {
            return BTreeSet::new();
        };
        match rel_type {
            Some(rel_type) => type_map.get(rel_type).cloned().unwrap_or_default(),
            None => type_map.values().flatten().copied().collect(),
        }
    }

    pub fn clear(&mut self) {
        self.outbound.clear();
        self.inbound.clear();
    }
}
