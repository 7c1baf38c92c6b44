//! In-memory graph store.

use crate::index::{AdjacencyIndex, LabelIndex, RelTypeIndex};
use crate::txn::{UndoEntry, UndoLog};
use crate::{Direction, GraphStore, StoreError, StoreResult};
use hograph_core::{Edge, EdgeId, Label, LabelSet, Node, NodeId, PropertySet};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, trace};

/// ID allocator for nodes and relationships.
#[derive(Debug)]
struct IdAllocator {
    next_node_id: u64,
    next_edge_id: u64,
}

impl IdAllocator {
    fn new() -> Self {
        Self {
            next_node_id: 1,
            next_edge_id: 1,
        }
    }

    fn alloc_node_id(&mut self) -> NodeId {
        let id = NodeId::new(self.next_node_id);
        self.next_node_id += 1;
        id
    }

    fn alloc_edge_id(&mut self) -> EdgeId {
        let id = EdgeId::new(self.next_edge_id);
        self.next_edge_id += 1;
        id
    }
}

/// The in-memory graph store.
///
/// Identities are allocated monotonically and never reused, so id order is
/// creation order and every enumeration is deterministic.
#[derive(Debug)]
pub struct MemoryGraph {
    /// Node storage
    nodes: BTreeMap<NodeId, Node>,
    /// Relationship storage
    edges: BTreeMap<EdgeId, Edge>,
    /// ID allocator
    id_alloc: IdAllocator,
    /// Label index
    label_index: LabelIndex,
    /// Relationship type index
    type_index: RelTypeIndex,
    /// Adjacency index
    adj_index: AdjacencyIndex,
    /// Undo log of the open transaction
    txn: Option<UndoLog>,
    closed: bool,
}

impl Default for MemoryGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            edges: BTreeMap::new(),
            id_alloc: IdAllocator::new(),
            label_index: LabelIndex::new(),
            type_index: RelTypeIndex::new(),
            adj_index: AdjacencyIndex::new(),
            txn: None,
            closed: false,
        }
    }

    /// Whether a transaction is open.
    pub fn in_transaction(&self) -> bool {
        self.txn.is_some()
    }

    fn ensure_open(&self) -> StoreResult<()> {
        if self.closed {
            Err(StoreError::Closed)
        } else {
            Ok(())
        }
    }

    fn record(&mut self, entry: UndoEntry) {
        if let Some(log) = self.txn.as_mut() {
            log.record(entry);
        }
    }

    // ==================== Raw storage ====================

    fn insert_node(&mut self, node: Node) {
        let Some(id) = node.id() else {
            return;
        };
        for label in node.labels.iter() {
            self.label_index.insert(label, id);
        }
        self.nodes.insert(id, node);
    }

    fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        let node = self.nodes.remove(&id)?;
        for label in node.labels.iter() {
            self.label_index.remove(label, id);
        }
        Some(node)
    }

    fn insert_edge(&mut self, edge: Edge) {
        let Some(id) = edge.id() else {
            return;
        };
        self.type_index.insert(&edge.label, id);
        self.adj_index.insert(id, &edge.label, edge.source, edge.target);
        self.edges.insert(id, edge);
    }

    fn remove_edge(&mut self, id: EdgeId) -> Option<Edge> {
        let edge = self.edges.remove(&id)?;
        self.type_index.remove(&edge.label, id);
        self.adj_index.remove(id, &edge.label, edge.source, edge.target);
        Some(edge)
    }

    fn undo(&mut self, entry: UndoEntry) {
        match entry {
            UndoEntry::CreatedNode(id) => {
                self.remove_node(id);
            }
            UndoEntry::CreatedRelationship(id) => {
                self.remove_edge(id);
            }
            UndoEntry::DeletedNode(node) => self.insert_node(node),
            UndoEntry::DeletedRelationship(edge) => self.insert_edge(edge),
            UndoEntry::NodeProperties { id, old } => {
                if let Some(node) = self.nodes.get_mut(&id) {
                    node.properties = old;
                }
            }
            UndoEntry::RelationshipProperties { id, old } => {
                if let Some(edge) = self.edges.get_mut(&id) {
                    edge.properties = old;
                }
            }
        }
    }
}

impl GraphStore for MemoryGraph {
    // ==================== Node Operations ====================

    fn create_node(&mut self, labels: LabelSet, properties: PropertySet) -> StoreResult<NodeId> {
        self.ensure_open()?;
        let id = self.id_alloc.alloc_node_id();
        self.insert_node(Node::persisted(id, labels, properties));
        self.record(UndoEntry::CreatedNode(id));
        Ok(id)
    }

    fn node(&self, id: NodeId) -> StoreResult<Option<Node>> {
        self.ensure_open()?;
        Ok(self.nodes.get(&id).cloned())
    }

    fn set_node_properties(&mut self, id: NodeId, properties: PropertySet) -> StoreResult<()> {
        self.ensure_open()?;
        let node = self.nodes.get_mut(&id).ok_or(StoreError::NodeNotFound(id))?;
        let old = std::mem::replace(&mut node.properties, properties);
        self.record(UndoEntry::NodeProperties { id, old });
        Ok(())
    }

    fn delete_node(&mut self, id: NodeId) -> StoreResult<()> {
        self.ensure_open()?;
        if !self.nodes.contains_key(&id) {
            return Err(StoreError::NodeNotFound(id));
        }

        // Detach first so the node comes back before its relationships on undo
        let attached = self.relationships(id, Direction::Both, None)?;
        for edge_id in attached {
            self.delete_relationship(edge_id)?;
        }

        if let Some(node) = self.remove_node(id) {
            self.record(UndoEntry::DeletedNode(node));
        }
        Ok(())
    }

    // ==================== Relationship Operations ====================

    fn create_relationship(
        &mut self,
        source: NodeId,
        target: NodeId,
        rel_type: Label,
        properties: PropertySet,
    ) -> StoreResult<EdgeId> {
        self.ensure_open()?;
        for endpoint in [source, target] {
            if !self.nodes.contains_key(&endpoint) {
                return Err(StoreError::NodeNotFound(endpoint));
            }
        }

        let id = self.id_alloc.alloc_edge_id();
        trace!(%id, %source, %target, rel_type = %rel_type, "create relationship");
        self.insert_edge(Edge::persisted(id, source, target, rel_type, properties));
        self.record(UndoEntry::CreatedRelationship(id));
        Ok(id)
    }

    fn relationship(&self, id: EdgeId) -> StoreResult<Option<Edge>> {
        self.ensure_open()?;
        Ok(self.edges.get(&id).cloned())
    }

    fn set_relationship_properties(
        &mut self,
        id: EdgeId,
        properties: PropertySet,
    ) -> StoreResult<()> {
        self.ensure_open()?;
        let edge = self.edges.get_mut(&id).ok_or(StoreError::EdgeNotFound(id))?;
        let old = std::mem::replace(&mut edge.properties, properties);
        self.record(UndoEntry::RelationshipProperties { id, old });
        Ok(())
    }

    fn delete_relationship(&mut self, id: EdgeId) -> StoreResult<()> {
        self.ensure_open()?;
        let edge = self.remove_edge(id).ok_or(StoreError::EdgeNotFound(id))?;
        self.record(UndoEntry::DeletedRelationship(edge));
        Ok(())
    }

    // ==================== Query Operations ====================

    fn node_ids(&self) -> StoreResult<Vec<NodeId>> {
        self.ensure_open()?;
        Ok(self.nodes.keys().copied().collect())
    }

    fn nodes_with_label(&self, label: &str) -> StoreResult<Vec<NodeId>> {
        self.ensure_open()?;
        Ok(self.label_index.get(label).collect())
    }

    fn relationship_ids(&self) -> StoreResult<Vec<EdgeId>> {
        self.ensure_open()?;
        Ok(self.edges.keys().copied().collect())
    }

    fn relationships_of_type(&self, rel_type: &str) -> StoreResult<Vec<EdgeId>> {
        self.ensure_open()?;
        Ok(self.type_index.get(rel_type).collect())
    }

    fn relationships(
        &self,
        node: NodeId,
        direction: Direction,
        rel_type: Option<&str>,
    ) -> StoreResult<Vec<EdgeId>> {
        self.ensure_open()?;
        let ids: BTreeSet<EdgeId> = match direction {
            Direction::Outgoing => self.adj_index.edges_from(node, rel_type),
            Direction::Incoming => self.adj_index.edges_to(node, rel_type),
            Direction::Both => {
                let mut ids = self.adj_index.edges_from(node, rel_type);
                ids.extend(self.adj_index.edges_to(node, rel_type));
                ids
            }
        };
        Ok(ids.into_iter().collect())
    }

    // ==================== Statistics ====================

    fn node_count(&self) -> StoreResult<usize> {
        self.ensure_open()?;
        Ok(self.nodes.len())
    }

    fn relationship_count(&self) -> StoreResult<usize> {
        self.ensure_open()?;
        Ok(self.edges.len())
    }

    fn clear(&mut self) -> StoreResult<()> {
        self.ensure_open()?;
        if self.txn.is_some() {
            // Go through the logged paths so a rollback can restore everything
            let edge_ids: Vec<EdgeId> = self.edges.keys().copied().collect();
            for id in edge_ids {
                self.delete_relationship(id)?;
            }
            let node_ids: Vec<NodeId> = self.nodes.keys().copied().collect();
            for id in node_ids {
                self.delete_node(id)?;
            }
        } else {
            self.nodes.clear();
            self.edges.clear();
            self.label_index.clear();
            self.type_index.clear();
            self.adj_index.clear();
        }
        Ok(())
    }

    // ==================== Transactions ====================

    fn begin(&mut self) -> StoreResult<()> {
        self.ensure_open()?;
        if self.txn.is_some() {
            return Err(StoreError::AlreadyActive);
        }
        self.txn = Some(UndoLog::new());
        Ok(())
    }

    fn commit(&mut self) -> StoreResult<()> {
        self.ensure_open()?;
        let log = self.txn.take().ok_or(StoreError::NoActiveTransaction)?;
        trace!(changes = log.len(), "commit");
        Ok(())
    }

    fn rollback(&mut self) -> StoreResult<()> {
        self.ensure_open()?;
        let log = self.txn.take().ok_or(StoreError::NoActiveTransaction)?;
        debug!(changes = log.len(), "rollback");
        for entry in log.into_reverse() {
            self.undo(entry);
        }
        Ok(())
    }

    fn close(&mut self) -> StoreResult<()> {
        self.ensure_open()?;
        if let Some(log) = self.txn.take() {
            for entry in log.into_reverse() {
                self.undo(entry);
            }
        }
        self.closed = true;
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}
