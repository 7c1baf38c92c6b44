//! The store contract.

use crate::StoreResult;
use hograph_core::{Edge, EdgeId, Label, LabelSet, Node, NodeId, PropertySet};

/// Which relationships of a node to enumerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Relationships whose source is the node.
    Outgoing,
    /// Relationships whose target is the node.
    Incoming,
    /// Both of the above.
    Both,
}

/// A binary property-graph store.
///
/// Nodes carry a label set and properties; relationships are directed and
/// carry exactly one type. Reads return owned snapshots. Enumerations are in
/// store order, which is creation order for `MemoryGraph`.
///
/// Transactions are single level: `begin` while one is open fails with
/// `AlreadyActive`. Every operation on a closed handle fails with `Closed`.
pub trait GraphStore {
    /// Create a node and return its identity.
    fn create_node(&mut self, labels: LabelSet, properties: PropertySet) -> StoreResult<NodeId>;

    /// Read a node.
    fn node(&self, id: NodeId) -> StoreResult<Option<Node>>;

    /// Replace a node's whole property set.
    fn set_node_properties(&mut self, id: NodeId, properties: PropertySet) -> StoreResult<()>;

    /// Delete a node together with every relationship attached to it.
    fn delete_node(&mut self, id: NodeId) -> StoreResult<()>;

    /// Create a relationship between two existing nodes.
    fn create_relationship(
        &mut self,
        source: NodeId,
        target: NodeId,
        rel_type: Label,
        properties: PropertySet,
    ) -> StoreResult<EdgeId>;

    /// Read a relationship. The returned edge's label is the relationship type.
    fn relationship(&self, id: EdgeId) -> StoreResult<Option<Edge>>;

    /// Replace a relationship's whole property set.
    fn set_relationship_properties(
        &mut self,
        id: EdgeId,
        properties: PropertySet,
    ) -> StoreResult<()>;

    /// Delete a relationship.
    fn delete_relationship(&mut self, id: EdgeId) -> StoreResult<()>;

    /// All node identities.
    fn node_ids(&self) -> StoreResult<Vec<NodeId>>;

    /// Nodes carrying the given label.
    fn nodes_with_label(&self, label: &str) -> StoreResult<Vec<NodeId>>;

    /// All relationship identities.
    fn relationship_ids(&self) -> StoreResult<Vec<EdgeId>>;

    /// Relationships of the given type.
    fn relationships_of_type(&self, rel_type: &str) -> StoreResult<Vec<EdgeId>>;

    /// Relationships attached to a node, optionally restricted to one type.
    fn relationships(
        &self,
        node: NodeId,
        direction: Direction,
        rel_type: Option<&str>,
    ) -> StoreResult<Vec<EdgeId>>;

    /// Number of nodes.
    fn node_count(&self) -> StoreResult<usize>;

    /// Number of relationships.
    fn relationship_count(&self) -> StoreResult<usize>;

    /// Remove every node and relationship.
    fn clear(&mut self) -> StoreResult<()>;

    /// Open a transaction.
    fn begin(&mut self) -> StoreResult<()>;

    /// Make the open transaction's changes permanent.
    fn commit(&mut self) -> StoreResult<()>;

    /// Undo every change made since `begin`.
    fn rollback(&mut self) -> StoreResult<()>;

    /// Release the handle. Further operations fail with `Closed`.
    fn close(&mut self) -> StoreResult<()>;

    /// Whether `close` has been called.
    fn is_closed(&self) -> bool;

    /// Whether a node exists.
    fn contains_node(&self, id: NodeId) -> StoreResult<bool> {
        Ok(self.node(id)?.is_some())
    }

    /// Whether a relationship exists.
    fn contains_relationship(&self, id: EdgeId) -> StoreResult<bool> {
        Ok(self.relationship(id)?.is_some())
    }
}

impl<T: GraphStore + ?Sized> GraphStore for &mut T {
    fn create_node(&mut self, labels: LabelSet, properties: PropertySet) -> StoreResult<NodeId> {
        (**self).create_node(labels, properties)
    }

    fn node(&self, id: NodeId) -> StoreResult<Option<Node>> {
        (**self).node(id)
    }

    fn set_node_properties(&mut self, id: NodeId, properties: PropertySet) -> StoreResult<()> {
        (**self).set_node_properties(id, properties)
    }

    fn delete_node(&mut self, id: NodeId) -> StoreResult<()> {
        (**self).delete_node(id)
    }

    fn create_relationship(
        &mut self,
        source: NodeId,
        target: NodeId,
        rel_type: Label,
        properties: PropertySet,
    ) -> StoreResult<EdgeId> {
        (**self).create_relationship(source, target, rel_type, properties)
    }

    fn relationship(&self, id: EdgeId) -> StoreResult<Option<Edge>> {
        (**self).relationship(id)
    }

    fn set_relationship_properties(
        &mut self,
        id: EdgeId,
        properties: PropertySet,
    ) -> StoreResult<()> {
        (**self).set_relationship_properties(id, properties)
    }

    fn delete_relationship(&mut self, id: EdgeId) -> StoreResult<()> {
        (**self).delete_relationship(id)
    }

    fn node_ids(&self) -> StoreResult<Vec<NodeId>> {
        (**self).node_ids()
    }

    fn nodes_with_label(&self, label: &str) -> StoreResult<Vec<NodeId>> {
        (**self).nodes_with_label(label)
    }

    fn relationship_ids(&self) -> StoreResult<Vec<EdgeId>> {
        (**self).relationship_ids()
    }

    fn relationships_of_type(&self, rel_type: &str) -> StoreResult<Vec<EdgeId>> {
        (**self).relationships_of_type(rel_type)
    }

    fn relationships(
        &self,
        node: NodeId,
        direction: Direction,
        rel_type: Option<&str>,
    ) -> StoreResult<Vec<EdgeId>> {
        (**self).relationships(node, direction, rel_type)
    }

    fn node_count(&self) -> StoreResult<usize> {
        (**self).node_count()
    }

    fn relationship_count(&self) -> StoreResult<usize> {
        (**self).relationship_count()
    }

    fn clear(&mut self) -> StoreResult<()> {
        (**self).clear()
    }

    fn begin(&mut self) -> StoreResult<()> {
        (**self).begin()
    }

    fn commit(&mut self) -> StoreResult<()> {
        (**self).commit()
    }

    fn rollback(&mut self) -> StoreResult<()> {
        (**self).rollback()
    }

    fn close(&mut self) -> StoreResult<()> {
        (**self).close()
    }

    fn is_closed(&self) -> bool {
        (**self).is_closed()
    }
}
