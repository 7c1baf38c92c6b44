//! A store that fails after a fixed number of writes.

use hograph_core::{Edge, EdgeId, Label, LabelSet, Node, NodeId, PropertySet};
use hograph_graph::{Direction, GraphStore, StoreError, StoreResult};

/// Wraps a store and fails every write once `budget` writes have succeeded.
///
/// Reads and transaction control always pass through, so a facade can still
/// roll back after the injected failure.
pub struct FailingStore<S: GraphStore> {
    inner: S,
    budget: usize,
    writes: usize,
}

impl<S: GraphStore> FailingStore<S> {
    /// Allow `budget` successful writes, then fail.
    pub fn new(inner: S, budget: usize) -> Self {
        Self {
            inner,
            budget,
            writes: 0,
        }
    }

    /// Number of writes attempted so far, failed ones included.
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Grant `budget` more successful writes from now on.
    pub fn refill(&mut self, budget: usize) {
        self.budget = self.writes + budget;
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    fn write(&mut self) -> StoreResult<()> {
        self.writes += 1;
        if self.writes > self.budget {
            return Err(StoreError::backend(format!(
                "injected failure on write {}",
                self.writes
            )));
        }
        Ok(())
    }
}

impl<S: GraphStore> GraphStore for FailingStore<S> {
    fn create_node(&mut self, labels: LabelSet, properties: PropertySet) -> StoreResult<NodeId> {
        self.write()?;
        self.inner.create_node(labels, properties)
    }

    fn node(&self, id: NodeId) -> StoreResult<Option<Node>> {
        self.inner.node(id)
    }

    fn set_node_properties(&mut self, id: NodeId, properties: PropertySet) -> StoreResult<()> {
        self.write()?;
        self.inner.set_node_properties(id, properties)
    }

    fn delete_node(&mut self, id: NodeId) -> StoreResult<()> {
        self.write()?;
        self.inner.delete_node(id)
    }

    fn create_relationship(
        &mut self,
        source: NodeId,
        target: NodeId,
        rel_type: Label,
        properties: PropertySet,
    ) -> StoreResult<EdgeId> {
        self.write()?;
        self.inner.create_relationship(source, target, rel_type, properties)
    }

    fn relationship(&self, id: EdgeId) -> StoreResult<Option<Edge>> {
        self.inner.relationship(id)
    }

    fn set_relationship_properties(
        &mut self,
        id: EdgeId,
        properties: PropertySet,
    ) -> StoreResult<()> {
        self.write()?;
        self.inner.set_relationship_properties(id, properties)
    }

    fn delete_relationship(&mut self, id: EdgeId) -> StoreResult<()> {
        self.write()?;
        self.inner.delete_relationship(id)
    }

    fn node_ids(&self) -> StoreResult<Vec<NodeId>> {
        self.inner.node_ids()
    }

    fn nodes_with_label(&self, label: &str) -> StoreResult<Vec<NodeId>> {
        self.inner.nodes_with_label(label)
    }

    fn relationship_ids(&self) -> StoreResult<Vec<EdgeId>> {
        self.inner.relationship_ids()
    }

    fn relationships_of_type(&self, rel_type: &str) -> StoreResult<Vec<EdgeId>> {
        self.inner.relationships_of_type(rel_type)
    }

    fn relationships(
        &self,
        node: NodeId,
        direction: Direction,
        rel_type: Option<&str>,
    ) -> StoreResult<Vec<EdgeId>> {
        self.inner.relationships(node, direction, rel_type)
    }

    fn node_count(&self) -> StoreResult<usize> {
        self.inner.node_count()
    }

    fn relationship_count(&self) -> StoreResult<usize> {
        self.inner.relationship_count()
    }

    fn clear(&mut self) -> StoreResult<()> {
        self.write()?;
        self.inner.clear()
    }

    fn begin(&mut self) -> StoreResult<()> {
        self.inner.begin()
    }

    fn commit(&mut self) -> StoreResult<()> {
        self.inner.commit()
    }

    fn rollback(&mut self) -> StoreResult<()> {
        self.inner.rollback()
    }

    fn close(&mut self) -> StoreResult<()> {
        self.inner.close()
    }

    fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }
}
