//! Node tuple storage.

use crate::{GraphStorage, StorageConfig, StorageResult};
use hograph_codec::{decode_node_tuple, AuxKind};
use hograph_core::{NodeTuple, PropertySet};
use hograph_graph::GraphStore;
use hograph_pattern::IntoPattern;
use std::ops::{Deref, DerefMut};

/// Storage for ordered groupings of nodes.
pub struct TupleStorage<S: GraphStore> {
    base: GraphStorage<S>,
}

impl<S: GraphStore> TupleStorage<S> {
    pub fn new(store: S) -> Self {
        Self {
            base: GraphStorage::new(store),
        }
    }

    pub fn with_config(store: S, config: StorageConfig) -> Self {
        Self {
            base: GraphStorage::with_config(store, config),
        }
    }

    /// Store a tuple over already stored members, keeping member order.
    /// A node may appear more than once.
    pub fn add_node_tuple(&mut self, tuple: &NodeTuple) -> StorageResult<NodeTuple> {
        let id = self.base.add_group(
            AuxKind::NodeTuple,
            &tuple.members,
            &tuple.labels,
            &tuple.properties,
        )?;
        let lifted = self.base.lift_group(AuxKind::NodeTuple, id)?;
        Ok(NodeTuple::persisted(
            lifted.id,
            lifted.members,
            lifted.labels,
            lifted.properties,
        ))
    }

    pub fn get_node_tuple(&self, pattern: impl IntoPattern) -> StorageResult<Option<NodeTuple>> {
        let Some(id) = self.base.find_group(AuxKind::NodeTuple, &pattern.into_pattern()?)? else {
            return Ok(None);
        };
        Ok(decode_node_tuple(self.base.store(), id)?)
    }

    pub fn update_node_tuple(
        &mut self,
        pattern: impl IntoPattern,
        properties: impl Into<PropertySet>,
    ) -> StorageResult<bool> {
        self.base
            .update_group(AuxKind::NodeTuple, &pattern.into_pattern()?, properties.into())
    }

    pub fn delete_node_tuple(&mut self, pattern: impl IntoPattern) -> StorageResult<bool> {
        self.base.delete_group(AuxKind::NodeTuple, &pattern.into_pattern()?)
    }

    pub fn get_node_tuple_count(&self, pattern: impl IntoPattern) -> StorageResult<usize> {
        self.base.count_group(AuxKind::NodeTuple, &pattern.into_pattern()?)
    }

    pub fn close_connection(self) -> StorageResult<()> {
        self.base.close_connection()
    }

    pub fn into_inner(self) -> S {
        self.base.into_inner()
    }
}

impl<S: GraphStore> From<GraphStorage<S>> for TupleStorage<S> {
    fn from(base: GraphStorage<S>) -> Self {
        Self { base }
    }
}

impl<S: GraphStore> Deref for TupleStorage<S> {
    type Target = GraphStorage<S>;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

impl<S: GraphStore> DerefMut for TupleStorage<S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.base
    }
}
