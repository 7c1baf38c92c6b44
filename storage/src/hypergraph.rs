//! Hyperedge storage.

use crate::{GraphStorage, StorageConfig, StorageResult};
use hograph_codec::AuxKind;
use hograph_core::{HyperEdge, PropertySet};
use hograph_graph::GraphStore;
use hograph_pattern::IntoPattern;
use std::ops::{Deref, DerefMut};

/// Storage for n-ary relations over nodes.
///
/// Dereferences to [`GraphStorage`] for nodes, edges, clearing and
/// path traversal.
pub struct HyperGraphStorage<S: GraphStore> {
    base: GraphStorage<S>,
}

impl<S: GraphStore> HyperGraphStorage<S> {
    /// Create a storage with the default configuration.
    pub fn new(store: S) -> Self {
        Self {
            base: GraphStorage::new(store),
        }
    }

    /// Create a storage with an explicit configuration.
    pub fn with_config(store: S, config: StorageConfig) -> Self {
        Self {
            base: GraphStorage::with_config(store, config),
        }
    }

    /// Store a hyperedge over already stored members.
    ///
    /// Returns the hyperedge as lifted from the store.
    pub fn add_hyperedge(&mut self, hyperedge: &HyperEdge) -> StorageResult<HyperEdge> {
        let id = self.base.add_group(
            AuxKind::HyperEdge,
            &hyperedge.members,
            &hyperedge.labels,
            &hyperedge.properties,
        )?;
        let lifted = self.base.lift_group(AuxKind::HyperEdge, id)?;
        Ok(HyperEdge::persisted(
            lifted.id,
            lifted.members,
            lifted.labels,
            lifted.properties,
        ))
    }

    /// The first hyperedge matching the pattern.
    pub fn get_hyperedge(&self, pattern: impl IntoPattern) -> StorageResult<Option<HyperEdge>> {
        let Some(id) = self.base.find_group(AuxKind::HyperEdge, &pattern.into_pattern()?)? else {
            return Ok(None);
        };
        Ok(hograph_codec::decode_hyperedge(self.base.store(), id)?)
    }

    /// Replace the properties of the matching hyperedge. Members and labels
    /// are untouched. Returns whether a hyperedge matched.
    pub fn update_hyperedge(
        &mut self,
        pattern: impl IntoPattern,
        properties: impl Into<PropertySet>,
    ) -> StorageResult<bool> {
        self.base
            .update_group(AuxKind::HyperEdge, &pattern.into_pattern()?, properties.into())
    }

    /// Delete the matching hyperedge. Its members stay.
    pub fn delete_hyperedge(&mut self, pattern: impl IntoPattern) -> StorageResult<bool> {
        self.base.delete_group(AuxKind::HyperEdge, &pattern.into_pattern()?)
    }

    /// Number of hyperedges matching the pattern.
    pub fn get_hyperedge_count(&self, pattern: impl IntoPattern) -> StorageResult<usize> {
        self.base.count_group(AuxKind::HyperEdge, &pattern.into_pattern()?)
    }

    /// Close the store handle.
    pub fn close_connection(self) -> StorageResult<()> {
        self.base.close_connection()
    }

    /// Give the store handle back without closing it.
    pub fn into_inner(self) -> S {
        self.base.into_inner()
    }
}

impl<S: GraphStore> From<GraphStorage<S>> for HyperGraphStorage<S> {
    fn from(base: GraphStorage<S>) -> Self {
        Self { base }
    }
}

impl<S: GraphStore> Deref for HyperGraphStorage<S> {
    type Target = GraphStorage<S>;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

impl<S: GraphStore> DerefMut for HyperGraphStorage<S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.base
    }
}
