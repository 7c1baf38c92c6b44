//! Subgraph and subgraph-edge storage.

use crate::{GraphStorage, StorageConfig, StorageError, StorageResult};
use hograph_codec::vocab::check_user_label;
use hograph_codec::{
    decode_subgraph, decode_subgraph_edge, encode_subgraph, encode_subgraph_edge,
    replace_subgraph_edge_properties, AuxKind, CodecError,
};
use hograph_core::{Edge, LabelSet, Node, PropertySet, Subgraph, SubgraphEdge};
use hograph_graph::GraphStore;
use hograph_pattern::{EdgePattern, IntoPattern};
use std::ops::{Deref, DerefMut};
use tracing::debug;

/// Storage for subgraphs and the relationships between them.
///
/// A subgraph holds member nodes and member edges by identity. Subgraphs
/// may share members; deleting one never touches the others.
pub struct SubgraphStorage<S: GraphStore> {
    base: GraphStorage<S>,
}

impl<S: GraphStore> SubgraphStorage<S> {
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

    // ==================== Subgraphs ====================

    /// Store a subgraph over already stored nodes and edges.
    ///
    /// Repeated members are collapsed. Member edges need not connect member
    /// nodes.
    pub fn add_subgraph(&mut self, subgraph: &Subgraph) -> StorageResult<Subgraph> {
        subgraph.properties.validate()?;
        self.base
            .check_names(&subgraph.labels, &subgraph.properties)?;
        let nodes = subgraph
            .nodes
            .iter()
            .map(Node::require_id)
            .collect::<Result<Vec<_>, _>>()?;
        let edges = subgraph
            .edges
            .iter()
            .map(Edge::require_id)
            .collect::<Result<Vec<_>, _>>()?;

        let labels = &subgraph.labels;
        let properties = &subgraph.properties;
        let id = self.base.atomically(|store| {
            Ok(encode_subgraph(store, &nodes, &edges, labels, properties)?)
        })?;
        debug!(
            kind = %AuxKind::Subgraph,
            %id,
            nodes = nodes.len(),
            edges = edges.len(),
            "add element"
        );

        decode_subgraph(self.base.store(), id)?.ok_or_else(|| {
            StorageError::from(CodecError::corrupt(format!("subgraph {} vanished", id)))
        })
    }

    /// The first subgraph matching the pattern. Every member node and member
    /// edge the pattern names must belong to the subgraph.
    pub fn get_subgraph(&self, pattern: impl IntoPattern) -> StorageResult<Option<Subgraph>> {
        let Some(id) = self.base.find_group(AuxKind::Subgraph, &pattern.into_pattern()?)? else {
            return Ok(None);
        };
        Ok(decode_subgraph(self.base.store(), id)?)
    }

    /// Replace the properties of the matching subgraph.
    pub fn update_subgraph(
        &mut self,
        pattern: impl IntoPattern,
        properties: impl Into<PropertySet>,
    ) -> StorageResult<bool> {
        self.base
            .update_group(AuxKind::Subgraph, &pattern.into_pattern()?, properties.into())
    }

    /// Delete the matching subgraph with its subgraph-edges. Member nodes
    /// and edges stay.
    pub fn delete_subgraph(&mut self, pattern: impl IntoPattern) -> StorageResult<bool> {
        self.base.delete_group(AuxKind::Subgraph, &pattern.into_pattern()?)
    }

    pub fn get_subgraph_count(&self, pattern: impl IntoPattern) -> StorageResult<usize> {
        self.base.count_group(AuxKind::Subgraph, &pattern.into_pattern()?)
    }

    // ==================== Subgraph-edges ====================

    /// Store a directed relationship between two stored subgraphs.
    pub fn add_subgraph_edge(&mut self, edge: &SubgraphEdge) -> StorageResult<SubgraphEdge> {
        edge.properties.validate()?;
        if self.base.config().check_reserved_names {
            check_user_label(&edge.label)?;
        }
        self.base.check_names(&LabelSet::new(), &edge.properties)?;

        let id = self.base.atomically(|store| {
            Ok(encode_subgraph_edge(
                store,
                edge.source,
                edge.target,
                &edge.label,
                &edge.properties,
            )?)
        })?;
        debug!(%id, source = %edge.source, target = %edge.target, "add subgraph edge");
        Ok(SubgraphEdge::persisted(
            id,
            edge.source,
            edge.target,
            edge.label.clone(),
            edge.properties.clone(),
        ))
    }

    pub fn get_subgraph_edge(
        &self,
        pattern: impl Into<EdgePattern>,
    ) -> StorageResult<Option<SubgraphEdge>> {
        let Some(id) = self.base.matcher().subgraph_edge(&pattern.into())? else {
            return Ok(None);
        };
        Ok(decode_subgraph_edge(self.base.store(), id)?)
    }

    /// Replace the properties of the matching subgraph-edge. Its label stays.
    pub fn update_subgraph_edge(
        &mut self,
        pattern: impl Into<EdgePattern>,
        properties: impl Into<PropertySet>,
    ) -> StorageResult<bool> {
        let properties = properties.into();
        properties.validate()?;
        self.base.check_names(&LabelSet::new(), &properties)?;

        let Some(id) = self.base.matcher().subgraph_edge(&pattern.into())? else {
            return Ok(false);
        };
        let Some(edge) = decode_subgraph_edge(self.base.store(), id)? else {
            return Ok(false);
        };
        self.base.atomically(|store| {
            Ok(replace_subgraph_edge_properties(
                store,
                id,
                &edge.label,
                &properties,
            )?)
        })?;
        debug!(%id, "update subgraph edge");
        Ok(true)
    }

    pub fn delete_subgraph_edge(&mut self, pattern: impl Into<EdgePattern>) -> StorageResult<bool> {
        let Some(id) = self.base.matcher().subgraph_edge(&pattern.into())? else {
            return Ok(false);
        };
        self.base
            .atomically(|store| Ok(store.delete_relationship(id)?))?;
        debug!(%id, "delete subgraph edge");
        Ok(true)
    }

    pub fn get_subgraph_edge_count(&self, pattern: impl Into<EdgePattern>) -> StorageResult<usize> {
        Ok(self.base.matcher().subgraph_edges(&pattern.into())?.len())
    }

    // ==================== Handle ====================

    pub fn close_connection(self) -> StorageResult<()> {
        self.base.close_connection()
    }

    pub fn into_inner(self) -> S {
        self.base.into_inner()
    }
}

impl<S: GraphStore> From<GraphStorage<S>> for SubgraphStorage<S> {
    fn from(base: GraphStorage<S>) -> Self {
        Self { base }
    }
}

impl<S: GraphStore> Deref for SubgraphStorage<S> {
    type Target = GraphStorage<S>;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

impl<S: GraphStore> DerefMut for SubgraphStorage<S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.base
    }
}
