//! Base storage: the binary layer, clearing and path traversal.

use crate::{StorageConfig, StorageError, StorageResult};
use hograph_codec::vocab::{check_user_label, check_user_names};
use hograph_codec::{
    decode_group, detach_edge_memberships, encode_group, plain_edge, plain_node, remove_element,
    replace_element_properties, AuxKind, CodecError, LiftedGroup,
};
use hograph_core::{Edge, LabelSet, Node, NodeId, PropertySet};
use hograph_graph::{Direction, GraphStore};
use hograph_pattern::{EdgePattern, IntoPattern, Matcher, Pattern};
use hograph_query::{Path, PathExecutor, PathTable};
use tracing::{debug, warn};

/// CRUD over plain nodes and edges of a store, plus the operations every
/// higher-order facade shares.
///
/// The store handle is owned by value. Pass `&mut store` to lend a store
/// to several facades in sequence.
pub struct GraphStorage<S: GraphStore> {
    /// The underlying store.
    store: S,
    /// Match and naming policy.
    config: StorageConfig,
}

impl<S: GraphStore> GraphStorage<S> {
    /// Create a storage with the default configuration.
    pub fn new(store: S) -> Self {
        Self::with_config(store, StorageConfig::default())
    }

    /// Create a storage with an explicit configuration.
    pub fn with_config(store: S, config: StorageConfig) -> Self {
        Self { store, config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Get a reference to the store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give the store handle back without closing it.
    pub fn into_inner(self) -> S {
        self.store
    }

    // ==================== Nodes ====================

    /// Store a node and return it with its identity.
    pub fn add_node(&mut self, node: &Node) -> StorageResult<Node> {
        node.properties.validate()?;
        self.check_names(&node.labels, &node.properties)?;

        let labels = node.labels.clone();
        let properties = node.properties.clone();
        let id = self.atomically(|store| {
            Ok(store.create_node(labels.clone(), properties.clone())?)
        })?;
        debug!(%id, "add node");
        Ok(Node::persisted(id, labels, properties))
    }

    /// The first plain node matching the pattern.
    pub fn get_node(&self, pattern: impl IntoPattern) -> StorageResult<Option<Node>> {
        let Some(id) = self.matcher().node(&pattern.into_pattern()?)? else {
            return Ok(None);
        };
        Ok(plain_node(&self.store, id)?)
    }

    /// Replace the properties of the matching node. Returns whether a node matched.
    pub fn update_node(
        &mut self,
        pattern: impl IntoPattern,
        properties: impl Into<PropertySet>,
    ) -> StorageResult<bool> {
        let properties = properties.into();
        properties.validate()?;
        self.check_names(&LabelSet::new(), &properties)?;

        let Some(id) = self.matcher().node(&pattern.into_pattern()?)? else {
            return Ok(false);
        };
        self.atomically(|store| Ok(store.set_node_properties(id, properties)?))?;
        debug!(%id, "update node");
        Ok(true)
    }

    /// Delete the matching node with its relationships. Groups it belonged
    /// to keep their auxiliary nodes. Returns whether a node matched.
    pub fn delete_node(&mut self, pattern: impl IntoPattern) -> StorageResult<bool> {
        let Some(id) = self.matcher().node(&pattern.into_pattern()?)? else {
            return Ok(false);
        };
        self.atomically(|store| {
            for rel_id in store.relationships(id, Direction::Both, None)? {
                if let Some(edge) = plain_edge(&*store, rel_id)? {
                    detach_edge_memberships(store, &edge)?;
                }
            }
            Ok(store.delete_node(id)?)
        })?;
        debug!(%id, "delete node");
        Ok(true)
    }

    /// Number of plain nodes matching the pattern.
    pub fn get_node_count(&self, pattern: impl IntoPattern) -> StorageResult<usize> {
        Ok(self.matcher().nodes(&pattern.into_pattern()?)?.len())
    }

    // ==================== Edges ====================

    /// Store an edge between two existing plain nodes.
    pub fn add_edge(&mut self, edge: &Edge) -> StorageResult<Edge> {
        edge.properties.validate()?;
        if self.config.check_reserved_names {
            check_user_label(&edge.label)?;
            check_user_names(&LabelSet::new(), &edge.properties)?;
        }
        for endpoint in [edge.source, edge.target] {
            if plain_node(&self.store, endpoint)?.is_none() {
                return Err(CodecError::DanglingNode(endpoint).into());
            }
        }

        let id = self.atomically(|store| {
            Ok(store.create_relationship(
                edge.source,
                edge.target,
                edge.label.clone(),
                edge.properties.clone(),
            )?)
        })?;
        debug!(%id, source = %edge.source, target = %edge.target, "add edge");
        Ok(Edge::persisted(
            id,
            edge.source,
            edge.target,
            edge.label.clone(),
            edge.properties.clone(),
        ))
    }

    /// The first user edge matching the pattern.
    pub fn get_edge(&self, pattern: impl Into<EdgePattern>) -> StorageResult<Option<Edge>> {
        let Some(id) = self.matcher().edge(&pattern.into())? else {
            return Ok(None);
        };
        Ok(plain_edge(&self.store, id)?)
    }

    /// Replace the properties of the matching edge. Returns whether an edge matched.
    pub fn update_edge(
        &mut self,
        pattern: impl Into<EdgePattern>,
        properties: impl Into<PropertySet>,
    ) -> StorageResult<bool> {
        let properties = properties.into();
        properties.validate()?;
        self.check_names(&LabelSet::new(), &properties)?;

        let Some(id) = self.matcher().edge(&pattern.into())? else {
            return Ok(false);
        };
        self.atomically(|store| Ok(store.set_relationship_properties(id, properties)?))?;
        debug!(%id, "update edge");
        Ok(true)
    }

    /// Delete the matching edge and drop it from every subgraph that holds it.
    pub fn delete_edge(&mut self, pattern: impl Into<EdgePattern>) -> StorageResult<bool> {
        let Some(id) = self.matcher().edge(&pattern.into())? else {
            return Ok(false);
        };
        let Some(edge) = plain_edge(&self.store, id)? else {
            return Ok(false);
        };
        let detached = self.atomically(|store| {
            let detached = detach_edge_memberships(store, &edge)?;
            store.delete_relationship(id)?;
            Ok(detached)
        })?;
        debug!(%id, subgraphs = detached, "delete edge");
        Ok(true)
    }

    /// Number of user edges matching the pattern.
    pub fn get_edge_count(&self, pattern: impl Into<EdgePattern>) -> StorageResult<usize> {
        Ok(self.matcher().edges(&pattern.into())?.len())
    }

    // ==================== Whole graph ====================

    /// Remove every node, edge and auxiliary node.
    pub fn clear_graph(&mut self) -> StorageResult<()> {
        let nodes = self.store.node_count()?;
        self.atomically(|store| Ok(store.clear()?))?;
        debug!(nodes, "clear graph");
        Ok(())
    }

    /// Traverse alternative paths and return the projected table.
    ///
    /// `return_values` and `sort` are `"<variable>.<property>"` strings.
    /// Sorting is ascending and stable.
    pub fn traverse_path<R, K>(
        &self,
        paths: &[Path],
        return_values: &[R],
        sort: &[K],
    ) -> StorageResult<PathTable>
    where
        R: AsRef<str>,
        K: AsRef<str>,
    {
        Ok(PathExecutor::new(&self.store).traverse(paths, return_values, sort)?)
    }

    /// Close the store handle. The storage is consumed whether or not the
    /// store reports an error.
    pub fn close_connection(mut self) -> StorageResult<()> {
        if self.store.is_closed() {
            return Ok(());
        }
        self.store.close()?;
        debug!("close connection");
        Ok(())
    }

    // ==================== Shared by the facades ====================

    pub(crate) fn matcher(&self) -> Matcher<'_, S> {
        Matcher::new(&self.store).with_policy(self.config.match_policy)
    }

    pub(crate) fn check_names(
        &self,
        labels: &LabelSet,
        properties: &PropertySet,
    ) -> StorageResult<()> {
        if self.config.check_reserved_names {
            check_user_names(labels, properties)?;
        }
        Ok(())
    }

    /// Run `op` inside one store transaction. Any error rolls the
    /// transaction back before it is returned.
    pub(crate) fn atomically<T>(
        &mut self,
        op: impl FnOnce(&mut S) -> StorageResult<T>,
    ) -> StorageResult<T> {
        self.store.begin()?;
        let result = op(&mut self.store).and_then(|value| {
            self.store.commit()?;
            Ok(value)
        });
        if let Err(err) = &result {
            warn!(error = %err, "write failed, rolling back");
            if let Err(rollback) = self.store.rollback() {
                warn!(error = %rollback, "rollback failed");
            }
        }
        result
    }

    /// Lower a tuple, hyperedge or subgraph node set after checking its members.
    pub(crate) fn add_group(
        &mut self,
        kind: AuxKind,
        members: &[Node],
        labels: &LabelSet,
        properties: &PropertySet,
    ) -> StorageResult<NodeId> {
        properties.validate()?;
        self.check_names(labels, properties)?;
        let member_ids = members
            .iter()
            .map(Node::require_id)
            .collect::<Result<Vec<_>, _>>()?;

        let id = self.atomically(|store| {
            Ok(encode_group(store, kind, &member_ids, labels, properties)?)
        })?;
        debug!(%kind, %id, members = member_ids.len(), "add element");
        Ok(id)
    }

    /// Lift a freshly written element, which must exist.
    pub(crate) fn lift_group(&self, kind: AuxKind, id: NodeId) -> StorageResult<LiftedGroup> {
        decode_group(&self.store, id, kind)?.ok_or_else(|| {
            StorageError::from(CodecError::corrupt(format!("{} {} vanished", kind, id)))
        })
    }

    pub(crate) fn find_group(
        &self,
        kind: AuxKind,
        pattern: &Pattern,
    ) -> StorageResult<Option<NodeId>> {
        Ok(self.matcher().element(kind, pattern)?)
    }

    pub(crate) fn update_group(
        &mut self,
        kind: AuxKind,
        pattern: &Pattern,
        properties: PropertySet,
    ) -> StorageResult<bool> {
        properties.validate()?;
        self.check_names(&LabelSet::new(), &properties)?;

        let Some(id) = self.find_group(kind, pattern)? else {
            return Ok(false);
        };
        self.atomically(|store| Ok(replace_element_properties(store, id, kind, &properties)?))?;
        debug!(%kind, %id, "update element");
        Ok(true)
    }

    pub(crate) fn delete_group(&mut self, kind: AuxKind, pattern: &Pattern) -> StorageResult<bool> {
        let Some(id) = self.find_group(kind, pattern)? else {
            return Ok(false);
        };
        self.atomically(|store| Ok(remove_element(store, id)?))?;
        debug!(%kind, %id, "delete element");
        Ok(true)
    }

    pub(crate) fn count_group(&self, kind: AuxKind, pattern: &Pattern) -> StorageResult<usize> {
        Ok(self.matcher().elements(kind, pattern)?.len())
    }
}
