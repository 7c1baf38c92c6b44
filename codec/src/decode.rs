//! Lifting: reading higher-order elements back from current store state.

use crate::vocab::{
    is_reserved_label, AuxKind, EDGE_ID_KEY, EDGE_MEMBERSHIP, KIND_KEY, LABEL_KEY, POSITION_KEY,
    SUBGRAPH_EDGE,
};
use crate::{CodecError, CodecResult};
use hograph_core::{
    Edge, EdgeId, HyperEdge, Label, LabelSet, Node, NodeId, NodeTuple, PropertySet, Subgraph,
    SubgraphEdge,
};
use hograph_graph::{Direction, GraphStore};

/// The common lifted shape of a tuple, hyperedge or subgraph node set.
#[derive(Debug, Clone, PartialEq)]
pub struct LiftedGroup {
    pub id: NodeId,
    pub members: Vec<Node>,
    pub labels: LabelSet,
    pub properties: PropertySet,
}

/// The element kind of an auxiliary node, or `None` for a plain node.
pub fn aux_kind(node: &Node) -> Option<AuxKind> {
    node.get(KIND_KEY).and_then(AuxKind::from_value)
}

/// Read a plain node. Auxiliary nodes read as absent.
pub fn plain_node<S: GraphStore + ?Sized>(store: &S, id: NodeId) -> CodecResult<Option<Node>> {
    Ok(store
        .node(id)?
        .filter(|node| !node.properties.contains_key(KIND_KEY)))
}

/// Read a user edge. Reserved relationships read as absent.
pub fn plain_edge<S: GraphStore + ?Sized>(store: &S, id: EdgeId) -> CodecResult<Option<Edge>> {
    Ok(store
        .relationship(id)?
        .filter(|edge| !is_reserved_label(edge.label.as_str())))
}

/// Member identities of an auxiliary node, ordered by position for ordered
/// kinds and by membership creation otherwise.
pub fn member_ids<S: GraphStore + ?Sized>(
    store: &S,
    aux: NodeId,
    kind: AuxKind,
) -> CodecResult<Vec<NodeId>> {
    let rel_ids = store.relationships(aux, Direction::Incoming, Some(kind.membership_type()))?;
    let mut members = Vec::with_capacity(rel_ids.len());
    for rel_id in rel_ids {
        let rel = store.relationship(rel_id)?.ok_or_else(|| {
            CodecError::corrupt(format!("membership {} vanished during lifting", rel_id))
        })?;
        let position = if kind.is_ordered() {
            rel.get(POSITION_KEY)
                .and_then(|value| value.as_int())
                .ok_or_else(|| {
                    CodecError::corrupt(format!("membership {} has no position", rel_id))
                })?
        } else {
            0
        };
        members.push((position, rel.source));
    }
    // Stable: unordered kinds keep membership creation order
    members.sort_by_key(|(position, _)| *position);
    Ok(members.into_iter().map(|(_, id)| id).collect())
}

/// Member node identities of a subgraph.
pub fn subgraph_node_ids<S: GraphStore + ?Sized>(
    store: &S,
    aux: NodeId,
) -> CodecResult<Vec<NodeId>> {
    member_ids(store, aux, AuxKind::Subgraph)
}

/// Member edge identities of a subgraph. Edges deleted since encoding are
/// skipped.
pub fn subgraph_edge_ids<S: GraphStore + ?Sized>(
    store: &S,
    aux: NodeId,
) -> CodecResult<Vec<EdgeId>> {
    let mut edges = Vec::new();
    for rel_id in store.relationships(aux, Direction::Incoming, Some(EDGE_MEMBERSHIP))? {
        let Some(rel) = store.relationship(rel_id)? else {
            continue;
        };
        let raw = rel
            .get(EDGE_ID_KEY)
            .and_then(|value| value.as_int())
            .and_then(|raw| u64::try_from(raw).ok())
            .ok_or_else(|| {
                CodecError::corrupt(format!("edge membership {} has no edge_id", rel_id))
            })?;
        let edge_id = EdgeId::new(raw);
        if store.contains_relationship(edge_id)? && !edges.contains(&edge_id) {
            edges.push(edge_id);
        }
    }
    Ok(edges)
}

/// Lift the auxiliary node `id` if it is an element of `kind`.
pub fn decode_group<S: GraphStore + ?Sized>(
    store: &S,
    id: NodeId,
    kind: AuxKind,
) -> CodecResult<Option<LiftedGroup>> {
    let Some(aux) = store.node(id)? else {
        return Ok(None);
    };
    if aux_kind(&aux) != Some(kind) {
        return Ok(None);
    }

    let mut members = Vec::new();
    for member_id in member_ids(store, id, kind)? {
        let member = store.node(member_id)?.ok_or_else(|| {
            CodecError::corrupt(format!("member {} of {} is missing", member_id, id))
        })?;
        members.push(member);
    }

    let mut properties = aux.properties;
    properties.remove(KIND_KEY);
    Ok(Some(LiftedGroup {
        id,
        members,
        labels: aux.labels,
        properties,
    }))
}

/// Lift a node tuple.
pub fn decode_node_tuple<S: GraphStore + ?Sized>(
    store: &S,
    id: NodeId,
) -> CodecResult<Option<NodeTuple>> {
    Ok(decode_group(store, id, AuxKind::NodeTuple)?
        .map(|g| NodeTuple::persisted(g.id, g.members, g.labels, g.properties)))
}

/// Lift a hyperedge.
pub fn decode_hyperedge<S: GraphStore + ?Sized>(
    store: &S,
    id: NodeId,
) -> CodecResult<Option<HyperEdge>> {
    Ok(decode_group(store, id, AuxKind::HyperEdge)?
        .map(|g| HyperEdge::persisted(g.id, g.members, g.labels, g.properties)))
}

/// Lift a subgraph with its member nodes and surviving member edges.
pub fn decode_subgraph<S: GraphStore + ?Sized>(
    store: &S,
    id: NodeId,
) -> CodecResult<Option<Subgraph>> {
    let Some(group) = decode_group(store, id, AuxKind::Subgraph)? else {
        return Ok(None);
    };
    let mut edges = Vec::new();
    for edge_id in subgraph_edge_ids(store, id)? {
        if let Some(edge) = plain_edge(store, edge_id)? {
            edges.push(edge);
        }
    }
    Ok(Some(Subgraph::persisted(
        group.id,
        group.members,
        edges,
        group.labels,
        group.properties,
    )))
}

/// Lift a subgraph-edge.
pub fn decode_subgraph_edge<S: GraphStore + ?Sized>(
    store: &S,
    id: EdgeId,
) -> CodecResult<Option<SubgraphEdge>> {
    let Some(rel) = store.relationship(id)? else {
        return Ok(None);
    };
    if rel.label.as_str() != SUBGRAPH_EDGE {
        return Ok(None);
    }

    let label = rel
        .get(LABEL_KEY)
        .and_then(|value| value.as_str())
        .map(Label::new)
        .ok_or_else(|| CodecError::corrupt(format!("subgraph edge {} has no label", id)))?;
    let mut properties = rel.properties;
    properties.remove(LABEL_KEY);
    Ok(Some(SubgraphEdge::persisted(
        id,
        rel.source,
        rel.target,
        label,
        properties,
    )))
}
