//! Lowering: writing higher-order elements as auxiliary nodes.

use crate::decode::aux_kind;
use crate::vocab::{
    AuxKind, EDGE_ID_KEY, EDGE_MEMBERSHIP, KIND_KEY, LABEL_KEY, POSITION_KEY, SUBGRAPH_EDGE,
};
use crate::{CodecError, CodecResult};
use hograph_core::{Edge, EdgeId, Label, LabelSet, NodeId, PropertySet, Value};
use hograph_graph::{Direction, GraphStore};
use std::collections::BTreeSet;
use tracing::trace;

/// Lower a tuple, hyperedge or subgraph node set onto the store.
///
/// Every member is checked before anything is written, so a dangling
/// reference leaves the store untouched. Ordered kinds record each member's
/// index under `position`.
pub fn encode_group<S: GraphStore + ?Sized>(
    store: &mut S,
    kind: AuxKind,
    members: &[NodeId],
    labels: &LabelSet,
    properties: &PropertySet,
) -> CodecResult<NodeId> {
    for &member in members {
        if !store.contains_node(member)? {
            return Err(CodecError::DanglingNode(member));
        }
    }

    let aux = store.create_node(labels.clone(), with_kind(properties, kind))?;
    let rel_type = Label::new(kind.membership_type());
    for (position, &member) in members.iter().enumerate() {
        let mut rel_props = PropertySet::new();
        if kind.is_ordered() {
            rel_props.set(POSITION_KEY, position as i64);
        }
        store.create_relationship(member, aux, rel_type.clone(), rel_props)?;
        trace!(%aux, %member, position, rel_type = %rel_type, "membership");
    }
    Ok(aux)
}

/// Lower a subgraph: its node set plus its member edges.
///
/// Duplicate member nodes and edges are collapsed. Member edges must be
/// user edges known to the store.
pub fn encode_subgraph<S: GraphStore + ?Sized>(
    store: &mut S,
    nodes: &[NodeId],
    edges: &[EdgeId],
    labels: &LabelSet,
    properties: &PropertySet,
) -> CodecResult<NodeId> {
    let mut member_edges = Vec::with_capacity(edges.len());
    let mut seen_edges = BTreeSet::new();
    for &edge_id in edges {
        if !seen_edges.insert(edge_id) {
            continue;
        }
        let edge = crate::decode::plain_edge(&*store, edge_id)?
            .ok_or(CodecError::DanglingEdge(edge_id))?;
        member_edges.push(edge);
    }

    let mut seen_nodes = BTreeSet::new();
    let member_nodes: Vec<NodeId> = nodes
        .iter()
        .copied()
        .filter(|id| seen_nodes.insert(*id))
        .collect();

    let aux = encode_group(store, AuxKind::Subgraph, &member_nodes, labels, properties)?;
    let rel_type = Label::new(EDGE_MEMBERSHIP);
    for edge in &member_edges {
        let Some(edge_id) = edge.id() else {
            continue;
        };
        let mut rel_props = PropertySet::new();
        rel_props.set(EDGE_ID_KEY, edge_id.raw() as i64);
        store.create_relationship(edge.source, aux, rel_type.clone(), rel_props)?;
        trace!(%aux, edge = %edge_id, "edge membership");
    }
    Ok(aux)
}

/// Lower a subgraph-edge as one reserved relationship between two subgraphs.
pub fn encode_subgraph_edge<S: GraphStore + ?Sized>(
    store: &mut S,
    source: NodeId,
    target: NodeId,
    label: &Label,
    properties: &PropertySet,
) -> CodecResult<EdgeId> {
    for endpoint in [source, target] {
        let node = store
            .node(endpoint)?
            .ok_or(CodecError::DanglingNode(endpoint))?;
        if aux_kind(&node) != Some(AuxKind::Subgraph) {
            return Err(CodecError::NotASubgraph(endpoint));
        }
    }

    let id = store.create_relationship(
        source,
        target,
        Label::new(SUBGRAPH_EDGE),
        with_label(properties, label),
    )?;
    trace!(%id, %source, %target, label = %label, "subgraph edge");
    Ok(id)
}

/// Remove an auxiliary node with every reserved relationship attached to it.
/// Member nodes and member edges are left in place.
pub fn remove_element<S: GraphStore + ?Sized>(store: &mut S, aux: NodeId) -> CodecResult<()> {
    store.delete_node(aux)?;
    Ok(())
}

/// Replace an auxiliary node's user properties, keeping its kind marker.
pub fn replace_element_properties<S: GraphStore + ?Sized>(
    store: &mut S,
    aux: NodeId,
    kind: AuxKind,
    properties: &PropertySet,
) -> CodecResult<()> {
    store.set_node_properties(aux, with_kind(properties, kind))?;
    Ok(())
}

/// Replace a subgraph-edge's user properties, keeping its label.
pub fn replace_subgraph_edge_properties<S: GraphStore + ?Sized>(
    store: &mut S,
    id: EdgeId,
    label: &Label,
    properties: &PropertySet,
) -> CodecResult<()> {
    store.set_relationship_properties(id, with_label(properties, label))?;
    Ok(())
}

/// Remove the edge-membership records that point at a user edge.
pub fn detach_edge_memberships<S: GraphStore + ?Sized>(
    store: &mut S,
    edge: &Edge,
) -> CodecResult<usize> {
    let Some(edge_id) = edge.id() else {
        return Ok(0);
    };
    let marker = Value::from(edge_id.raw() as i64);
    let mut removed = 0;
    for rel_id in store.relationships(edge.source, Direction::Outgoing, Some(EDGE_MEMBERSHIP))? {
        let points_here = store
            .relationship(rel_id)?
            .is_some_and(|rel| rel.get(EDGE_ID_KEY) == Some(&marker));
        if points_here {
            store.delete_relationship(rel_id)?;
            removed += 1;
        }
    }
    Ok(removed)
}

fn with_kind(properties: &PropertySet, kind: AuxKind) -> PropertySet {
    let mut stored = properties.clone();
    stored.set(KIND_KEY, kind.as_str());
    stored
}

fn with_label(properties: &PropertySet, label: &Label) -> PropertySet {
    let mut stored = properties.clone();
    stored.set(LABEL_KEY, label.as_str());
    stored
}
