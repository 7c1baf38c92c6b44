//! Entity structures.
//!
//! `Node` and `Edge` are the binary vocabulary the store understands.
//! `NodeTuple`, `HyperEdge`, `Subgraph` and `SubgraphEdge` are the
//! higher-order elements lowered onto it. Members are referenced by store
//! identity; a lifted element carries its members as read from the store.

use serde::Serialize;

use crate::{EdgeId, Label, LabelSet, ModelError, ModelResult, NodeId, PropertySet, Value};

/// Property accessors shared by every entity type.
macro_rules! impl_property_access {
    ($ty:ty) => {
        impl $ty {
            /// Get a property value by key.
            pub fn get(&self, key: &str) -> Option<&Value> {
                self.properties.get(key)
            }
        }
    };
}

/// A labeled, propertied node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    id: Option<NodeId>,
    /// Labels of this node.
    pub labels: LabelSet,
    /// Properties of this node.
    pub properties: PropertySet,
}

impl Node {
    /// Create a node that has not been stored yet.
    pub fn new<L: Into<Label>>(
        labels: impl IntoIterator<Item = L>,
        properties: impl Into<PropertySet>,
    ) -> Self {
        Self {
            id: None,
            labels: labels.into_iter().collect(),
            properties: properties.into(),
        }
    }

    /// Create a node as read back from the store.
    pub fn persisted(id: NodeId, labels: LabelSet, properties: PropertySet) -> Self {
        Self {
            id: Some(id),
            labels,
            properties,
        }
    }

    /// Store identity, if the node has been stored.
    pub fn id(&self) -> Option<NodeId> {
        self.id
    }

    /// Store identity, or an error naming the unstored node.
    pub fn require_id(&self) -> ModelResult<NodeId> {
        self.id.ok_or(ModelError::unpersisted("Node"))
    }
}

impl_property_access!(Node);

/// A directed, labeled binary relationship between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    id: Option<EdgeId>,
    /// Source node identity.
    pub source: NodeId,
    /// Target node identity.
    pub target: NodeId,
    /// The single label of this edge.
    pub label: Label,
    /// Properties of this edge.
    pub properties: PropertySet,
}

impl Edge {
    /// Create an edge between two node identities.
    pub fn new(
        source: NodeId,
        target: NodeId,
        label: impl Into<Label>,
        properties: impl Into<PropertySet>,
    ) -> Self {
        Self {
            id: None,
            source,
            target,
            label: label.into(),
            properties: properties.into(),
        }
    }

    /// Create an edge between two stored nodes.
    pub fn between(
        source: &Node,
        target: &Node,
        label: impl Into<Label>,
        properties: impl Into<PropertySet>,
    ) -> ModelResult<Self> {
        Ok(Self::new(
            source.require_id()?,
            target.require_id()?,
            label,
            properties,
        ))
    }

    /// Create an edge as read back from the store.
    pub fn persisted(
        id: EdgeId,
        source: NodeId,
        target: NodeId,
        label: Label,
        properties: PropertySet,
    ) -> Self {
        Self {
            id: Some(id),
            source,
            target,
            label,
            properties,
        }
    }

    /// Store identity, if the edge has been stored.
    pub fn id(&self) -> Option<EdgeId> {
        self.id
    }

    /// Store identity, or an error naming the unstored edge.
    pub fn require_id(&self) -> ModelResult<EdgeId> {
        self.id.ok_or(ModelError::unpersisted("Edge"))
    }
}

impl_property_access!(Edge);

/// An ordered grouping of nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeTuple {
    id: Option<NodeId>,
    /// Members in tuple order.
    pub members: Vec<Node>,
    /// Labels of the tuple itself.
    pub labels: LabelSet,
    /// Properties of the tuple itself.
    pub properties: PropertySet,
}

impl NodeTuple {
    /// Create a tuple over stored member nodes.
    pub fn new<L: Into<Label>>(
        members: Vec<Node>,
        labels: impl IntoIterator<Item = L>,
        properties: impl Into<PropertySet>,
    ) -> Self {
        Self {
            id: None,
            members,
            labels: labels.into_iter().collect(),
            properties: properties.into(),
        }
    }

    /// Create a tuple as lifted from the store.
    pub fn persisted(
        id: NodeId,
        members: Vec<Node>,
        labels: LabelSet,
        properties: PropertySet,
    ) -> Self {
        Self {
            id: Some(id),
            members,
            labels,
            properties,
        }
    }

    /// Identity of the auxiliary node, if stored.
    pub fn id(&self) -> Option<NodeId> {
        self.id
    }

    /// Member identities in order; fails on a member that was never stored.
    pub fn member_ids(&self) -> ModelResult<Vec<NodeId>> {
        self.members.iter().map(Node::require_id).collect()
    }
}

impl_property_access!(NodeTuple);

/// An n-ary relation over nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HyperEdge {
    id: Option<NodeId>,
    /// Participating nodes in order.
    pub members: Vec<Node>,
    /// Labels of the relation.
    pub labels: LabelSet,
    /// Properties of the relation.
    pub properties: PropertySet,
}

impl HyperEdge {
    /// Create a single-label hyperedge over stored member nodes.
    pub fn new(
        label: impl Into<Label>,
        members: Vec<Node>,
        properties: impl Into<PropertySet>,
    ) -> Self {
        Self::with_labels(members, [label.into()], properties)
    }

    /// Create a hyperedge carrying several labels.
    pub fn with_labels<L: Into<Label>>(
        members: Vec<Node>,
        labels: impl IntoIterator<Item = L>,
        properties: impl Into<PropertySet>,
    ) -> Self {
        Self {
            id: None,
            members,
            labels: labels.into_iter().collect(),
            properties: properties.into(),
        }
    }

    /// Create a hyperedge as lifted from the store.
    pub fn persisted(
        id: NodeId,
        members: Vec<Node>,
        labels: LabelSet,
        properties: PropertySet,
    ) -> Self {
        Self {
            id: Some(id),
            members,
            labels,
            properties,
        }
    }

    /// Identity of the auxiliary node, if stored.
    pub fn id(&self) -> Option<NodeId> {
        self.id
    }

    /// Member identities in order; fails on a member that was never stored.
    pub fn member_ids(&self) -> ModelResult<Vec<NodeId>> {
        self.members.iter().map(Node::require_id).collect()
    }

    /// Number of participating nodes.
    pub fn arity(&self) -> usize {
        self.members.len()
    }
}

impl_property_access!(HyperEdge);

/// A collection of member nodes and edges with its own identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subgraph {
    id: Option<NodeId>,
    /// Member nodes (a set; order carries no meaning).
    pub nodes: Vec<Node>,
    /// Member edges.
    pub edges: Vec<Edge>,
    /// Labels of the subgraph.
    pub labels: LabelSet,
    /// Properties of the subgraph.
    pub properties: PropertySet,
}

impl Subgraph {
    /// Create a subgraph over stored nodes and edges.
    pub fn new<L: Into<Label>>(
        nodes: Vec<Node>,
        edges: Vec<Edge>,
        labels: impl IntoIterator<Item = L>,
        properties: impl Into<PropertySet>,
    ) -> Self {
        Self {
            id: None,
            nodes,
            edges,
            labels: labels.into_iter().collect(),
            properties: properties.into(),
        }
    }

    /// Create a subgraph as lifted from the store.
    pub fn persisted(
        id: NodeId,
        nodes: Vec<Node>,
        edges: Vec<Edge>,
        labels: LabelSet,
        properties: PropertySet,
    ) -> Self {
        Self {
            id: Some(id),
            nodes,
            edges,
            labels,
            properties,
        }
    }

    /// Identity of the auxiliary node, if stored.
    pub fn id(&self) -> Option<NodeId> {
        self.id
    }

    /// Identity of the auxiliary node, or an error naming the unstored subgraph.
    pub fn require_id(&self) -> ModelResult<NodeId> {
        self.id.ok_or(ModelError::unpersisted("Subgraph"))
    }

    /// Member node identities; fails on a node that was never stored.
    pub fn node_ids(&self) -> ModelResult<Vec<NodeId>> {
        self.nodes.iter().map(Node::require_id).collect()
    }

    /// Member edge identities; fails on an edge that was never stored.
    pub fn edge_ids(&self) -> ModelResult<Vec<EdgeId>> {
        self.edges.iter().map(Edge::require_id).collect()
    }
}

impl_property_access!(Subgraph);

/// A directed, labeled relation between two subgraphs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubgraphEdge {
    id: Option<EdgeId>,
    /// Auxiliary node of the source subgraph.
    pub source: NodeId,
    /// Auxiliary node of the target subgraph.
    pub target: NodeId,
    /// The single label of this relation.
    pub label: Label,
    /// Properties of this relation.
    pub properties: PropertySet,
}

impl SubgraphEdge {
    /// Create a relation between two subgraph identities.
    pub fn new(
        source: NodeId,
        target: NodeId,
        label: impl Into<Label>,
        properties: impl Into<PropertySet>,
    ) -> Self {
        Self {
            id: None,
            source,
            target,
            label: label.into(),
            properties: properties.into(),
        }
    }

    /// Create a relation between two stored subgraphs.
    pub fn between(
        source: &Subgraph,
        target: &Subgraph,
        label: impl Into<Label>,
        properties: impl Into<PropertySet>,
    ) -> ModelResult<Self> {
        Ok(Self::new(
            source.require_id()?,
            target.require_id()?,
            label,
            properties,
        ))
    }

    /// Create a relation as lifted from the store.
    pub fn persisted(
        id: EdgeId,
        source: NodeId,
        target: NodeId,
        label: Label,
        properties: PropertySet,
    ) -> Self {
        Self {
            id: Some(id),
            source,
            target,
            label,
            properties,
        }
    }

    /// Store identity, if stored.
    pub fn id(&self) -> Option<EdgeId> {
        self.id
    }
}

impl_property_access!(SubgraphEdge);
