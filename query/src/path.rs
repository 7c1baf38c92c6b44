//! Paths: ordered, variable-bound sequences of patterns.

use hograph_codec::AuxKind;
use hograph_pattern::{EdgePattern, Pattern};

/// One element of a path.
#[derive(Debug, Clone, PartialEq)]
pub enum PathElement {
    /// A plain node.
    Node(Pattern),
    /// A directed user edge; an unlabeled pattern matches any label.
    Edge(EdgePattern),
    /// A node tuple, entered or left through membership.
    NodeTuple(Pattern),
    /// A hyperedge, entered or left through membership.
    HyperEdge(Pattern),
    /// A subgraph, entered or left through node membership or a subgraph-edge.
    Subgraph(Pattern),
    /// A directed subgraph-edge between two subgraphs.
    SubgraphEdge(EdgePattern),
}

impl PathElement {
    /// Element kind name used in messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            PathElement::Node(_) => "Node",
            PathElement::Edge(_) => "Edge",
            PathElement::NodeTuple(_) => "NodeTuple",
            PathElement::HyperEdge(_) => "HyperEdge",
            PathElement::Subgraph(_) => "Subgraph",
            PathElement::SubgraphEdge(_) => "SubgraphEdge",
        }
    }

    /// The auxiliary kind for grouping elements.
    pub fn aux_kind(&self) -> Option<AuxKind> {
        match self {
            PathElement::NodeTuple(_) => Some(AuxKind::NodeTuple),
            PathElement::HyperEdge(_) => Some(AuxKind::HyperEdge),
            PathElement::Subgraph(_) => Some(AuxKind::Subgraph),
            _ => None,
        }
    }
}

/// An ordered sequence of elements, each bound to a variable.
///
/// Adjacent elements constrain each other: an edge leaves the node before
/// it and enters the node after it, a node belongs to a neighboring tuple,
/// hyperedge or subgraph, and a subgraph-edge leaves and enters its
/// neighboring subgraphs. A variable used twice must bind the same element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    steps: Vec<(PathElement, String)>,
}

impl Path {
    /// Create an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element bound to `var`.
    pub fn add(mut self, element: PathElement, var: impl Into<String>) -> Self {
        self.steps.push((element, var.into()));
        self
    }

    /// Append a plain node.
    pub fn node(self, pattern: Pattern, var: impl Into<String>) -> Self {
        self.add(PathElement::Node(pattern), var)
    }

    /// Append a user edge.
    pub fn edge(self, pattern: EdgePattern, var: impl Into<String>) -> Self {
        self.add(PathElement::Edge(pattern), var)
    }

    /// Append a node tuple.
    pub fn node_tuple(self, pattern: Pattern, var: impl Into<String>) -> Self {
        self.add(PathElement::NodeTuple(pattern), var)
    }

    /// Append a hyperedge.
    pub fn hyperedge(self, pattern: Pattern, var: impl Into<String>) -> Self {
        self.add(PathElement::HyperEdge(pattern), var)
    }

    /// Append a subgraph.
    pub fn subgraph(self, pattern: Pattern, var: impl Into<String>) -> Self {
        self.add(PathElement::Subgraph(pattern), var)
    }

    /// Append a subgraph-edge.
    pub fn subgraph_edge(self, pattern: EdgePattern, var: impl Into<String>) -> Self {
        self.add(PathElement::SubgraphEdge(pattern), var)
    }

    /// The elements with their variables, in order.
    pub fn steps(&self) -> &[(PathElement, String)] {
        &self.steps
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the path has no elements.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
