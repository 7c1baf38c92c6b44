//! Pattern types.
//!
//! A pattern is a sparse element: the labels it must carry, the properties
//! it must agree with and the members it must contain. Anything the pattern
//! leaves out is unconstrained. Matching is a pure function of the stored
//! shape, so patterns can be exercised without a store.

use crate::{PatternError, PatternResult};
use hograph_core::{
    Edge, EdgeId, HyperEdge, Label, LabelSet, ModelResult, Node, NodeId, NodeTuple, Property,
    PropertySet, Subgraph, SubgraphEdge, Value,
};

/// Property constraints, kept in the order they were given.
///
/// Duplicate keys are allowed as long as they agree; the check runs when the
/// pattern is used.
#[derive(Debug, Clone, Default, PartialEq)]
struct Constraints {
    entries: Vec<Property>,
}

impl Constraints {
    fn push(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.push(Property::new(key, value));
    }

    fn extend(&mut self, properties: impl Into<PropertySet>) {
        let properties: PropertySet = properties.into();
        self.entries.extend(properties);
    }

    fn validate(&self) -> PatternResult<()> {
        for (i, first) in self.entries.iter().enumerate() {
            for second in &self.entries[i + 1..] {
                if first.key() != second.key() {
                    continue;
                }
                if first.property_type() != second.property_type() {
                    return Err(PatternError::malformed(format!(
                        "property '{}' is declared both {} and {}",
                        first.key(),
                        first.property_type(),
                        second.property_type()
                    )));
                }
                if first.value() != second.value() {
                    return Err(PatternError::malformed(format!(
                        "property '{}' requires both {} and {}",
                        first.key(),
                        first.value(),
                        second.value()
                    )));
                }
            }
        }
        Ok(())
    }

    fn satisfied_by(&self, properties: &PropertySet) -> bool {
        self.entries.iter().all(|wanted| {
            properties
                .get(wanted.key())
                .is_some_and(|actual| actual == wanted.value())
        })
    }

    fn iter(&self) -> impl Iterator<Item = &Property> {
        self.entries.iter()
    }
}

/// A pattern over nodes, node tuples, hyperedges and subgraphs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pattern {
    labels: LabelSet,
    constraints: Constraints,
    members: Vec<NodeId>,
    edge_members: Vec<EdgeId>,
}

impl Pattern {
    /// The empty pattern; matches every element of the requested kind.
    pub fn new() -> Self {
        Self::default()
    }

    /// A pattern requiring the given labels.
    pub fn labeled<L: Into<Label>>(labels: impl IntoIterator<Item = L>) -> Self {
        Self {
            labels: labels.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Also require a label.
    pub fn with_label(mut self, label: impl Into<Label>) -> Self {
        self.labels.insert(label);
        self
    }

    /// Also require a property value.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.constraints.push(key, value);
        self
    }

    /// Also require every property of a set.
    pub fn with_properties(mut self, properties: impl Into<PropertySet>) -> Self {
        self.constraints.extend(properties);
        self
    }

    /// Also require a member.
    pub fn with_member(mut self, member: NodeId) -> Self {
        self.members.push(member);
        self
    }

    /// Also require several members.
    pub fn with_members(mut self, members: impl IntoIterator<Item = NodeId>) -> Self {
        self.members.extend(members);
        self
    }

    /// Also require a member edge. Only subgraphs hold edges.
    pub fn with_edge_member(mut self, edge: EdgeId) -> Self {
        self.edge_members.push(edge);
        self
    }

    /// Also require several member edges.
    pub fn with_edge_members(mut self, edges: impl IntoIterator<Item = EdgeId>) -> Self {
        self.edge_members.extend(edges);
        self
    }

    /// Required labels.
    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// Required property values, in the order given.
    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.constraints.iter()
    }

    /// Required members.
    pub fn members(&self) -> &[NodeId] {
        &self.members
    }

    /// Required member edges.
    pub fn edge_members(&self) -> &[EdgeId] {
        &self.edge_members
    }

    /// Reject a pattern that gives one key two types or two values.
    pub fn validate(&self) -> PatternResult<()> {
        self.constraints.validate()
    }

    /// Whether a stored shape satisfies the pattern. Assumes `validate` passed.
    ///
    /// `edges` are the stored member edges; only subgraphs pass any.
    pub fn accepts(
        &self,
        labels: &LabelSet,
        properties: &PropertySet,
        members: &[NodeId],
        edges: &[EdgeId],
    ) -> bool {
        self.labels.is_subset(labels)
            && self.constraints.satisfied_by(properties)
            && self.members.iter().all(|wanted| members.contains(wanted))
            && self.edge_members.iter().all(|wanted| edges.contains(wanted))
    }

    /// Validate, then test a stored shape.
    pub fn matches(
        &self,
        labels: &LabelSet,
        properties: &PropertySet,
        members: &[NodeId],
        edges: &[EdgeId],
    ) -> PatternResult<bool> {
        self.validate()?;
        Ok(self.accepts(labels, properties, members, edges))
    }

    fn with_labels_of(mut self, labels: &LabelSet) -> Self {
        for label in labels.iter() {
            self.labels.insert(label);
        }
        self
    }
}

/// Conversion into a [`Pattern`].
///
/// Elements convert to the pattern of their labels, properties and members.
/// A member without store identity cannot be matched, so converting an
/// element that holds one fails with `ModelError::Unpersisted`.
pub trait IntoPattern {
    fn into_pattern(self) -> ModelResult<Pattern>;
}

impl IntoPattern for Pattern {
    fn into_pattern(self) -> ModelResult<Pattern> {
        Ok(self)
    }
}

impl IntoPattern for &Node {
    fn into_pattern(self) -> ModelResult<Pattern> {
        Ok(Pattern::new()
            .with_labels_of(&self.labels)
            .with_properties(self.properties.clone()))
    }
}

impl IntoPattern for &NodeTuple {
    fn into_pattern(self) -> ModelResult<Pattern> {
        Ok(Pattern::new()
            .with_labels_of(&self.labels)
            .with_properties(self.properties.clone())
            .with_members(self.member_ids()?))
    }
}

impl IntoPattern for &HyperEdge {
    fn into_pattern(self) -> ModelResult<Pattern> {
        Ok(Pattern::new()
            .with_labels_of(&self.labels)
            .with_properties(self.properties.clone())
            .with_members(self.member_ids()?))
    }
}

impl IntoPattern for &Subgraph {
    fn into_pattern(self) -> ModelResult<Pattern> {
        Ok(Pattern::new()
            .with_labels_of(&self.labels)
            .with_properties(self.properties.clone())
            .with_members(self.node_ids()?)
            .with_edge_members(self.edge_ids()?))
    }
}

/// A pattern over binary edges and subgraph-edges.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgePattern {
    label: Option<Label>,
    constraints: Constraints,
    source: Option<NodeId>,
    target: Option<NodeId>,
}

impl EdgePattern {
    /// Matches any edge.
    pub fn any() -> Self {
        Self::default()
    }

    /// Matches edges with the given label.
    pub fn labeled(label: impl Into<Label>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    /// Also require a property value.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.constraints.push(key, value);
        self
    }

    /// Also require every property of a set.
    pub fn with_properties(mut self, properties: impl Into<PropertySet>) -> Self {
        self.constraints.extend(properties);
        self
    }

    /// Require the edge to leave this node.
    pub fn from_node(mut self, source: NodeId) -> Self {
        self.source = Some(source);
        self
    }

    /// Require the edge to enter this node.
    pub fn to_node(mut self, target: NodeId) -> Self {
        self.target = Some(target);
        self
    }

    /// Required label, if any.
    pub fn label(&self) -> Option<&Label> {
        self.label.as_ref()
    }

    /// Required source, if any.
    pub fn source(&self) -> Option<NodeId> {
        self.source
    }

    /// Required target, if any.
    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    /// Required property values, in the order given.
    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.constraints.iter()
    }

    /// Reject a pattern that gives one key two types or two values.
    pub fn validate(&self) -> PatternResult<()> {
        self.constraints.validate()
    }

    /// Whether a stored shape satisfies the pattern. Assumes `validate` passed.
    pub fn accepts(
        &self,
        label: &Label,
        properties: &PropertySet,
        source: NodeId,
        target: NodeId,
    ) -> bool {
        self.label.as_ref().map_or(true, |wanted| wanted == label)
            && self.source.map_or(true, |wanted| wanted == source)
            && self.target.map_or(true, |wanted| wanted == target)
            && self.constraints.satisfied_by(properties)
    }

    /// Validate, then test a stored edge.
    pub fn matches(&self, edge: &Edge) -> PatternResult<bool> {
        self.validate()?;
        Ok(self.accepts(&edge.label, &edge.properties, edge.source, edge.target))
    }
}

impl From<&Edge> for EdgePattern {
    fn from(edge: &Edge) -> Self {
        EdgePattern::labeled(edge.label.clone())
            .with_properties(edge.properties.clone())
            .from_node(edge.source)
            .to_node(edge.target)
    }
}

impl From<&SubgraphEdge> for EdgePattern {
    fn from(edge: &SubgraphEdge) -> Self {
        EdgePattern::labeled(edge.label.clone())
            .with_properties(edge.properties.clone())
            .from_node(edge.source)
            .to_node(edge.target)
    }
}
