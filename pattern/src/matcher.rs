//! Pattern matching against the store.

use crate::{EdgePattern, Pattern, PatternError, PatternResult};
use hograph_codec::vocab::SUBGRAPH_EDGE;
use hograph_codec::{
    aux_kind, decode_subgraph_edge, member_ids, plain_edge, plain_node, subgraph_edge_ids, AuxKind,
};
use hograph_core::{EdgeId, NodeId};
use hograph_graph::{Direction, GraphStore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::trace;

/// How a single-element lookup treats several matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Take the first match in store enumeration order.
    #[default]
    FirstMatch,
    /// Fail with `AmbiguousMatch` when more than one element matches.
    RequireUnique,
}

/// Resolves patterns against a store.
///
/// Every enumeration is in store order, so under `FirstMatch` the same
/// pattern over the same store always picks the same element.
pub struct Matcher<'s, S: GraphStore + ?Sized> {
    store: &'s S,
    policy: MatchPolicy,
}

impl<'s, S: GraphStore + ?Sized> Matcher<'s, S> {
    /// Create a matcher with the first-match policy.
    pub fn new(store: &'s S) -> Self {
        Self {
            store,
            policy: MatchPolicy::default(),
        }
    }

    /// Use another match policy.
    pub fn with_policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    // ==================== Higher-order elements ====================

    /// All elements of `kind` matching the pattern, as auxiliary node ids.
    pub fn elements(&self, kind: AuxKind, pattern: &Pattern) -> PatternResult<Vec<NodeId>> {
        pattern.validate()?;
        if kind != AuxKind::Subgraph && !pattern.edge_members().is_empty() {
            return Err(PatternError::malformed(format!(
                "a {kind} pattern cannot name member edges"
            )));
        }

        let seeds = self.element_seeds(kind, pattern)?;
        let mut matches = Vec::new();
        for id in &seeds {
            let Some(node) = self.store.node(*id)? else {
                continue;
            };
            if aux_kind(&node) != Some(kind) {
                continue;
            }
            let members = if pattern.members().is_empty() {
                Vec::new()
            } else {
                member_ids(self.store, *id, kind)?
            };
            let edges = if pattern.edge_members().is_empty() {
                Vec::new()
            } else {
                subgraph_edge_ids(self.store, *id)?
            };
            if pattern.accepts(&node.labels, &node.properties, &members, &edges) {
                matches.push(*id);
            }
        }
        trace!(%kind, candidates = seeds.len(), matches = matches.len(), "match elements");
        Ok(matches)
    }

    /// The element of `kind` a single-element operation acts on.
    pub fn element(&self, kind: AuxKind, pattern: &Pattern) -> PatternResult<Option<NodeId>> {
        let matches = self.elements(kind, pattern)?;
        self.pick(kind.as_str(), matches)
    }

    /// Candidate auxiliary nodes, narrowed by the most selective part of the pattern.
    fn element_seeds(&self, kind: AuxKind, pattern: &Pattern) -> PatternResult<Vec<NodeId>> {
        if let Some(&member) = pattern.members().first() {
            let mut seeds = BTreeSet::new();
            let rel_ids =
                self.store
                    .relationships(member, Direction::Outgoing, Some(kind.membership_type()))?;
            for rel_id in rel_ids {
                if let Some(rel) = self.store.relationship(rel_id)? {
                    seeds.insert(rel.target);
                }
            }
            return Ok(seeds.into_iter().collect());
        }
        self.label_seeds(pattern)
    }

    fn label_seeds(&self, pattern: &Pattern) -> PatternResult<Vec<NodeId>> {
        match pattern.labels().iter().next() {
            Some(label) => Ok(self.store.nodes_with_label(label.as_str())?),
            None => Ok(self.store.node_ids()?),
        }
    }

    // ==================== Plain nodes ====================

    /// All plain nodes matching the pattern.
    pub fn nodes(&self, pattern: &Pattern) -> PatternResult<Vec<NodeId>> {
        pattern.validate()?;
        if !pattern.members().is_empty() || !pattern.edge_members().is_empty() {
            return Err(PatternError::malformed("a node pattern cannot name members"));
        }

        let seeds = self.label_seeds(pattern)?;
        let mut matches = Vec::new();
        for id in &seeds {
            if let Some(node) = plain_node(self.store, *id)? {
                if pattern.accepts(&node.labels, &node.properties, &[], &[]) {
                    matches.push(*id);
                }
            }
        }
        trace!(candidates = seeds.len(), matches = matches.len(), "match nodes");
        Ok(matches)
    }

    /// The plain node a single-node operation acts on.
    pub fn node(&self, pattern: &Pattern) -> PatternResult<Option<NodeId>> {
        let matches = self.nodes(pattern)?;
        self.pick("node", matches)
    }

    // ==================== Edges ====================

    /// All user edges matching the pattern.
    pub fn edges(&self, pattern: &EdgePattern) -> PatternResult<Vec<EdgeId>> {
        pattern.validate()?;

        let label = pattern.label().map(|label| label.as_str());
        let seeds = self.edge_seeds(pattern, label)?;
        let mut matches = Vec::new();
        for id in &seeds {
            if let Some(edge) = plain_edge(self.store, *id)? {
                if pattern.accepts(&edge.label, &edge.properties, edge.source, edge.target) {
                    matches.push(*id);
                }
            }
        }
        trace!(candidates = seeds.len(), matches = matches.len(), "match edges");
        Ok(matches)
    }

    /// The user edge a single-edge operation acts on.
    pub fn edge(&self, pattern: &EdgePattern) -> PatternResult<Option<EdgeId>> {
        let matches = self.edges(pattern)?;
        self.pick("edge", matches)
    }

    // ==================== Subgraph-edges ====================

    /// All subgraph-edges matching the pattern.
    pub fn subgraph_edges(&self, pattern: &EdgePattern) -> PatternResult<Vec<EdgeId>> {
        pattern.validate()?;

        let seeds = self.edge_seeds(pattern, Some(SUBGRAPH_EDGE))?;
        let mut matches = Vec::new();
        for id in &seeds {
            if let Some(edge) = decode_subgraph_edge(self.store, *id)? {
                if pattern.accepts(&edge.label, &edge.properties, edge.source, edge.target) {
                    matches.push(*id);
                }
            }
        }
        trace!(candidates = seeds.len(), matches = matches.len(), "match subgraph edges");
        Ok(matches)
    }

    /// The subgraph-edge a single-element operation acts on.
    pub fn subgraph_edge(&self, pattern: &EdgePattern) -> PatternResult<Option<EdgeId>> {
        let matches = self.subgraph_edges(pattern)?;
        self.pick("subgraph_edge", matches)
    }

    fn edge_seeds(&self, pattern: &EdgePattern, rel_type: Option<&str>) -> PatternResult<Vec<EdgeId>> {
        let seeds = match (pattern.source(), pattern.target(), rel_type) {
            (Some(source), _, _) => self.store.relationships(source, Direction::Outgoing, rel_type)?,
            (None, Some(target), _) => {
                self.store.relationships(target, Direction::Incoming, rel_type)?
            }
            (None, None, Some(rel_type)) => self.store.relationships_of_type(rel_type)?,
            (None, None, None) => self.store.relationship_ids()?,
        };
        Ok(seeds)
    }

    fn pick<T>(&self, kind: &str, matches: Vec<T>) -> PatternResult<Option<T>> {
        if self.policy == MatchPolicy::RequireUnique && matches.len() > 1 {
            return Err(PatternError::ambiguous(kind, matches.len()));
        }
        Ok(matches.into_iter().next())
    }
}
