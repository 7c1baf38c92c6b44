//! Path compilation.
//!
//! A path compiles to a scan of its first element followed by one join per
//! adjacent pair. Each join extends every partial assignment with the
//! candidates reachable from the already bound neighbor.

use crate::projection::is_variable_name;
use crate::{Path, PathElement, PathError, PathResult};
use hograph_codec::AuxKind;
use hograph_pattern::{EdgePattern, Pattern};
use std::collections::BTreeMap;

/// Which end of a directed relationship a join follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum End {
    Source,
    Target,
}

/// A compiled path operation.
#[derive(Debug, Clone, PartialEq)]
pub enum PathOp {
    /// Bind every element matching the first path element.
    Scan { var: String, element: PathElement },

    /// Bind user edges whose `end` is the bound node.
    FollowEdge {
        node_var: String,
        edge_var: String,
        end: End,
        pattern: EdgePattern,
    },

    /// Bind the node at `end` of the bound user edge.
    EdgeEndpoint {
        edge_var: String,
        node_var: String,
        end: End,
        pattern: Pattern,
    },

    /// Bind elements of `kind` the bound node is a member of.
    ElementOfMember {
        member_var: String,
        element_var: String,
        kind: AuxKind,
        pattern: Pattern,
    },

    /// Bind the member nodes of the bound element.
    MemberOfElement {
        element_var: String,
        member_var: String,
        kind: AuxKind,
        pattern: Pattern,
    },

    /// Bind subgraph-edges whose `end` is the bound subgraph.
    FollowSubgraphEdge {
        subgraph_var: String,
        edge_var: String,
        end: End,
        pattern: EdgePattern,
    },

    /// Bind the subgraph at `end` of the bound subgraph-edge.
    SubgraphEdgeEndpoint {
        edge_var: String,
        subgraph_var: String,
        end: End,
        pattern: Pattern,
    },
}

/// A path ready for execution.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledPath {
    pub ops: Vec<PathOp>,
    /// Every variable the path binds, with its element kind name.
    pub variables: BTreeMap<String, &'static str>,
}

impl CompiledPath {
    /// Whether the path binds `var`.
    pub fn binds(&self, var: &str) -> bool {
        self.variables.contains_key(var)
    }
}

/// Compile a path, rejecting invalid names, adjacencies and patterns.
pub fn compile(path: &Path) -> PathResult<CompiledPath> {
    let steps = path.steps();
    let Some((first, first_var)) = steps.first() else {
        return Err(PathError::EmptyPath);
    };

    let mut variables = BTreeMap::new();
    for (element, var) in steps {
        if !is_variable_name(var)? {
            return Err(PathError::invalid_variable(var));
        }
        validate_element(element)?;
        if let Some(previous) = variables.insert(var.clone(), element.kind_name()) {
            if previous != element.kind_name() {
                return Err(PathError::conflicting_variable(
                    var,
                    previous,
                    element.kind_name(),
                ));
            }
        }
    }

    let mut ops = vec![PathOp::Scan {
        var: first_var.clone(),
        element: first.clone(),
    }];
    for pair in steps.windows(2) {
        let (left, left_var) = &pair[0];
        let (right, right_var) = &pair[1];
        ops.push(join(left, left_var, right, right_var)?);
    }

    Ok(CompiledPath { ops, variables })
}

fn validate_element(element: &PathElement) -> PathResult<()> {
    match element {
        PathElement::Node(pattern)
        | PathElement::NodeTuple(pattern)
        | PathElement::HyperEdge(pattern)
        | PathElement::Subgraph(pattern) => pattern.validate()?,
        PathElement::Edge(pattern) | PathElement::SubgraphEdge(pattern) => pattern.validate()?,
    }
    Ok(())
}

/// The join binding `right` given that `left` is bound.
fn join(
    left: &PathElement,
    left_var: &str,
    right: &PathElement,
    right_var: &str,
) -> PathResult<PathOp> {
    use PathElement as E;

    let op = match (left, right) {
        (E::Node(_), E::Edge(pattern)) => PathOp::FollowEdge {
            node_var: left_var.to_string(),
            edge_var: right_var.to_string(),
            end: End::Source,
            pattern: pattern.clone(),
        },
        (E::Edge(_), E::Node(pattern)) => PathOp::EdgeEndpoint {
            edge_var: left_var.to_string(),
            node_var: right_var.to_string(),
            end: End::Target,
            pattern: pattern.clone(),
        },
        (E::Node(_), E::NodeTuple(pattern) | E::HyperEdge(pattern) | E::Subgraph(pattern)) => {
            PathOp::ElementOfMember {
                member_var: left_var.to_string(),
                element_var: right_var.to_string(),
                kind: aux_kind_of(right)?,
                pattern: pattern.clone(),
            }
        }
        (E::NodeTuple(_) | E::HyperEdge(_) | E::Subgraph(_), E::Node(pattern)) => {
            PathOp::MemberOfElement {
                element_var: left_var.to_string(),
                member_var: right_var.to_string(),
                kind: aux_kind_of(left)?,
                pattern: pattern.clone(),
            }
        }
        (E::Subgraph(_), E::SubgraphEdge(pattern)) => PathOp::FollowSubgraphEdge {
            subgraph_var: left_var.to_string(),
            edge_var: right_var.to_string(),
            end: End::Source,
            pattern: pattern.clone(),
        },
        (E::SubgraphEdge(_), E::Subgraph(pattern)) => PathOp::SubgraphEdgeEndpoint {
            edge_var: left_var.to_string(),
            subgraph_var: right_var.to_string(),
            end: End::Target,
            pattern: pattern.clone(),
        },
        _ => {
            return Err(PathError::invalid_adjacency(
                left.kind_name(),
                right.kind_name(),
            ))
        }
    };
    Ok(op)
}

fn aux_kind_of(element: &PathElement) -> PathResult<AuxKind> {
    element
        .aux_kind()
        .ok_or_else(|| PathError::invalid_adjacency(element.kind_name(), "membership"))
}
