//! Path execution.

use crate::compiler::{compile, CompiledPath, End, PathOp};
use crate::projection::Projection;
use crate::{Path, PathElement, PathError, PathResult, PathTable};
use hograph_codec::vocab::is_reserved_key;
use hograph_codec::{
    aux_kind, decode_subgraph_edge, member_ids, plain_edge, plain_node, subgraph_edge_ids, AuxKind,
};
use hograph_core::{EdgeId, NodeId, PropertyType, Value};
use hograph_graph::GraphStore;
use hograph_pattern::{Binding, Bindings, EdgePattern, Matcher, Pattern};
use std::cell::Cell;
use std::cmp::Ordering;
use tracing::debug;

/// Executes paths against a store.
pub struct PathExecutor<'s, S: GraphStore + ?Sized> {
    store: &'s S,
    matcher: Matcher<'s, S>,
}

impl<'s, S: GraphStore + ?Sized> PathExecutor<'s, S> {
    /// Create a new executor.
    pub fn new(store: &'s S) -> Self {
        Self {
            store,
            matcher: Matcher::new(store),
        }
    }

    /// Traverse alternative paths and project the satisfying assignments.
    ///
    /// Rows of each path are appended in path order. `sort` orders the
    /// combined rows ascending and stably; without it rows keep store order.
    /// A projection or sort key naming a variable some path does not bind,
    /// or a property absent on any row, fails the whole traversal.
    pub fn traverse<R, K>(&self, paths: &[Path], return_values: &[R], sort: &[K]) -> PathResult<PathTable>
    where
        R: AsRef<str>,
        K: AsRef<str>,
    {
        let projections = parse_all(return_values)?;
        let sort_keys = parse_all(sort)?;

        let compiled = paths.iter().map(compile).collect::<PathResult<Vec<_>>>()?;
        for path in &compiled {
            for projection in projections.iter().chain(&sort_keys) {
                if !path.binds(&projection.var) {
                    return Err(PathError::projection(&projection.var, &projection.property));
                }
            }
        }

        let mut rows: Vec<(Vec<Value>, Vec<Value>)> = Vec::new();
        for path in &compiled {
            for bindings in self.execute(path)? {
                let values = self.project(&bindings, &projections)?;
                let keys = self.project(&bindings, &sort_keys)?;
                rows.push((values, keys));
            }
        }

        if !sort_keys.is_empty() {
            check_sort_kinds(&rows, &sort_keys)?;
            let clash = Cell::new(None);
            rows.sort_by(|(_, a), (_, b)| compare_keys(a, b, &clash));
            if let Some((index, first, second)) = clash.get() {
                return Err(PathError::unsortable_key(sort_keys[index].to_string(), first, second));
            }
        }

        let columns = projections.iter().map(Projection::to_string).collect();
        let mut table = PathTable::with_columns(columns);
        for (values, _) in rows {
            table.push(values);
        }
        debug!(paths = paths.len(), rows = table.len(), "traverse");
        Ok(table)
    }

    /// Every satisfying assignment of one compiled path, in store order.
    pub fn execute(&self, path: &CompiledPath) -> PathResult<Vec<Bindings>> {
        let mut candidates = vec![Bindings::new()];

        for op in &path.ops {
            let mut next = Vec::new();
            for bindings in &candidates {
                next.extend(self.execute_op(op, bindings)?);
            }
            candidates = next;
            if candidates.is_empty() {
                break;
            }
        }

        Ok(candidates)
    }

    /// Execute a single path operation for one partial assignment.
    fn execute_op(&self, op: &PathOp, bindings: &Bindings) -> PathResult<Vec<Bindings>> {
        match op {
            PathOp::Scan { var, element } => {
                let found: Vec<Binding> = match element {
                    PathElement::Node(pattern) => {
                        self.matcher.nodes(pattern)?.into_iter().map(Binding::Node).collect()
                    }
                    PathElement::Edge(pattern) => {
                        self.matcher.edges(pattern)?.into_iter().map(Binding::Edge).collect()
                    }
                    PathElement::NodeTuple(pattern)
                    | PathElement::HyperEdge(pattern)
                    | PathElement::Subgraph(pattern) => {
                        let kind = element
                            .aux_kind()
                            .ok_or_else(|| PathError::invalid_adjacency(element.kind_name(), "scan"))?;
                        self.matcher
                            .elements(kind, pattern)?
                            .into_iter()
                            .map(Binding::Node)
                            .collect()
                    }
                    PathElement::SubgraphEdge(pattern) => self
                        .matcher
                        .subgraph_edges(pattern)?
                        .into_iter()
                        .map(Binding::Edge)
                        .collect(),
                };
                Ok(extend_all(bindings, var, found))
            }

            PathOp::FollowEdge {
                node_var,
                edge_var,
                end,
                pattern,
            } => {
                let node = bound_node(bindings, node_var)?;
                let found = match anchored(pattern, *end, node) {
                    Some(pattern) => self.matcher.edges(&pattern)?,
                    None => Vec::new(),
                };
                Ok(extend_all(bindings, edge_var, found.into_iter().map(Binding::Edge)))
            }

            PathOp::EdgeEndpoint {
                edge_var,
                node_var,
                end,
                pattern,
            } => {
                let edge_id = bound_edge(bindings, edge_var)?;
                let Some(edge) = plain_edge(self.store, edge_id)? else {
                    return Ok(Vec::new());
                };
                let endpoint = endpoint_of(edge.source, edge.target, *end);
                let found = self.node_if_matches(endpoint, pattern)?;
                Ok(extend_all(bindings, node_var, found.map(Binding::Node)))
            }

            PathOp::ElementOfMember {
                member_var,
                element_var,
                kind,
                pattern,
            } => {
                let member = bound_node(bindings, member_var)?;
                let narrowed = pattern.clone().with_member(member);
                let found = self.matcher.elements(*kind, &narrowed)?;
                Ok(extend_all(bindings, element_var, found.into_iter().map(Binding::Node)))
            }

            PathOp::MemberOfElement {
                element_var,
                member_var,
                kind,
                pattern,
            } => {
                let element = bound_node(bindings, element_var)?;
                let mut found = Vec::new();
                for member in member_ids(self.store, element, *kind)? {
                    if found.contains(&member) {
                        continue;
                    }
                    if self.node_if_matches(member, pattern)?.is_some() {
                        found.push(member);
                    }
                }
                Ok(extend_all(bindings, member_var, found.into_iter().map(Binding::Node)))
            }

            PathOp::FollowSubgraphEdge {
                subgraph_var,
                edge_var,
                end,
                pattern,
            } => {
                let subgraph = bound_node(bindings, subgraph_var)?;
                let found = match anchored(pattern, *end, subgraph) {
                    Some(pattern) => self.matcher.subgraph_edges(&pattern)?,
                    None => Vec::new(),
                };
                Ok(extend_all(bindings, edge_var, found.into_iter().map(Binding::Edge)))
            }

            PathOp::SubgraphEdgeEndpoint {
                edge_var,
                subgraph_var,
                end,
                pattern,
            } => {
                let edge_id = bound_edge(bindings, edge_var)?;
                let Some(edge) = decode_subgraph_edge(self.store, edge_id)? else {
                    return Ok(Vec::new());
                };
                let endpoint = endpoint_of(edge.source, edge.target, *end);
                let found = self.element_if_matches(endpoint, AuxKind::Subgraph, pattern)?;
                Ok(extend_all(bindings, subgraph_var, found.map(Binding::Node)))
            }
        }
    }

    fn node_if_matches(&self, id: NodeId, pattern: &Pattern) -> PathResult<Option<NodeId>> {
        let accepted = plain_node(self.store, id)?
            .is_some_and(|node| pattern.accepts(&node.labels, &node.properties, &[], &[]));
        Ok(accepted.then_some(id))
    }

    fn element_if_matches(
        &self,
        id: NodeId,
        kind: AuxKind,
        pattern: &Pattern,
    ) -> PathResult<Option<NodeId>> {
        let Some(node) = self.store.node(id)? else {
            return Ok(None);
        };
        if aux_kind(&node) != Some(kind) {
            return Ok(None);
        }
        let members = if pattern.members().is_empty() {
            Vec::new()
        } else {
            member_ids(self.store, id, kind)?
        };
        let edges = if pattern.edge_members().is_empty() {
            Vec::new()
        } else {
            subgraph_edge_ids(self.store, id)?
        };
        Ok(pattern
            .accepts(&node.labels, &node.properties, &members, &edges)
            .then_some(id))
    }

    /// Property values of the bound variables, in projection order.
    fn project(&self, bindings: &Bindings, projections: &[Projection]) -> PathResult<Vec<Value>> {
        let mut values = Vec::with_capacity(projections.len());
        for projection in projections {
            let missing = || PathError::projection(&projection.var, &projection.property);
            // Encoding markers are never user properties
            if is_reserved_key(&projection.property) {
                return Err(missing());
            }
            let value = match bindings.get(&projection.var).ok_or_else(missing)? {
                Binding::Node(id) => self
                    .store
                    .node(id)?
                    .and_then(|node| node.get(&projection.property).cloned()),
                Binding::Edge(id) => self.edge_property(id, &projection.property)?,
            };
            values.push(value.ok_or_else(missing)?);
        }
        Ok(values)
    }

    fn edge_property(&self, id: EdgeId, property: &str) -> PathResult<Option<Value>> {
        if let Some(edge) = decode_subgraph_edge(self.store, id)? {
            return Ok(edge.get(property).cloned());
        }
        Ok(self
            .store
            .relationship(id)?
            .and_then(|edge| edge.get(property).cloned()))
    }
}

fn parse_all<T: AsRef<str>>(specs: &[T]) -> PathResult<Vec<Projection>> {
    specs
        .iter()
        .map(|spec| Projection::parse(spec.as_ref()))
        .collect()
}

/// A sort key and the two kinds that met in it.
type Clash = Option<(usize, PropertyType, PropertyType)>;

/// Every row's key must be comparable with the first row's, column by column.
fn check_sort_kinds(rows: &[(Vec<Value>, Vec<Value>)], sort_keys: &[Projection]) -> PathResult<()> {
    let Some(((_, first), rest)) = rows.split_first() else {
        return Ok(());
    };
    for (_, keys) in rest {
        for (index, (a, b)) in first.iter().zip(keys).enumerate() {
            if a.cmp_sortable(b).is_none() {
                return Err(PathError::unsortable_key(
                    sort_keys[index].to_string(),
                    a.property_type(),
                    b.property_type(),
                ));
            }
        }
    }
    Ok(())
}

fn compare_keys(a: &[Value], b: &[Value], clash: &Cell<Clash>) -> Ordering {
    for (index, (a, b)) in a.iter().zip(b).enumerate() {
        match a.cmp_sortable(b) {
            Some(Ordering::Equal) => {}
            Some(ord) => return ord,
            // Lists whose elements differ in kind
            None => {
                if clash.get().is_none() {
                    clash.set(Some((index, a.property_type(), b.property_type())));
                }
                return Ordering::Equal;
            }
        }
    }
    Ordering::Equal
}

fn extend_all(
    bindings: &Bindings,
    var: &str,
    found: impl IntoIterator<Item = Binding>,
) -> Vec<Bindings> {
    found
        .into_iter()
        .filter_map(|binding| bindings.extend_with(var, binding))
        .collect()
}

fn bound_node(bindings: &Bindings, var: &str) -> PathResult<NodeId> {
    bindings
        .get(var)
        .and_then(|binding| binding.as_node())
        .ok_or_else(|| PathError::unbound_variable(var))
}

fn bound_edge(bindings: &Bindings, var: &str) -> PathResult<EdgeId> {
    bindings
        .get(var)
        .and_then(|binding| binding.as_edge())
        .ok_or_else(|| PathError::unbound_variable(var))
}

fn endpoint_of(source: NodeId, target: NodeId, end: End) -> NodeId {
    match end {
        End::Source => source,
        End::Target => target,
    }
}

/// Narrow an edge pattern to relationships whose `end` is `node`, or `None`
/// when the pattern already pins that end elsewhere.
fn anchored(pattern: &EdgePattern, end: End, node: NodeId) -> Option<EdgePattern> {
    match end {
        End::Source => match pattern.source() {
            Some(source) if source != node => None,
            _ => Some(pattern.clone().from_node(node)),
        },
        End::Target => match pattern.target() {
            Some(target) if target != node => None,
            _ => Some(pattern.clone().to_node(node)),
        },
    }
}
