//! Undo log for the open transaction.

use hograph_core::{Edge, EdgeId, Node, NodeId, PropertySet};

/// One reversible change.
#[derive(Debug, Clone)]
pub enum UndoEntry {
    /// A node was created; undo deletes it.
    CreatedNode(NodeId),
    /// A relationship was created; undo deletes it.
    CreatedRelationship(EdgeId),
    /// A node was deleted; undo restores it under the same identity.
    DeletedNode(Node),
    /// A relationship was deleted; undo restores it under the same identity.
    DeletedRelationship(Edge),
    /// A node's properties were replaced.
    NodeProperties { id: NodeId, old: PropertySet },
    /// A relationship's properties were replaced.
    RelationshipProperties { id: EdgeId, old: PropertySet },
}

/// Changes recorded since `begin`, in application order.
#[derive(Debug, Default)]
pub struct UndoLog {
    entries: Vec<UndoEntry>,
}

impl UndoLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: UndoEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Consume the log, yielding entries newest first.
    pub fn into_reverse(self) -> impl Iterator<Item = UndoEntry> {
        self.entries.into_iter().rev()
    }
}
