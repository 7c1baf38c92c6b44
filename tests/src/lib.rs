//! hograph integration test support.
//!
//! Shared fixtures for the integration suites under `tests/`:
//!
//! - **fixture** - seeded worlds (people, teams) on a `MemoryGraph`
//! - **failing** - a `GraphStore` wrapper that fails after a write budget
//!
//! # Example
//!
//! ```ignore
//! use hograph_tests::prelude::*;
//!
//! #[test]
//! fn test_people() {
//!     let mut world = World::people();
//!     let storage = world.hypergraph();
//!     assert_eq!(storage.get_node_count(Pattern::labeled(["Person"])).unwrap(), 3);
//! }
//! ```

mod failing;
mod fixture;

pub use failing::FailingStore;
pub use fixture::{person, World};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::failing::FailingStore;
    pub use crate::fixture::{person, World};
    pub use hograph_codec::{AuxKind, CodecError};
    pub use hograph_core::{
        props, Edge, HyperEdge, Label, LabelSet, ModelError, Node, NodeId, NodeTuple,
        PropertySet, Subgraph, SubgraphEdge, Value,
    };
    pub use hograph_graph::{GraphStore, MemoryGraph, StoreError};
    pub use hograph_pattern::{EdgePattern, MatchPolicy, Pattern, PatternError};
    pub use hograph_query::{Path, PathError, PathTable};
    pub use hograph_storage::{
        GraphStorage, HyperGraphStorage, StorageConfig, StorageError, StorageResult,
        SubgraphStorage, TupleStorage,
    };
}
