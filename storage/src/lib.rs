//! hograph Storage
//!
//! The public CRUD surface over a `GraphStore`:
//! - `GraphStorage`: plain nodes and edges, clearing, path traversal
//! - `HyperGraphStorage`: hyperedges
//! - `TupleStorage`: node tuples
//! - `SubgraphStorage`: subgraphs and subgraph-edges
//!
//! Every facade dereferences to `GraphStorage`, so the binary layer and
//! `traverse_path` are available on all of them. Each write runs inside one
//! store transaction.

mod base;
mod config;
mod error;
mod hypergraph;
mod subgraph;
mod tuple;

pub use base::GraphStorage;
pub use config::{MatchPolicy, StorageConfig};
pub use error::{StorageError, StorageResult};
pub use hypergraph::HyperGraphStorage;
pub use subgraph::SubgraphStorage;
pub use tuple::TupleStorage;
