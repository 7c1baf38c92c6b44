//! Binary property-graph store.
//!
//! The `GraphStore` trait is the contract the higher-order layers are built
//! on: labeled nodes, directed typed relationships, label and adjacency
//! scans and single-level transactions. `MemoryGraph` is the in-memory
//! implementation.

mod error;
mod index;
mod memory;
mod store;
mod txn;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryGraph;
pub use store::{Direction, GraphStore};
