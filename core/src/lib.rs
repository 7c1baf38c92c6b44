//! hograph Core Types
//!
//! This crate provides the foundational types used throughout hograph:
//! - Identity types (NodeId, EdgeId)
//! - Labels and label sets
//! - Property values (the Value enum over the declared property kinds)
//! - Property sets with unique keys and stable order
//! - Entity structures (Node, Edge, NodeTuple, HyperEdge, Subgraph, SubgraphEdge)
//! - Model error types

mod entity;
mod error;
mod id;
mod label;
mod property;
mod value;

pub use entity::*;
pub use error::*;
pub use id::*;
pub use label::*;
pub use property::*;
pub use value::*;
