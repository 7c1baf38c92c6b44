//! Lowering and lifting of higher-order elements.
//!
//! Every NodeTuple, HyperEdge and Subgraph is stored as one auxiliary node
//! marked with `_ho_kind`, linked to its members by reserved relationships.
//! A SubgraphEdge is one reserved relationship between two subgraph
//! auxiliary nodes. `encode` writes that shape, `decode` reads it back from
//! current store state.

mod decode;
mod encode;
mod error;
pub mod vocab;

pub use decode::{
    aux_kind, decode_group, decode_hyperedge, decode_node_tuple, decode_subgraph,
    decode_subgraph_edge, member_ids, plain_edge, plain_node, subgraph_edge_ids,
    subgraph_node_ids, LiftedGroup,
};
pub use encode::{
    detach_edge_memberships, encode_group, encode_subgraph, encode_subgraph_edge,
    remove_element, replace_element_properties, replace_subgraph_edge_properties,
};
pub use error::{CodecError, CodecResult};
pub use vocab::AuxKind;
