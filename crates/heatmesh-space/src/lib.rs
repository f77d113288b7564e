//! Square mesh topology for heatmesh nodes.
//!
//! Nodes are laid out on a `2^log_len × 2^log_len` mesh with
//! four-directional connectivity and no wrap-around. [`MeshTopology`]
//! resolves a node identity to its coordinates and neighbour set,
//! producing a [`NodeTopology`] that is immutable for the whole run.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod topology;

pub use error::SpaceError;
pub use topology::{MeshTopology, NodeTopology};
