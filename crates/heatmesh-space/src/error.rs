//! Error types for mesh topology construction.

use heatmesh_core::NodeId;
use std::fmt;

/// Errors arising from topology construction or node resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpaceError {
    /// The node identity is outside the mesh.
    NodeOutOfRange {
        /// The offending identity.
        id: NodeId,
        /// Number of nodes in the mesh.
        node_count: u32,
    },
    /// The mesh would have more nodes than identities can address.
    MeshTooLarge {
        /// Requested log2 side length.
        log_len: u32,
        /// Largest supported log2 side length.
        max: u32,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeOutOfRange { id, node_count } => {
                write!(f, "node {id} out of range for a mesh of {node_count} nodes")
            }
            Self::MeshTooLarge { log_len, max } => {
                write!(f, "log2 side length {log_len} exceeds maximum {max}")
            }
        }
    }
}

impl std::error::Error for SpaceError {}
