//! Mesh-level failures.

use std::error::Error;
use std::fmt;

use heatmesh_core::{ExchangeError, NodeId};

use crate::config::ConfigError;

/// Errors from running a whole mesh.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MeshError {
    /// The configuration failed validation.
    Config(ConfigError),
    /// A node's exchange failed.
    Node {
        /// The failing node.
        id: NodeId,
        /// What went wrong.
        source: ExchangeError,
    },
    /// A full scheduling round made no progress and nodes remain
    /// unfinished.
    Deadlock {
        /// Nodes that were blocked.
        blocked: Vec<NodeId>,
    },
    /// The OS refused to spawn a node thread.
    ThreadSpawnFailed {
        /// The underlying error message.
        reason: String,
    },
    /// A node thread panicked.
    NodePanicked {
        /// The panicking node.
        id: NodeId,
    },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Node { id, source } => write!(f, "node {id}: {source}"),
            Self::Deadlock { blocked } => {
                write!(f, "deadlock: {} node(s) blocked", blocked.len())
            }
            Self::ThreadSpawnFailed { reason } => {
                write!(f, "failed to spawn node thread: {reason}")
            }
            Self::NodePanicked { id } => write!(f, "node {id} panicked"),
        }
    }
}

impl Error for MeshError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Node { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for MeshError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heatmesh_core::TransportError;

    #[test]
    fn node_error_chains_source() {
        let e = MeshError::Node {
            id: NodeId(2),
            source: ExchangeError::Transport(TransportError::Shutdown),
        };
        assert_eq!(e.to_string(), "node 2: transport: mesh is shutting down");
        assert!(e.source().is_some());
    }
}
