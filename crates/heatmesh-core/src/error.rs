//! Error types for the heatmesh simulation.
//!
//! Organized by layer: the transport that moves boundary messages, the
//! exchange protocol that interprets them, and [`ExchangeError`] which
//! the node driver surfaces for either.

use std::error::Error;
use std::fmt;

use crate::direction::Direction;
use crate::id::{NodeId, StepId};

/// Errors reported by a [`Transport`](crate::Transport).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportError {
    /// The channel to or from a peer is closed.
    Disconnected {
        /// The peer, if the transport knows which one.
        peer: Option<NodeId>,
    },
    /// A send was addressed to a node that is not a neighbour.
    UnknownPeer {
        /// The requested destination.
        peer: NodeId,
    },
    /// The operation cannot complete and nothing will make it ready.
    ///
    /// Only in-process transports can detect this; a real network simply
    /// stalls.
    WouldBlock,
    /// The mesh is shutting down after another node failed.
    Shutdown,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected { peer: Some(peer) } => {
                write!(f, "channel to node {peer} disconnected")
            }
            Self::Disconnected { peer: None } => write!(f, "inbox disconnected"),
            Self::UnknownPeer { peer } => write!(f, "node {peer} is not a neighbour"),
            Self::WouldBlock => write!(f, "transport can never become ready"),
            Self::Shutdown => write!(f, "mesh is shutting down"),
        }
    }
}

impl Error for TransportError {}

/// Violations of the edge exchange protocol's preconditions.
///
/// The protocol assumes reliable, per-channel ordered delivery and at
/// most one step of skew between neighbours. Any of these errors means
/// that assumption was broken; none of them is recoverable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProtocolError {
    /// The tag word's direction field is outside `0..4`.
    MalformedTag {
        /// The offending tag word.
        word: u32,
    },
    /// A message arrived from a direction with no neighbour.
    UnexpectedEdge {
        /// The direction named by the tag.
        direction: Direction,
    },
    /// Two current-phase messages arrived from one direction in one step.
    DuplicateEdge {
        /// The direction that sent twice.
        direction: Direction,
        /// The step being exchanged.
        step: StepId,
    },
    /// An early message arrived while the pending slot was still full,
    /// meaning the neighbour is more than one step ahead.
    SkewExceeded {
        /// The direction whose pending slot was occupied.
        direction: Direction,
        /// The step being exchanged.
        step: StepId,
    },
    /// A message's edge length differs from the local subgrid's.
    LengthMismatch {
        /// Local edge length.
        expected: usize,
        /// Received edge length.
        actual: usize,
    },
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedTag { word } => write!(f, "malformed edge tag {word:#x}"),
            Self::UnexpectedEdge { direction } => {
                write!(f, "edge received from {direction} but there is no neighbour there")
            }
            Self::DuplicateEdge { direction, step } => {
                write!(f, "second {direction} edge for step {step}")
            }
            Self::SkewExceeded { direction, step } => write!(
                f,
                "{direction} neighbour is more than one step ahead of step {step}"
            ),
            Self::LengthMismatch { expected, actual } => {
                write!(f, "edge length {actual}, expected {expected}")
            }
        }
    }
}

impl Error for ProtocolError {}

/// Failure of one node's boundary exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExchangeError {
    /// The transport failed.
    Transport(TransportError),
    /// A received message broke the protocol.
    Protocol(ProtocolError),
}

impl fmt::Display for ExchangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "transport: {e}"),
            Self::Protocol(e) => write!(f, "protocol: {e}"),
        }
    }
}

impl Error for ExchangeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(e) => Some(e),
            Self::Protocol(e) => Some(e),
        }
    }
}

impl From<TransportError> for ExchangeError {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

impl From<ProtocolError> for ExchangeError {
    fn from(e: ProtocolError) -> Self {
        Self::Protocol(e)
    }
}
