//! Core types and traits for the heatmesh simulation.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions shared by every node in the mesh:
//! fixed-point temperatures, directions, identifiers, the boundary
//! message wire format, error types, and the transport traits.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod direction;
pub mod error;
pub mod fixed;
pub mod id;
pub mod message;
pub mod traits;

pub use direction::Direction;
pub use error::{ExchangeError, ProtocolError, TransportError};
pub use fixed::Fixed;
pub use id::{NodeId, Phase, StepId};
pub use message::{BoundaryBuffer, EdgeTag, MAX_LOG_WORDS_PER_MSG, MAX_MESSAGE_WORDS};
pub use traits::{HostSink, Interest, Transport};
