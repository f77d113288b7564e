//! Node driver, edge exchange protocol and mesh runners for heatmesh.
//!
//! A [`HeatNode`] owns one subgrid and runs a fixed number of steps:
//! stencil, then [`EdgeExchange`] with its neighbours, then swap. After
//! the last step it emits its cells as [`ResultWord`]s.
//!
//! Two drivers run a whole mesh:
//!
//! - [`ThreadedMesh`]: one OS thread per node over crossbeam channels.
//! - [`CooperativeMesh`]: every node on the calling thread over an
//!   in-process [`LocalMesh`], with a seeded schedule.
//!
//! Both produce identical grids for the same [`MeshConfig`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod channel;
pub mod config;
pub mod cooperative;
pub mod emit;
pub mod error;
pub mod exchange;
pub mod local;
pub mod metrics;
pub mod node;
pub mod threaded;

pub use channel::{channel_mesh, ChannelSink, ChannelTransport, Shutdown};
pub use config::{ConfigError, MeshConfig};
pub use cooperative::{CooperativeMesh, RoundOutcome};
pub use emit::{emit_subgrid, MeshOutput, ResultWord};
pub use error::MeshError;
pub use exchange::{EdgeExchange, ExchangePoll, ExchangeReport};
pub use local::{LocalMesh, LocalPort};
pub use metrics::NodeMetrics;
pub use node::{HeatNode, NodePoll};
pub use threaded::ThreadedMesh;
