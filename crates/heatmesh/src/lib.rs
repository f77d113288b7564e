//! heatmesh: heat diffusion on a square mesh of message-passing nodes.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all heatmesh sub-crates. For most users, adding `heatmesh` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use heatmesh::prelude::*;
//!
//! // 4×4 nodes, 7×7 cells each, 50 steps.
//! let config = MeshConfig::new(4, 3, 50);
//! let out = ThreadedMesh::new(config.clone()).unwrap().run().unwrap();
//! assert_eq!(out.words.len(), 16 * 49);
//!
//! // The same run on one thread, with a seeded schedule, agrees exactly.
//! let same = CooperativeMesh::new(&config, 7).unwrap().run().unwrap();
//! assert_eq!(out.sorted_words(), same.sorted_words());
//!
//! // Hot corner is in the north-west.
//! let grid = out.grid(config.global_extent());
//! assert!(grid[0][0] > grid[27][27]);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `heatmesh-core` | Fixed point, IDs, directions, boundary messages, transport traits |
//! | [`space`] | `heatmesh-space` | Mesh topology and neighbour resolution |
//! | [`arena`] | `heatmesh-arena` | Double-buffered subgrid and boundary buffers |
//! | [`propagators`] | `heatmesh-propagators` | Stencil trait, averaging stencil, fixed edges |
//! | [`engine`] | `heatmesh-engine` | Exchange protocol, node driver, transports, mesh runners |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`heatmesh-core`).
///
/// Contains [`types::Fixed`], the boundary message format
/// ([`types::BoundaryBuffer`], [`types::EdgeTag`]), error types, and the
/// [`types::Transport`] and [`types::HostSink`] traits.
pub use heatmesh_core as types;

/// Mesh topology (`heatmesh-space`).
pub use heatmesh_space as space;

/// Per-node storage (`heatmesh-arena`).
///
/// [`arena::LocalState`] holds a node's subgrid pair and edge buffers.
pub use heatmesh_arena as arena;

/// Stencil rules and boundary conditions (`heatmesh-propagators`).
///
/// The [`propagators::Stencil`] trait is the extension point for custom
/// update rules.
pub use heatmesh_propagators as propagators;

/// Node driver and mesh runners (`heatmesh-engine`).
///
/// [`engine::ThreadedMesh`] runs one thread per node,
/// [`engine::CooperativeMesh`] runs every node on the calling thread.
pub use heatmesh_engine as engine;

/// Common imports for typical heatmesh usage.
///
/// ```rust
/// use heatmesh::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use heatmesh_core::{
        BoundaryBuffer, Direction, Fixed, HostSink, Interest, NodeId, Phase, StepId, Transport,
    };

    // Errors
    pub use heatmesh_core::{ExchangeError, ProtocolError, TransportError};

    // Space
    pub use heatmesh_space::{MeshTopology, NodeTopology};

    // Propagators
    pub use heatmesh_propagators::{AverageStencil, FixedEdges, Stencil};

    // Engine
    pub use heatmesh_engine::{
        ConfigError, CooperativeMesh, HeatNode, MeshConfig, MeshError, MeshOutput, NodeMetrics,
        ResultWord, ThreadedMesh,
    };
}
