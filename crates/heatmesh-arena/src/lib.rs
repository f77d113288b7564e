//! Double-buffered per-node storage for heatmesh subgrids and edges.
//!
//! Every buffer a node touches during the simulation is allocated here
//! once, at startup, and reused for every step.
//!
//! # Architecture
//!
//! ```text
//! LocalState
//! ├── SubgridPair (ping-pong)
//! │   ├── Subgrid A  ←── current (even swaps) / next (odd swaps)
//! │   └── Subgrid B  ←── next (even swaps) / current (odd swaps)
//! └── BoundaryBank
//!     ├── outgoing[N, S, E, W]  ←── written by the stencil, sent
//!     └── incoming[N, S, E, W]  ←── received or fixed, read by the stencil
//! ```
//!
//! The stencil borrows all four pieces at once through a [`StepGuard`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boundary;
pub mod config;
pub mod error;
pub mod pingpong;
pub mod state;
pub mod subgrid;

pub use boundary::BoundaryBank;
pub use config::ArenaConfig;
pub use error::ArenaError;
pub use pingpong::SubgridPair;
pub use state::{LocalState, StepGuard};
pub use subgrid::Subgrid;
