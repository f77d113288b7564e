//! Stencil update rules and boundary conditions for heatmesh.
//!
//! # Per-step order
//!
//! 1. [`FixedEdges`] (once, before step 0): burns the global boundary
//!    temperatures into the incoming edges of mesh-extremity nodes.
//! 2. [`AverageStencil`]: current subgrid + incoming edges → next
//!    subgrid + outgoing edges.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod average;
pub mod fixed_edges;
pub mod stencil;

pub use average::AverageStencil;
pub use fixed_edges::FixedEdges;
pub use stencil::Stencil;
