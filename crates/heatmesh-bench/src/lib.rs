//! Benchmark profiles for the heatmesh simulation.
//!
//! - [`reference_profile`]: the default 8×8 board, L = 15 (120×120 cells)
//! - [`stress_profile`]: 16×16 nodes, L = 31 (496×496 cells)

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use heatmesh_core::Fixed;
use heatmesh_engine::MeshConfig;

/// The default board: 64 nodes exchanging 16-word messages.
pub fn reference_profile(steps: u64) -> MeshConfig {
    MeshConfig {
        steps,
        ..MeshConfig::default()
    }
}

/// 256 nodes exchanging 32-word messages.
pub fn stress_profile(steps: u64) -> MeshConfig {
    MeshConfig {
        log_nodes: 8,
        log_words_per_msg: 5,
        steps,
        hot: Fixed::from_int(255),
        cold: Fixed::from_int(40),
    }
}
