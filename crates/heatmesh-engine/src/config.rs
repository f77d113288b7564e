//! Mesh configuration, validation, and error types.
//!
//! [`MeshConfig`] replaces the board-level compile-time constants of a
//! hardware deployment. It is validated once and then shared by every
//! node.

use std::error::Error;
use std::fmt;

use heatmesh_arena::{ArenaConfig, ArenaError};
use heatmesh_core::Fixed;
use heatmesh_propagators::FixedEdges;
use heatmesh_space::{MeshTopology, SpaceError};

use crate::emit::MAX_GLOBAL_EXTENT;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`MeshConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `log_nodes` is odd, so the nodes cannot form a square.
    NonSquareMesh {
        /// The configured value.
        log_nodes: u32,
    },
    /// Topology construction or node resolution failed.
    Space(SpaceError),
    /// Subgrid storage configuration is invalid.
    Arena(ArenaError),
    /// The global grid is too wide for 12-bit result coordinates.
    CoordinateOverflow {
        /// Cells per global side.
        extent: u32,
        /// Largest representable extent.
        max: u32,
    },
    /// A boundary temperature does not fit the 8-bit result byte.
    InvalidTemperature {
        /// Which temperature (`"hot"` or `"cold"`).
        name: &'static str,
        /// The configured value.
        value: Fixed,
    },
    /// The in-process transport needs room for at least one message per
    /// channel.
    ZeroCapacity,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonSquareMesh { log_nodes } => {
                write!(f, "log_nodes {log_nodes} is odd; the mesh must be square")
            }
            Self::Space(e) => write!(f, "space: {e}"),
            Self::Arena(e) => write!(f, "arena: {e}"),
            Self::CoordinateOverflow { extent, max } => {
                write!(f, "global extent {extent} exceeds {max} cells per side")
            }
            Self::InvalidTemperature { name, value } => {
                write!(f, "{name} temperature {value} does not fit in 0..256")
            }
            Self::ZeroCapacity => write!(f, "channel capacity must be at least 1"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Space(e) => Some(e),
            Self::Arena(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SpaceError> for ConfigError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}

impl From<ArenaError> for ConfigError {
    fn from(e: ArenaError) -> Self {
        Self::Arena(e)
    }
}

// ── MeshConfig ─────────────────────────────────────────────────────

/// Complete configuration for a heat diffusion run.
///
/// The global grid is `side × L` cells per side, where
/// `side = 2^(log_nodes / 2)` nodes and `L = 2^log_words_per_msg - 1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MeshConfig {
    /// log2 of the number of nodes. Must be even. Default: 6 (8×8 nodes).
    pub log_nodes: u32,
    /// log2 of the boundary message length in words. Default: 4 (L = 15).
    pub log_words_per_msg: u32,
    /// Number of simulation steps. Default: 1000.
    pub steps: u64,
    /// Temperature of the global north and west edges. Default: 255.
    pub hot: Fixed,
    /// Temperature of the global south and east edges. Default: 40.
    pub cold: Fixed,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            log_nodes: 6,
            log_words_per_msg: ArenaConfig::DEFAULT_LOG_WORDS_PER_MSG,
            steps: 1000,
            hot: Fixed::from_int(255),
            cold: Fixed::from_int(40),
        }
    }
}

impl MeshConfig {
    /// A config with the given shape and step count and default edge
    /// temperatures.
    pub fn new(log_nodes: u32, log_words_per_msg: u32, steps: u64) -> Self {
        Self {
            log_nodes,
            log_words_per_msg,
            steps,
            ..Self::default()
        }
    }

    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Square mesh.
        if self.log_nodes % 2 != 0 {
            return Err(ConfigError::NonSquareMesh {
                log_nodes: self.log_nodes,
            });
        }
        // 2. Identities fit the topology.
        let topology = MeshTopology::new(self.log_nodes / 2)?;
        // 3. Edge fits one message.
        let arena = self.arena_config();
        arena.validate()?;
        // 4. Result coordinates are 12 bits wide.
        let extent = topology.side_len() as u64 * arena.edge_len() as u64;
        if extent > MAX_GLOBAL_EXTENT as u64 {
            return Err(ConfigError::CoordinateOverflow {
                extent: extent.min(u32::MAX as u64) as u32,
                max: MAX_GLOBAL_EXTENT,
            });
        }
        // 5. Result temperatures are 8 bits wide. Averaging never leaves
        //    the range spanned by the boundary values.
        for (name, value) in [("hot", self.hot), ("cold", self.cold)] {
            if value.integer_part() > u8::MAX as u16 {
                return Err(ConfigError::InvalidTemperature { name, value });
            }
        }
        Ok(())
    }

    /// The node mesh.
    pub fn topology(&self) -> Result<MeshTopology, ConfigError> {
        Ok(MeshTopology::new(self.log_nodes / 2)?)
    }

    /// Storage configuration for each node.
    pub fn arena_config(&self) -> ArenaConfig {
        ArenaConfig::new(self.log_words_per_msg)
    }

    /// Subgrid edge length L.
    pub fn edge_len(&self) -> usize {
        self.arena_config().edge_len()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> u32 {
        1 << self.log_nodes
    }

    /// Cells per side of the global grid.
    pub fn global_extent(&self) -> u32 {
        (1u32 << (self.log_nodes / 2)) * self.edge_len() as u32
    }

    /// Boundary conditions for the four global edges.
    pub fn fixed_edges(&self) -> FixedEdges {
        FixedEdges::new(self.hot, self.cold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let c = MeshConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.node_count(), 64);
        assert_eq!(c.edge_len(), 15);
        assert_eq!(c.global_extent(), 120);
    }

    #[test]
    fn odd_log_nodes_is_rejected() {
        let c = MeshConfig::new(3, 2, 1);
        assert_eq!(
            c.validate(),
            Err(ConfigError::NonSquareMesh { log_nodes: 3 })
        );
    }

    #[test]
    fn oversized_topology_is_rejected() {
        let c = MeshConfig::new(32, 1, 1);
        assert!(matches!(c.validate(), Err(ConfigError::Space(_))));
    }

    #[test]
    fn invalid_message_length_is_rejected() {
        let c = MeshConfig::new(2, 0, 1);
        assert!(matches!(c.validate(), Err(ConfigError::Arena(_))));
    }

    #[test]
    fn wide_grid_overflows_result_coordinates() {
        // 128 nodes per side × 63 cells = 8064 > 4096.
        let c = MeshConfig::new(14, 6, 1);
        assert_eq!(
            c.validate(),
            Err(ConfigError::CoordinateOverflow {
                extent: 8064,
                max: 4096
            })
        );
        // 64 × 63 = 4032 fits.
        assert!(MeshConfig::new(12, 6, 1).validate().is_ok());
    }

    #[test]
    fn hot_above_byte_range_is_rejected() {
        let c = MeshConfig {
            hot: Fixed::from_int(256),
            ..MeshConfig::new(2, 2, 1)
        };
        assert!(matches!(
            c.validate(),
            Err(ConfigError::InvalidTemperature { name: "hot", .. })
        ));
    }

    #[test]
    fn config_error_chains_source() {
        let e = ConfigError::from(ArenaError::InvalidConfig {
            reason: "x".into(),
        });
        assert!(e.source().is_some());
        assert_eq!(e.to_string(), "arena: invalid arena config: x");
    }
}
