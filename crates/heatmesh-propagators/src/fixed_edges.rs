//! Fixed boundary temperatures at the mesh extremities.

use heatmesh_arena::LocalState;
use heatmesh_core::{Direction, Fixed};
use heatmesh_space::NodeTopology;

/// Constant temperatures held along the four global edges.
///
/// The north and west edges are hot, the south and east edges cold.
/// Nodes on a mesh extremity never receive a message from that side, so
/// the burned-in value is what the stencil reads there for the whole run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedEdges {
    /// Temperature of the global north and west edges.
    pub hot: Fixed,
    /// Temperature of the global south and east edges.
    pub cold: Fixed,
}

impl FixedEdges {
    /// Create boundary conditions with the given edge temperatures.
    pub fn new(hot: Fixed, cold: Fixed) -> Self {
        Self { hot, cold }
    }

    /// Temperature held on the global edge facing `d`.
    pub fn temperature(&self, d: Direction) -> Fixed {
        match d {
            Direction::North | Direction::West => self.hot,
            Direction::South | Direction::East => self.cold,
        }
    }

    /// Zero all incoming edges of `state`, then fill the ones facing a
    /// mesh extremity with the fixed temperature.
    pub fn apply(&self, node: &NodeTopology, state: &mut LocalState) {
        let edges = state.edges_mut();
        edges.clear_incoming();
        for d in Direction::ALL {
            if node.is_mesh_edge(d) {
                edges.incoming_mut(d).fill(self.temperature(d));
            }
        }
    }
}

impl Default for FixedEdges {
    fn default() -> Self {
        Self::new(Fixed::from_int(255), Fixed::from_int(40))
    }
}
