//! Node coordinates and neighbour resolution.

use crate::error::SpaceError;
use heatmesh_core::{Direction, NodeId};
use smallvec::SmallVec;

/// A square mesh of `2^log_len × 2^log_len` nodes.
///
/// A node identity splits into coordinates at bit `log_len`: the low
/// bits are the column `x`, the high bits the row `y`. Row 0 is the
/// global north edge and column 0 the global west edge.
///
/// # Examples
///
/// ```
/// use heatmesh_core::{Direction, NodeId};
/// use heatmesh_space::MeshTopology;
///
/// let mesh = MeshTopology::new(1).unwrap(); // 2×2
/// let node = mesh.resolve(NodeId(0)).unwrap();
/// assert_eq!(node.coords(), (0, 0));
/// assert_eq!(node.directions(), &[Direction::South, Direction::East]);
/// assert_eq!(node.neighbour(Direction::East), Some(NodeId(1)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeshTopology {
    log_len: u32,
}

impl MeshTopology {
    /// Largest supported log2 side length: identities are `u32`, so the
    /// node count `2^(2·log_len)` must stay below `2^31`.
    pub const MAX_LOG_LEN: u32 = 15;

    /// Create a mesh with side length `2^log_len`.
    ///
    /// Returns `Err(SpaceError::MeshTooLarge)` above [`Self::MAX_LOG_LEN`].
    pub fn new(log_len: u32) -> Result<Self, SpaceError> {
        if log_len > Self::MAX_LOG_LEN {
            return Err(SpaceError::MeshTooLarge {
                log_len,
                max: Self::MAX_LOG_LEN,
            });
        }
        Ok(Self { log_len })
    }

    /// log2 of the side length.
    pub fn log_len(&self) -> u32 {
        self.log_len
    }

    /// Nodes per side.
    pub fn side_len(&self) -> u32 {
        1 << self.log_len
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> u32 {
        1 << (2 * self.log_len)
    }

    /// Resolve a node's coordinates and neighbours.
    ///
    /// Returns `Err(SpaceError::NodeOutOfRange)` if `id` is not on the mesh.
    pub fn resolve(&self, id: NodeId) -> Result<NodeTopology, SpaceError> {
        let node_count = self.node_count();
        if id.0 >= node_count {
            return Err(SpaceError::NodeOutOfRange { id, node_count });
        }
        let len = self.side_len();
        let x = id.0 & (len - 1);
        let y = id.0 >> self.log_len;
        let at = |x: u32, y: u32| NodeId((y << self.log_len) | x);

        let mut neighbours = [None; 4];
        neighbours[Direction::North.index()] = (y > 0).then(|| at(x, y - 1));
        neighbours[Direction::South.index()] = (y < len - 1).then(|| at(x, y + 1));
        neighbours[Direction::East.index()] = (x < len - 1).then(|| at(x + 1, y));
        neighbours[Direction::West.index()] = (x > 0).then(|| at(x - 1, y));

        let directions = Direction::ALL
            .into_iter()
            .filter(|d| neighbours[d.index()].is_some())
            .collect();

        Ok(NodeTopology {
            id,
            x,
            y,
            side_len: len,
            neighbours,
            directions,
        })
    }

    /// Every node of the mesh in identity order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeTopology> + '_ {
        (0..self.node_count()).filter_map(move |i| self.resolve(NodeId(i)).ok())
    }
}

/// One node's position and neighbour set. Immutable after resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeTopology {
    id: NodeId,
    x: u32,
    y: u32,
    side_len: u32,
    neighbours: [Option<NodeId>; 4],
    directions: SmallVec<[Direction; 4]>,
}

impl NodeTopology {
    /// This node's identity.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// `(x, y)`: column and row on the mesh.
    pub fn coords(&self) -> (u32, u32) {
        (self.x, self.y)
    }

    /// Nodes per mesh side.
    pub fn side_len(&self) -> u32 {
        self.side_len
    }

    /// The neighbour in direction `d`, or `None` at the mesh extremity.
    pub fn neighbour(&self, d: Direction) -> Option<NodeId> {
        self.neighbours[d.index()]
    }

    /// Directions that have a neighbour, in canonical N, S, E, W order.
    ///
    /// This is the order in which the exchange protocol sends.
    pub fn directions(&self) -> &[Direction] {
        &self.directions
    }

    /// Number of neighbours (0 to 4).
    pub fn degree(&self) -> usize {
        self.directions.len()
    }

    /// Whether this node sits on the global mesh edge facing `d`.
    pub fn is_mesh_edge(&self, d: Direction) -> bool {
        self.neighbours[d.index()].is_none()
    }
}
