//! Result words and their collection.

use heatmesh_arena::LocalState;
use heatmesh_core::{Fixed, HostSink, NodeId};
use heatmesh_space::NodeTopology;

use crate::metrics::NodeMetrics;

/// Width of each coordinate field in a result word.
pub const COORD_BITS: u32 = 12;

/// Largest global grid side that [`ResultWord`] can address.
pub const MAX_GLOBAL_EXTENT: u32 = 1 << COORD_BITS;

const COORD_MASK: u32 = MAX_GLOBAL_EXTENT - 1;

/// One cell of the final grid as delivered to the host.
///
/// ```text
///  31        20 19         8 7      0
/// ┌────────────┬────────────┬────────┐
/// │ global row │ global col │  temp  │
/// └────────────┴────────────┴────────┘
/// ```
///
/// `temp` is the integer part of the cell's temperature truncated to
/// eight bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResultWord(pub u32);

impl ResultWord {
    /// Pack a cell.
    pub fn new(row: u32, col: u32, temperature: Fixed) -> Self {
        let coords = ((row & COORD_MASK) << COORD_BITS) | (col & COORD_MASK);
        let temp = temperature.integer_part() as u32 & 0xff;
        Self((coords << 8) | temp)
    }

    /// Global row.
    pub fn row(self) -> u32 {
        self.0 >> (COORD_BITS + 8)
    }

    /// Global column.
    pub fn col(self) -> u32 {
        (self.0 >> 8) & COORD_MASK
    }

    /// Truncated temperature byte.
    pub fn temperature(self) -> u8 {
        (self.0 & 0xff) as u8
    }
}

impl From<u32> for ResultWord {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Emit every cell of `state`'s current subgrid to `sink`, row-major.
///
/// Cell `(i, j)` of the node at mesh position `(x, y)` lands at global
/// row `y * L + i` and global column `x * L + j`. Returns the number of
/// words emitted (always L²).
pub fn emit_subgrid<H: HostSink + ?Sized>(
    node: &NodeTopology,
    state: &LocalState,
    sink: &mut H,
) -> usize {
    let len = state.edge_len();
    let (x, y) = node.coords();
    let row0 = y * len as u32;
    let col0 = x * len as u32;
    for i in 0..len {
        for j in 0..len {
            let cell = state.read_current(i, j);
            sink.put(ResultWord::new(row0 + i as u32, col0 + j as u32, cell).0);
        }
    }
    len * len
}

/// Everything a finished mesh run hands back.
#[derive(Clone, Debug, Default)]
pub struct MeshOutput {
    /// Result words in arrival order.
    pub words: Vec<u32>,
    /// Per-node metrics, sorted by node ID.
    pub metrics: Vec<(NodeId, NodeMetrics)>,
}

impl MeshOutput {
    /// The result words, decoded.
    pub fn results(&self) -> impl Iterator<Item = ResultWord> + '_ {
        self.words.iter().copied().map(ResultWord)
    }

    /// Result words sorted by position, independent of arrival order.
    pub fn sorted_words(&self) -> Vec<u32> {
        let mut words = self.words.clone();
        words.sort_unstable();
        words
    }

    /// Reassemble the global grid of temperature bytes, row-major.
    ///
    /// Cells no word addressed stay zero.
    pub fn grid(&self, extent: u32) -> Vec<Vec<u8>> {
        let side = extent as usize;
        let mut grid = vec![vec![0u8; side]; side];
        for r in self.results() {
            if let Some(cell) = grid
                .get_mut(r.row() as usize)
                .and_then(|row| row.get_mut(r.col() as usize))
            {
                *cell = r.temperature();
            }
        }
        grid
    }
}
