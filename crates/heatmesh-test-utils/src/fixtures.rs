//! Reusable stencil and message fixtures.
//!
//! - [`ConstStencil`] writes one constant into every cell and edge.
//! - [`edge_message`] builds a tagged boundary message.
//! - [`reference_diffusion`] solves the whole grid on one thread, for
//!   comparison with a distributed run.

use heatmesh_arena::StepGuard;
use heatmesh_core::{BoundaryBuffer, Direction, EdgeTag, Fixed, Phase};
use heatmesh_propagators::Stencil;

/// Writes a constant into the next subgrid and all four outgoing edges.
///
/// Useful for checking that edges land at the right neighbour: each
/// node can carry a distinct constant.
pub struct ConstStencil {
    pub value: Fixed,
}

impl ConstStencil {
    pub fn new(value: Fixed) -> Self {
        Self { value }
    }
}

impl Stencil for ConstStencil {
    fn name(&self) -> &str {
        "const"
    }

    fn apply(&self, mut guard: StepGuard<'_>) {
        guard.next.fill(self.value);
        for buf in guard.outgoing.iter_mut() {
            buf.fill(self.value);
        }
    }
}

/// A message as the neighbour on side `from` would send it: tagged with
/// `from` (the receiver's direction) and `phase`, every sample `value`.
pub fn edge_message(
    from: Direction,
    phase: Phase,
    edge_len: usize,
    value: u16,
) -> BoundaryBuffer {
    let mut buf = BoundaryBuffer::new(edge_len);
    buf.fill(Fixed::from_int(value));
    buf.set_tag(EdgeTag {
        direction: from,
        phase,
    });
    buf
}

/// Jacobi diffusion over one `extent × extent` grid, row-major.
///
/// The grid starts at zero, with `hot` held beyond the north and west
/// edges and `cold` beyond the south and east edges. A mesh of nodes
/// that each own an L×L tile of the same grid must produce exactly these
/// values after the same number of steps.
pub fn reference_diffusion(extent: usize, steps: u64, hot: Fixed, cold: Fixed) -> Vec<Fixed> {
    let mut cur = vec![Fixed::ZERO; extent * extent];
    let mut next = cur.clone();
    let last = extent.saturating_sub(1);
    for _ in 0..steps {
        for r in 0..extent {
            for c in 0..extent {
                let at = |r: usize, c: usize| cur[r * extent + c];
                let up = if r == 0 { hot } else { at(r - 1, c) };
                let down = if r == last { cold } else { at(r + 1, c) };
                let left = if c == 0 { hot } else { at(r, c - 1) };
                let right = if c == last { cold } else { at(r, c + 1) };
                next[r * extent + c] = Fixed::average4(up, down, left, right);
            }
        }
        std::mem::swap(&mut cur, &mut next);
    }
    cur
}
