//! Four-neighbour averaging stencil.

use heatmesh_arena::StepGuard;
use heatmesh_core::{Direction, Fixed};

use crate::stencil::Stencil;

const N: usize = Direction::North.index();
const S: usize = Direction::South.index();
const E: usize = Direction::East.index();
const W: usize = Direction::West.index();

/// Jacobi-style heat stencil: each cell becomes the floor average of its
/// four neighbours.
///
/// ```text
/// next[y][x] = (left + right + above + below) >> 2
/// ```
///
/// Neighbours outside the subgrid come from the incoming edge on that
/// side at the cell's offset along the edge. The new values on each side
/// are copied into the matching outgoing edge in the same pass.
///
/// The cell's own previous value does not enter the result: the cooling
/// form `cur - (cur - surroundings)` collapses to `surroundings`.
#[derive(Clone, Copy, Debug, Default)]
pub struct AverageStencil;

impl AverageStencil {
    /// Create the stencil.
    pub fn new() -> Self {
        Self
    }
}

impl Stencil for AverageStencil {
    fn name(&self) -> &str {
        "average"
    }

    fn apply(&self, mut guard: StepGuard<'_>) {
        let len = guard.edge_len();
        let last = len - 1;
        let cur = guard.current;
        let inc = guard.incoming;

        for y in 0..len {
            for x in 0..len {
                let l = if x == 0 { inc[W].sample(y) } else { cur.get(y, x - 1) };
                let r = if x == last { inc[E].sample(y) } else { cur.get(y, x + 1) };
                let a = if y == 0 { inc[N].sample(x) } else { cur.get(y - 1, x) };
                let b = if y == last { inc[S].sample(x) } else { cur.get(y + 1, x) };

                let v = Fixed::average4(a, b, l, r);
                guard.next.set(y, x, v);

                if y == 0 {
                    guard.outgoing[N].set_sample(x, v);
                }
                if y == last {
                    guard.outgoing[S].set_sample(x, v);
                }
                if x == 0 {
                    guard.outgoing[W].set_sample(y, v);
                }
                if x == last {
                    guard.outgoing[E].set_sample(y, v);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heatmesh_arena::{ArenaConfig, LocalState};
    use proptest::prelude::*;

    fn state(log_words: u32) -> LocalState {
        LocalState::new(&ArenaConfig::new(log_words)).unwrap()
    }

    fn fill_incoming(s: &mut LocalState, d: Direction, v: u16) {
        s.edges_mut().incoming_mut(d).fill(Fixed::from_int(v));
    }

    #[test]
    fn zero_state_stays_zero() {
        let mut s = state(2);
        AverageStencil.apply(s.begin_step());
        s.swap();
        assert!(s.current().cells().iter().all(|&c| c == Fixed::ZERO));
    }

    #[test]
    fn hot_north_west_corner_after_one_step() {
        let mut s = state(2); // 3×3
        fill_incoming(&mut s, Direction::North, 255);
        fill_incoming(&mut s, Direction::West, 255);
        AverageStencil.apply(s.begin_step());
        s.swap();

        let half = Fixed::from_parts(63, 0xc000); // 255 / 4
        let corner = Fixed::from_parts(127, 0x8000); // 510 / 4
        assert_eq!(s.read_current(0, 0), corner);
        assert_eq!(s.read_current(0, 1), half);
        assert_eq!(s.read_current(1, 0), half);
        assert_eq!(s.read_current(1, 1), Fixed::ZERO);
        assert_eq!(s.read_current(2, 2), Fixed::ZERO);
    }

    #[test]
    fn outgoing_edges_mirror_subgrid_sides() {
        let mut s = state(2);
        for (i, d) in Direction::ALL.into_iter().enumerate() {
            fill_incoming(&mut s, d, 10 * (i as u16 + 1));
        }
        AverageStencil.apply(s.begin_step());
        s.swap();

        let g = s.current();
        let edges = s.edges();
        for k in 0..3 {
            assert_eq!(edges.outgoing(Direction::North).sample(k), g.get(0, k));
            assert_eq!(edges.outgoing(Direction::South).sample(k), g.get(2, k));
            assert_eq!(edges.outgoing(Direction::West).sample(k), g.get(k, 0));
            assert_eq!(edges.outgoing(Direction::East).sample(k), g.get(k, 2));
        }
    }

    #[test]
    fn single_cell_subgrid_averages_all_four_edges() {
        let mut s = state(1); // 1×1
        fill_incoming(&mut s, Direction::North, 255);
        fill_incoming(&mut s, Direction::West, 255);
        fill_incoming(&mut s, Direction::South, 40);
        fill_incoming(&mut s, Direction::East, 40);
        AverageStencil.apply(s.begin_step());
        s.swap();
        // (255 + 255 + 40 + 40) / 4 = 147.5
        assert_eq!(s.read_current(0, 0), Fixed::from_parts(147, 0x8000));
    }

    proptest! {
        #[test]
        fn interior_cell_is_floor_average(a: u32, b: u32, l: u32, r: u32) {
            // Centre of a 3×3 grid with its four neighbours set directly.
            let mut s = state(2);
            let g = s.current_mut();
            g.set(0, 1, Fixed::from_raw(a));
            g.set(2, 1, Fixed::from_raw(b));
            g.set(1, 0, Fixed::from_raw(l));
            g.set(1, 2, Fixed::from_raw(r));
            AverageStencil.apply(s.begin_step());
            s.swap();
            let expect = (a as u64 + b as u64 + l as u64 + r as u64) >> 2;
            prop_assert_eq!(s.read_current(1, 1).raw() as u64, expect);
        }
    }
}
