//! Double-buffered subgrid pair.
//!
//! [`SubgridPair`] holds two subgrids that alternate between the
//! "current" (read) and "next" (write) roles. On [`SubgridPair::swap`]
//! the next buffer becomes current and the old current buffer becomes
//! the next write target. Swapping flips a flag; no cell is copied.

use crate::subgrid::Subgrid;

/// Two subgrids with alternating roles.
///
/// # Buffer layout
///
/// ```text
/// buffer_a: Subgrid  ←─── current (even swaps) / next (odd swaps)
/// buffer_b: Subgrid  ←─── next (even swaps) / current (odd swaps)
/// ```
#[derive(Clone, Debug)]
pub struct SubgridPair {
    buffer_a: Subgrid,
    buffer_b: Subgrid,
    /// Which buffer is current (false = A current, true = B current).
    b_is_current: bool,
    /// Number of swaps since construction.
    swaps: u64,
}

impl SubgridPair {
    /// Two zeroed `len × len` subgrids, A current.
    pub fn new(len: usize) -> Self {
        Self {
            buffer_a: Subgrid::new(len),
            buffer_b: Subgrid::new(len),
            b_is_current: false,
            swaps: 0,
        }
    }

    /// The buffer holding the latest completed step.
    pub fn current(&self) -> &Subgrid {
        if self.b_is_current {
            &self.buffer_b
        } else {
            &self.buffer_a
        }
    }

    /// Mutable access to the current buffer, used for initial conditions.
    pub fn current_mut(&mut self) -> &mut Subgrid {
        if self.b_is_current {
            &mut self.buffer_b
        } else {
            &mut self.buffer_a
        }
    }

    /// The write target for the step in progress.
    pub fn next_mut(&mut self) -> &mut Subgrid {
        if self.b_is_current {
            &mut self.buffer_a
        } else {
            &mut self.buffer_b
        }
    }

    /// Borrow current (read) and next (write) together.
    pub fn split(&mut self) -> (&Subgrid, &mut Subgrid) {
        if self.b_is_current {
            (&self.buffer_b, &mut self.buffer_a)
        } else {
            (&self.buffer_a, &mut self.buffer_b)
        }
    }

    /// Exchange roles: next becomes current.
    pub fn swap(&mut self) {
        self.b_is_current = !self.b_is_current;
        self.swaps += 1;
    }

    /// Number of swaps performed.
    pub fn swaps(&self) -> u64 {
        self.swaps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heatmesh_core::Fixed;

    #[test]
    fn swap_promotes_next_to_current() {
        let mut pair = SubgridPair::new(2);
        pair.next_mut().set(0, 1, Fixed::from_int(9));
        assert_eq!(pair.current().get(0, 1), Fixed::ZERO);
        pair.swap();
        assert_eq!(pair.current().get(0, 1), Fixed::from_int(9));
        assert_eq!(pair.swaps(), 1);
    }

    #[test]
    fn double_swap_restores_roles() {
        let mut pair = SubgridPair::new(2);
        pair.current_mut().fill(Fixed::from_int(1));
        pair.next_mut().fill(Fixed::from_int(2));
        pair.swap();
        pair.swap();
        assert_eq!(pair.current().get(1, 1), Fixed::from_int(1));
    }

    #[test]
    fn split_hands_out_distinct_buffers() {
        let mut pair = SubgridPair::new(2);
        pair.current_mut().fill(Fixed::from_int(3));
        let (cur, next) = pair.split();
        next.set(0, 0, cur.get(0, 0));
        pair.swap();
        assert_eq!(pair.current().get(0, 0), Fixed::from_int(3));
        assert_eq!(pair.current().get(1, 1), Fixed::ZERO);
    }
}
