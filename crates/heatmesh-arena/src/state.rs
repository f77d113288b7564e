//! A node's complete local state.

use heatmesh_core::{BoundaryBuffer, Direction, Fixed};

use crate::boundary::BoundaryBank;
use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::pingpong::SubgridPair;
use crate::subgrid::Subgrid;

/// Borrowed view of everything the stencil touches in one step.
///
/// Created by [`LocalState::begin_step()`]. Holds the only mutable
/// borrows of the next subgrid and the outgoing edges, so nothing else
/// can observe a half-written step.
#[must_use]
pub struct StepGuard<'a> {
    /// Values from the last completed step.
    pub current: &'a Subgrid,
    /// Write target for this step.
    pub next: &'a mut Subgrid,
    /// Outer rim samples, indexed by [`Direction::index`].
    pub incoming: &'a [BoundaryBuffer; 4],
    /// Edge samples to send, indexed by [`Direction::index`].
    pub outgoing: &'a mut [BoundaryBuffer; 4],
}

impl StepGuard<'_> {
    /// Edge length L.
    pub fn edge_len(&self) -> usize {
        self.current.len()
    }
}

/// Double-buffered subgrid plus boundary buffers for one node.
///
/// All storage is allocated in [`LocalState::new`]; stepping never
/// allocates.
#[derive(Clone, Debug)]
pub struct LocalState {
    grids: SubgridPair,
    edges: BoundaryBank,
    edge_len: usize,
}

impl LocalState {
    /// Allocate zeroed state for the configured subgrid size.
    ///
    /// Returns `Err(ArenaError::InvalidConfig)` if `config` fails validation.
    pub fn new(config: &ArenaConfig) -> Result<Self, ArenaError> {
        config.validate()?;
        let edge_len = config.edge_len();
        Ok(Self {
            grids: SubgridPair::new(edge_len),
            edges: BoundaryBank::new(edge_len),
            edge_len,
        })
    }

    /// Edge length L.
    pub fn edge_len(&self) -> usize {
        self.edge_len
    }

    /// Current value at `(row, col)`.
    pub fn read_current(&self, row: usize, col: usize) -> Fixed {
        self.grids.current().get(row, col)
    }

    /// Write the next-step value at `(row, col)`.
    pub fn write_next(&mut self, row: usize, col: usize, value: Fixed) {
        self.grids.next_mut().set(row, col, value);
    }

    /// Incoming boundary sample for `d` at `offset` along the edge.
    pub fn read_incoming(&self, d: Direction, offset: usize) -> Fixed {
        self.edges.incoming(d).sample(offset)
    }

    /// Write an outgoing boundary sample for `d`.
    pub fn write_outgoing(&mut self, d: Direction, offset: usize, value: Fixed) {
        self.edges.outgoing_mut(d).set_sample(offset, value);
    }

    /// The subgrid of the last completed step.
    pub fn current(&self) -> &Subgrid {
        self.grids.current()
    }

    /// Mutable current subgrid, for initial conditions only.
    pub fn current_mut(&mut self) -> &mut Subgrid {
        self.grids.current_mut()
    }

    /// The per-direction buffers.
    pub fn edges(&self) -> &BoundaryBank {
        &self.edges
    }

    /// Mutable per-direction buffers.
    pub fn edges_mut(&mut self) -> &mut BoundaryBank {
        &mut self.edges
    }

    /// Install a received message as the incoming edge for `d`.
    pub fn install_incoming(&mut self, d: Direction, buf: BoundaryBuffer) {
        self.edges.install_incoming(d, buf);
    }

    /// Borrow the pieces the stencil needs for one step.
    pub fn begin_step(&mut self) -> StepGuard<'_> {
        let (current, next) = self.grids.split();
        let (incoming, outgoing) = self.edges.split();
        StepGuard {
            current,
            next,
            incoming,
            outgoing,
        }
    }

    /// Finish a step: the next subgrid becomes current. O(1).
    pub fn swap(&mut self) {
        self.grids.swap();
    }

    /// Number of completed swaps.
    pub fn swaps(&self) -> u64 {
        self.grids.swaps()
    }
}
