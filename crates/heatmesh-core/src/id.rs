//! Strongly-typed identifiers and the step [`Phase`].

use std::fmt;

/// Identifies a node on the mesh.
///
/// The low `log_len` bits are the node's column and the remaining bits
/// its row (see `heatmesh_space::MeshTopology`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Monotonically increasing simulation step counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepId(pub u64);

impl StepId {
    /// Phase of this step (its least significant bit).
    pub const fn phase(self) -> Phase {
        if self.0 & 1 == 0 {
            Phase::Even
        } else {
            Phase::Odd
        }
    }

    /// The following step.
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for StepId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Step parity carried in every boundary message.
///
/// One bit is enough because directly connected nodes are never more
/// than one step apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Even step.
    Even,
    /// Odd step.
    Odd,
}

impl Phase {
    /// Wire bit: 0 for even, 1 for odd.
    pub const fn bit(self) -> u32 {
        match self {
            Phase::Even => 0,
            Phase::Odd => 1,
        }
    }

    /// Decode the low bit of a tag word.
    pub const fn from_bit(v: u32) -> Self {
        if v & 1 == 0 {
            Phase::Even
        } else {
            Phase::Odd
        }
    }

    /// The other phase.
    pub const fn flip(self) -> Self {
        match self {
            Phase::Even => Phase::Odd,
            Phase::Odd => Phase::Even,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_alternates_with_step() {
        assert_eq!(StepId(0).phase(), Phase::Even);
        assert_eq!(StepId(1).phase(), Phase::Odd);
        assert_eq!(StepId(998).phase(), Phase::Even);
        assert_eq!(StepId(7).next().phase(), Phase::Even);
    }

    #[test]
    fn phase_bit_round_trip() {
        assert_eq!(Phase::from_bit(Phase::Odd.bit()), Phase::Odd);
        assert_eq!(Phase::from_bit(Phase::Even.bit()), Phase::Even);
        assert_eq!(Phase::Even.flip(), Phase::Odd);
    }
}
