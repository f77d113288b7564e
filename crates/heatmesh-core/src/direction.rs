//! The four mesh directions.

use std::fmt;

/// A cardinal direction on the node mesh.
///
/// The discriminants are the wire encoding of the direction field in a
/// boundary message tag, and the declaration order is the canonical
/// send order used by the exchange protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Direction {
    /// Towards row 0.
    North = 0,
    /// Towards the last row.
    South = 1,
    /// Towards the last column.
    East = 2,
    /// Towards column 0.
    West = 3,
}

impl Direction {
    /// All directions in canonical order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// The opposite direction.
    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Index into per-direction arrays, `0..4`.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Decode a wire direction field. Returns `None` for values above 3.
    pub const fn from_wire(v: u32) -> Option<Self> {
        match v {
            0 => Some(Direction::North),
            1 => Some(Direction::South),
            2 => Some(Direction::East),
            3 => Some(Direction::West),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_an_involution() {
        for d in Direction::ALL {
            assert_ne!(d, d.opposite());
            assert_eq!(d, d.opposite().opposite());
        }
    }

    #[test]
    fn wire_encoding_matches_index() {
        for d in Direction::ALL {
            assert_eq!(Direction::from_wire(d.index() as u32), Some(d));
        }
        assert_eq!(Direction::from_wire(4), None);
    }
}
