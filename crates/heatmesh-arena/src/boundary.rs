//! Per-direction boundary buffers.

use heatmesh_core::{BoundaryBuffer, Direction, Fixed};

/// The outgoing and incoming edge buffers of one node, indexed by
/// [`Direction`].
///
/// A buffer exists for every direction even where the node has no
/// neighbour: at a mesh extremity the incoming buffer holds the fixed
/// boundary temperature and the outgoing buffer is written but never
/// sent.
#[derive(Clone, Debug)]
pub struct BoundaryBank {
    outgoing: [BoundaryBuffer; 4],
    incoming: [BoundaryBuffer; 4],
}

impl BoundaryBank {
    /// Zeroed buffers for edges of `edge_len` samples.
    pub fn new(edge_len: usize) -> Self {
        Self {
            outgoing: std::array::from_fn(|_| BoundaryBuffer::new(edge_len)),
            incoming: std::array::from_fn(|_| BoundaryBuffer::new(edge_len)),
        }
    }

    /// The buffer to send towards `d`.
    pub fn outgoing(&self, d: Direction) -> &BoundaryBuffer {
        &self.outgoing[d.index()]
    }

    /// Mutable outgoing buffer, used to stamp the tag before sending.
    pub fn outgoing_mut(&mut self, d: Direction) -> &mut BoundaryBuffer {
        &mut self.outgoing[d.index()]
    }

    /// The edge values last received from (or fixed at) `d`.
    pub fn incoming(&self, d: Direction) -> &BoundaryBuffer {
        &self.incoming[d.index()]
    }

    /// Mutable incoming buffer, used to burn in fixed boundaries.
    pub fn incoming_mut(&mut self, d: Direction) -> &mut BoundaryBuffer {
        &mut self.incoming[d.index()]
    }

    /// Replace the incoming buffer for `d` with a received message.
    pub fn install_incoming(&mut self, d: Direction, buf: BoundaryBuffer) {
        self.incoming[d.index()] = buf;
    }

    /// Zero every incoming sample.
    pub fn clear_incoming(&mut self) {
        for buf in &mut self.incoming {
            buf.fill(Fixed::ZERO);
        }
    }

    /// Borrow both sides at once: incoming for reading, outgoing for writing.
    pub fn split(&mut self) -> (&[BoundaryBuffer; 4], &mut [BoundaryBuffer; 4]) {
        (&self.incoming, &mut self.outgoing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_replaces_incoming_only() {
        let mut bank = BoundaryBank::new(3);
        let mut msg = BoundaryBuffer::new(3);
        msg.fill(Fixed::from_int(5));
        bank.install_incoming(Direction::East, msg);
        assert_eq!(bank.incoming(Direction::East).sample(2), Fixed::from_int(5));
        assert_eq!(bank.incoming(Direction::West).sample(2), Fixed::ZERO);
        assert_eq!(bank.outgoing(Direction::East).sample(2), Fixed::ZERO);
    }

    #[test]
    fn clear_incoming_zeroes_samples() {
        let mut bank = BoundaryBank::new(2);
        bank.incoming_mut(Direction::North).fill(Fixed::from_int(255));
        bank.clear_incoming();
        assert!(bank
            .incoming(Direction::North)
            .samples()
            .all(|s| s == Fixed::ZERO));
    }
}
