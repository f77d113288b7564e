//! Boundary message wire format.
//!
//! A boundary message is one fixed-size transport message of
//! `2^log_words_per_msg` words:
//!
//! ```text
//! word 0       : (direction << 1) | phase
//! words 1..=L  : edge samples, 16.16 fixed point
//! ```
//!
//! `direction` is the receiver's direction pointing back at the sender
//! (the opposite of the direction the sender sent in), so the receiver
//! can file the samples without knowing who sent them.

use crate::direction::Direction;
use crate::error::ProtocolError;
use crate::fixed::Fixed;
use crate::id::Phase;

/// Largest supported `log_words_per_msg`.
pub const MAX_LOG_WORDS_PER_MSG: u32 = 6;

/// Capacity of a boundary message in words (tag included).
pub const MAX_MESSAGE_WORDS: usize = 1 << MAX_LOG_WORDS_PER_MSG;

/// Decoded tag word of a boundary message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeTag {
    /// Direction of the sender as seen by the receiver.
    pub direction: Direction,
    /// Phase of the step the samples belong to.
    pub phase: Phase,
}

impl EdgeTag {
    /// Encode as `(direction << 1) | phase`.
    pub const fn encode(self) -> u32 {
        ((self.direction as u32) << 1) | self.phase.bit()
    }

    /// Decode a tag word.
    ///
    /// Returns [`ProtocolError::MalformedTag`] if the direction field is
    /// outside `0..4`.
    pub fn decode(word: u32) -> Result<Self, ProtocolError> {
        let direction =
            Direction::from_wire(word >> 1).ok_or(ProtocolError::MalformedTag { word })?;
        Ok(Self {
            direction,
            phase: Phase::from_bit(word),
        })
    }
}

/// One edge of a subgrid plus its tag word, stored inline.
///
/// The buffer never allocates: it is a fixed [`MAX_MESSAGE_WORDS`] array
/// of which the first `edge_len + 1` words are meaningful. This lets
/// transports move messages by value without per-step heap traffic.
#[derive(Clone, PartialEq, Eq)]
pub struct BoundaryBuffer {
    words: [u32; MAX_MESSAGE_WORDS],
    edge_len: u8,
}

impl BoundaryBuffer {
    /// A zeroed buffer for an edge of `edge_len` samples.
    ///
    /// # Panics
    ///
    /// Panics if `edge_len` is zero or `edge_len + 1` exceeds
    /// [`MAX_MESSAGE_WORDS`]. Callers size buffers from a validated
    /// `ArenaConfig`.
    pub fn new(edge_len: usize) -> Self {
        assert!(
            edge_len >= 1 && edge_len < MAX_MESSAGE_WORDS,
            "edge length {edge_len} does not fit a boundary message"
        );
        Self {
            words: [0; MAX_MESSAGE_WORDS],
            edge_len: edge_len as u8,
        }
    }

    /// Rebuild a buffer from raw message words (tag first).
    ///
    /// Returns [`ProtocolError::LengthMismatch`] if `words` cannot hold at
    /// least one sample or exceeds the message capacity.
    pub fn from_words(words: &[u32]) -> Result<Self, ProtocolError> {
        if words.len() < 2 || words.len() > MAX_MESSAGE_WORDS {
            return Err(ProtocolError::LengthMismatch {
                expected: MAX_MESSAGE_WORDS - 1,
                actual: words.len().saturating_sub(1),
            });
        }
        let mut buf = Self::new(words.len() - 1);
        buf.words[..words.len()].copy_from_slice(words);
        Ok(buf)
    }

    /// Number of samples on this edge.
    pub fn edge_len(&self) -> usize {
        self.edge_len as usize
    }

    /// Raw tag word.
    pub fn tag_word(&self) -> u32 {
        self.words[0]
    }

    /// Decode the tag word.
    pub fn tag(&self) -> Result<EdgeTag, ProtocolError> {
        EdgeTag::decode(self.words[0])
    }

    /// Stamp the tag word.
    pub fn set_tag(&mut self, tag: EdgeTag) {
        self.words[0] = tag.encode();
    }

    /// Sample at `offset` along the edge (`0..edge_len`).
    #[inline]
    pub fn sample(&self, offset: usize) -> Fixed {
        debug_assert!(offset < self.edge_len());
        Fixed::from_raw(self.words[offset + 1])
    }

    /// Overwrite the sample at `offset`.
    #[inline]
    pub fn set_sample(&mut self, offset: usize, value: Fixed) {
        debug_assert!(offset < self.edge_len());
        self.words[offset + 1] = value.raw();
    }

    /// Set every sample to `value`, leaving the tag untouched.
    pub fn fill(&mut self, value: Fixed) {
        let n = self.edge_len();
        self.words[1..=n].fill(value.raw());
    }

    /// Iterate the samples in edge order.
    pub fn samples(&self) -> impl Iterator<Item = Fixed> + '_ {
        self.words[1..=self.edge_len()]
            .iter()
            .map(|&w| Fixed::from_raw(w))
    }

    /// The meaningful message words, tag first.
    pub fn as_words(&self) -> &[u32] {
        &self.words[..=self.edge_len()]
    }
}

impl std::fmt::Debug for BoundaryBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundaryBuffer")
            .field("tag", &self.tag())
            .field("samples", &self.samples().collect::<Vec<_>>())
            .finish()
    }
}
