//! Arena configuration parameters.

use heatmesh_core::MAX_LOG_WORDS_PER_MSG;

use crate::error::ArenaError;

/// Configuration for a node's local storage.
///
/// The subgrid edge length is derived from the transport's message
/// length: one message carries a whole edge plus the tag word, so
/// `edge_len = 2^log_words_per_msg - 1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// log2 of the boundary message length in words.
    ///
    /// Default: 4 (16-word messages, 15×15 subgrids).
    /// Must be in `1..=MAX_LOG_WORDS_PER_MSG`.
    pub log_words_per_msg: u32,
}

impl ArenaConfig {
    /// Default message length exponent.
    pub const DEFAULT_LOG_WORDS_PER_MSG: u32 = 4;

    /// Create a config for messages of `2^log_words_per_msg` words.
    pub fn new(log_words_per_msg: u32) -> Self {
        Self { log_words_per_msg }
    }

    /// Check that the message length yields a non-empty subgrid whose
    /// edge fits a boundary message.
    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.log_words_per_msg == 0 || self.log_words_per_msg > MAX_LOG_WORDS_PER_MSG {
            return Err(ArenaError::InvalidConfig {
                reason: format!(
                    "log_words_per_msg must be in 1..={MAX_LOG_WORDS_PER_MSG} (got {})",
                    self.log_words_per_msg
                ),
            });
        }
        Ok(())
    }

    /// Words per boundary message, tag included.
    pub fn message_words(&self) -> usize {
        1 << self.log_words_per_msg
    }

    /// Subgrid edge length L.
    pub fn edge_len(&self) -> usize {
        self.message_words() - 1
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LOG_WORDS_PER_MSG)
    }
}
