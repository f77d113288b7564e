//! Arena-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur while constructing node storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The configuration does not describe a usable subgrid.
    InvalidConfig {
        /// Description of which constraint failed.
        reason: String,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { reason } => write!(f, "invalid arena config: {reason}"),
        }
    }
}

impl Error for ArenaError {}
