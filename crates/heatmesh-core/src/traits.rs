//! Abstractions over the node's external collaborators.
//!
//! A node sees the outside world through two traits: a [`Transport`]
//! that moves boundary messages between directly connected nodes, and a
//! [`HostSink`] that collects result words.

use crate::error::TransportError;
use crate::id::NodeId;
use crate::message::BoundaryBuffer;

/// Readiness conditions a blocked node is waiting for.
///
/// The exchange protocol waits until *either* condition holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interest {
    /// Wake when a send to this node would not block.
    pub send_to: Option<NodeId>,
    /// Wake when a message is waiting in the inbox.
    pub recv: bool,
}

impl Interest {
    /// `true` if the interest names no condition at all.
    pub fn is_empty(&self) -> bool {
        self.send_to.is_none() && !self.recv
    }
}

/// Point-to-point message transport for one node.
///
/// # Contract
///
/// - Delivery is reliable and preserves order per directed channel.
///   No ordering is assumed across channels.
/// - `can_send` / `can_recv` are non-destructive readiness tests.
/// - `send` is only called after `can_send` returned `true` for the same
///   destination, and `recv` only after `can_recv` returned `true`.
/// - `wait` blocks until at least one condition in `interest` holds. It is
///   the node's only suspension point.
pub trait Transport {
    /// Whether a message to `dest` can be sent without blocking.
    fn can_send(&self, dest: NodeId) -> bool;

    /// Whether a message is waiting to be received.
    fn can_recv(&self) -> bool;

    /// Send one boundary message to a directly connected node.
    fn send(&mut self, dest: NodeId, msg: &BoundaryBuffer) -> Result<(), TransportError>;

    /// Take the next arrived message.
    fn recv(&mut self) -> Result<BoundaryBuffer, TransportError>;

    /// Suspend until send or receive readiness matches `interest`.
    fn wait(&mut self, interest: Interest) -> Result<(), TransportError>;
}

/// Destination for result words emitted after the final step.
pub trait HostSink {
    /// Deliver one result word to the external collector.
    fn put(&mut self, word: u32);
}

impl HostSink for Vec<u32> {
    fn put(&mut self, word: u32) {
        self.push(word);
    }
}
