//! Test utilities and mock types for heatmesh development.
//!
//! Provides a [`ScriptedTransport`] that replays queued messages and
//! records sends, plus stencil and message fixtures in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::collections::VecDeque;

use heatmesh_core::{BoundaryBuffer, Interest, NodeId, Transport, TransportError};

/// Mock implementation of [`Transport`].
///
/// Messages queued with [`deliver`](ScriptedTransport::deliver) are
/// returned by `recv` in order. Every send is recorded and can be
/// inspected with [`sent`](ScriptedTransport::sent). Sends are ready by
/// default; [`hold_sends`](ScriptedTransport::hold_sends) makes
/// `can_send` report `false` until released.
///
/// Nothing changes while a node waits, so `wait` returns
/// [`TransportError::WouldBlock`] when the interest is not already met.
pub struct ScriptedTransport {
    inbox: VecDeque<BoundaryBuffer>,
    sent: Vec<(NodeId, BoundaryBuffer)>,
    send_ready: bool,
    waits: usize,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self {
            inbox: VecDeque::new(),
            sent: Vec::new(),
            send_ready: true,
            waits: 0,
        }
    }

    /// Queue a message for the node to receive.
    pub fn deliver(&mut self, msg: BoundaryBuffer) {
        self.inbox.push_back(msg);
    }

    /// Make every destination report not ready.
    pub fn hold_sends(&mut self) {
        self.send_ready = false;
    }

    /// Undo [`hold_sends`](ScriptedTransport::hold_sends).
    pub fn release_sends(&mut self) {
        self.send_ready = true;
    }

    /// Every `(destination, message)` sent so far.
    pub fn sent(&self) -> &[(NodeId, BoundaryBuffer)] {
        &self.sent
    }

    /// Drain the recorded sends.
    pub fn take_sent(&mut self) -> Vec<(NodeId, BoundaryBuffer)> {
        std::mem::take(&mut self.sent)
    }

    /// Messages still queued for receipt.
    pub fn inbox_len(&self) -> usize {
        self.inbox.len()
    }

    /// Number of `wait` calls.
    pub fn waits(&self) -> usize {
        self.waits
    }
}

impl Default for ScriptedTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for ScriptedTransport {
    fn can_send(&self, _dest: NodeId) -> bool {
        self.send_ready
    }

    fn can_recv(&self) -> bool {
        !self.inbox.is_empty()
    }

    fn send(&mut self, dest: NodeId, msg: &BoundaryBuffer) -> Result<(), TransportError> {
        if !self.send_ready {
            return Err(TransportError::WouldBlock);
        }
        self.sent.push((dest, msg.clone()));
        Ok(())
    }

    fn recv(&mut self) -> Result<BoundaryBuffer, TransportError> {
        self.inbox.pop_front().ok_or(TransportError::WouldBlock)
    }

    fn wait(&mut self, interest: Interest) -> Result<(), TransportError> {
        self.waits += 1;
        let send_ready = interest.send_to.is_some() && self.send_ready;
        let recv_ready = interest.recv && self.can_recv();
        if send_ready || recv_ready {
            Ok(())
        } else {
            Err(TransportError::WouldBlock)
        }
    }
}
