//! Crossbeam-channel transport for one-thread-per-node meshes.

use crossbeam_channel::{bounded, Receiver, Select, Sender, TryRecvError};
use heatmesh_core::{BoundaryBuffer, HostSink, Interest, NodeId, Transport, TransportError};
use heatmesh_space::MeshTopology;
use smallvec::SmallVec;

/// Inbox capacity per node: two in-flight messages per possible
/// neighbour.
pub const INBOX_CAPACITY: usize = 2 * 4;

/// One node's end of a channel mesh.
///
/// Each node owns a bounded inbox shared by its neighbours and a sender
/// into each neighbour's inbox. Messages on one inbox interleave across
/// senders in arrival order; the order from any single sender is kept.
pub struct ChannelTransport {
    id: NodeId,
    inbox: Receiver<BoundaryBuffer>,
    peers: SmallVec<[(NodeId, Sender<BoundaryBuffer>); 4]>,
    shutdown: Receiver<()>,
}

/// Wakes every blocked [`ChannelTransport`] of a mesh when dropped or
/// triggered.
pub struct Shutdown {
    _signal: Sender<()>,
}

impl Shutdown {
    /// Abort the mesh: every current and future `wait` returns
    /// [`TransportError::Shutdown`].
    pub fn trigger(self) {}
}

/// Build connected transports for every node of `topology`, in identity
/// order.
pub fn channel_mesh(topology: &MeshTopology) -> (Vec<ChannelTransport>, Shutdown) {
    let (signal, shutdown) = bounded(0);
    let (senders, inboxes): (Vec<_>, Vec<_>) = (0..topology.node_count())
        .map(|_| bounded(INBOX_CAPACITY))
        .unzip();
    let transports = topology
        .nodes()
        .zip(inboxes)
        .map(|(node, inbox)| ChannelTransport {
            id: node.id(),
            inbox,
            peers: node
                .directions()
                .iter()
                .filter_map(|&d| node.neighbour(d))
                .map(|n| (n, senders[n.0 as usize].clone()))
                .collect(),
            shutdown: shutdown.clone(),
        })
        .collect();
    (transports, Shutdown { _signal: signal })
}

impl ChannelTransport {
    /// The node this transport belongs to.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Number of directly connected neighbours.
    pub fn peer_count(&self) -> usize {
        self.peers.len()
    }

    fn peer(&self, dest: NodeId) -> Option<&Sender<BoundaryBuffer>> {
        self.peers.iter().find(|(id, _)| *id == dest).map(|(_, s)| s)
    }

    fn is_shut_down(&self) -> bool {
        matches!(self.shutdown.try_recv(), Err(TryRecvError::Disconnected))
    }
}

impl Transport for ChannelTransport {
    fn can_send(&self, dest: NodeId) -> bool {
        self.peer(dest).is_some_and(|s| !s.is_full())
    }

    fn can_recv(&self) -> bool {
        !self.inbox.is_empty()
    }

    fn send(&mut self, dest: NodeId, msg: &BoundaryBuffer) -> Result<(), TransportError> {
        let sender = self
            .peer(dest)
            .ok_or(TransportError::UnknownPeer { peer: dest })?;
        // Another neighbour may have filled the inbox since `can_send`;
        // the blocking send then waits for the receiver to drain it.
        sender
            .send(msg.clone())
            .map_err(|_| TransportError::Disconnected { peer: Some(dest) })
    }

    fn recv(&mut self) -> Result<BoundaryBuffer, TransportError> {
        self.inbox.try_recv().map_err(|e| match e {
            TryRecvError::Empty => TransportError::WouldBlock,
            TryRecvError::Disconnected => TransportError::Disconnected { peer: None },
        })
    }

    fn wait(&mut self, interest: Interest) -> Result<(), TransportError> {
        if self.is_shut_down() {
            return Err(TransportError::Shutdown);
        }
        let mut sel = Select::new();
        let mut registered = 0;
        if let Some(sender) = interest.send_to.and_then(|dest| self.peer(dest)) {
            sel.send(sender);
            registered += 1;
        }
        if interest.recv {
            sel.recv(&self.inbox);
            registered += 1;
        }
        if registered == 0 {
            return Err(TransportError::WouldBlock);
        }
        sel.recv(&self.shutdown);
        let _ = sel.ready();
        if self.is_shut_down() {
            return Err(TransportError::Shutdown);
        }
        Ok(())
    }
}

/// [`HostSink`] that forwards result words to a collector channel.
pub struct ChannelSink {
    tx: Sender<u32>,
}

impl ChannelSink {
    /// Forward into `tx`.
    pub fn new(tx: Sender<u32>) -> Self {
        Self { tx }
    }
}

impl HostSink for ChannelSink {
    fn put(&mut self, word: u32) {
        // Best-effort: if the collector is gone nobody wants the result.
        let _ = self.tx.send(word);
    }
}
