//! In-process transport over bounded per-channel FIFOs.
//!
//! Every directed link `src → dest` is its own queue, so order is
//! preserved per channel. Which non-empty channel a node receives from
//! next is chosen by a seeded RNG, modelling a network that reorders
//! freely across channels.

use std::collections::VecDeque;

use heatmesh_core::{BoundaryBuffer, Direction, Interest, NodeId, Transport, TransportError};
use heatmesh_space::{MeshTopology, NodeTopology};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::ConfigError;

/// Every node's inbound channels, indexed by node then by the direction
/// the sender lies in.
pub struct LocalMesh {
    nodes: Vec<NodeTopology>,
    inboxes: Vec<[VecDeque<BoundaryBuffer>; 4]>,
    capacity: usize,
    rng: ChaCha8Rng,
    delivered: u64,
}

impl LocalMesh {
    /// Default per-channel capacity. At most two messages per channel
    /// are ever in flight.
    pub const DEFAULT_CAPACITY: usize = 2;

    /// Channels for every link of `topology`, each holding up to
    /// `capacity` messages.
    pub fn new(topology: &MeshTopology, capacity: usize, seed: u64) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        let nodes: Vec<_> = topology.nodes().collect();
        let inboxes = nodes
            .iter()
            .map(|_| std::array::from_fn(|_| VecDeque::with_capacity(capacity)))
            .collect();
        Ok(Self {
            nodes,
            inboxes,
            capacity,
            rng: ChaCha8Rng::seed_from_u64(seed),
            delivered: 0,
        })
    }

    /// The transport as seen by node `id`.
    pub fn port(&mut self, id: NodeId) -> LocalPort<'_> {
        LocalPort { mesh: self, id }
    }

    /// Per-channel capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Messages queued for `dest` from the neighbour on side `from`.
    pub fn queued(&self, dest: NodeId, from: Direction) -> usize {
        self.inboxes
            .get(dest.0 as usize)
            .map_or(0, |inbox| inbox[from.index()].len())
    }

    /// Messages queued anywhere.
    pub fn in_flight(&self) -> usize {
        self.inboxes
            .iter()
            .flat_map(|inbox| inbox.iter())
            .map(VecDeque::len)
            .sum()
    }

    /// Messages delivered to a receiver so far.
    pub fn delivered(&self) -> u64 {
        self.delivered
    }

    /// The channel `src → dest`: `dest`'s inbox slot for the side `src`
    /// lies on.
    fn channel(&self, src: NodeId, dest: NodeId) -> Option<(usize, usize)> {
        let node = self.nodes.get(dest.0 as usize)?;
        Direction::ALL
            .into_iter()
            .find(|&d| node.neighbour(d) == Some(src))
            .map(|d| (dest.0 as usize, d.index()))
    }
}

/// One node's handle on a [`LocalMesh`].
pub struct LocalPort<'m> {
    mesh: &'m mut LocalMesh,
    id: NodeId,
}

impl LocalPort<'_> {
    fn inbox(&self) -> Option<&[VecDeque<BoundaryBuffer>; 4]> {
        self.mesh.inboxes.get(self.id.0 as usize)
    }
}

impl Transport for LocalPort<'_> {
    fn can_send(&self, dest: NodeId) -> bool {
        self.mesh
            .channel(self.id, dest)
            .is_some_and(|(n, d)| self.mesh.inboxes[n][d].len() < self.mesh.capacity)
    }

    fn can_recv(&self) -> bool {
        self.inbox()
            .is_some_and(|inbox| inbox.iter().any(|q| !q.is_empty()))
    }

    fn send(&mut self, dest: NodeId, msg: &BoundaryBuffer) -> Result<(), TransportError> {
        let (n, d) = self
            .mesh
            .channel(self.id, dest)
            .ok_or(TransportError::UnknownPeer { peer: dest })?;
        let queue = &mut self.mesh.inboxes[n][d];
        if queue.len() >= self.mesh.capacity {
            return Err(TransportError::WouldBlock);
        }
        queue.push_back(msg.clone());
        Ok(())
    }

    fn recv(&mut self) -> Result<BoundaryBuffer, TransportError> {
        let mesh = &mut *self.mesh;
        let inbox = mesh
            .inboxes
            .get_mut(self.id.0 as usize)
            .ok_or(TransportError::Disconnected { peer: None })?;
        let ready = inbox.iter().filter(|q| !q.is_empty()).count();
        if ready == 0 {
            return Err(TransportError::WouldBlock);
        }
        let pick = mesh.rng.random_range(0..ready);
        let queue = inbox
            .iter_mut()
            .filter(|q| !q.is_empty())
            .nth(pick)
            .ok_or(TransportError::WouldBlock)?;
        let msg = queue.pop_front().ok_or(TransportError::WouldBlock)?;
        mesh.delivered += 1;
        Ok(msg)
    }

    /// Nothing else runs while a node waits on a single thread, so an
    /// unmet interest can never become met.
    fn wait(&mut self, interest: Interest) -> Result<(), TransportError> {
        let send_ready = interest.send_to.is_some_and(|dest| self.can_send(dest));
        let recv_ready = interest.recv && self.can_recv();
        if send_ready || recv_ready {
            Ok(())
        } else {
            Err(TransportError::WouldBlock)
        }
    }
}
