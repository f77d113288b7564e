//! Single-threaded mesh driver.
//!
//! All nodes share one thread and a [`LocalMesh`]. Each round polls
//! every unfinished node once, in an order shuffled by a seeded RNG, so
//! different seeds exercise different interleavings of the same run.

use heatmesh_core::NodeId;
use heatmesh_propagators::{AverageStencil, Stencil};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use crate::config::{ConfigError, MeshConfig};
use crate::emit::MeshOutput;
use crate::error::MeshError;
use crate::local::LocalMesh;
use crate::node::{HeatNode, NodePoll};

/// Progress made by one [`CooperativeMesh::round`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundOutcome {
    /// Some node sent, received, or completed a step.
    pub progressed: bool,
    /// Every node has finished.
    pub finished: bool,
}

/// Every node of a mesh, polled cooperatively.
///
/// # Examples
///
/// ```
/// use heatmesh_engine::{CooperativeMesh, MeshConfig};
///
/// let config = MeshConfig::new(2, 2, 10);
/// let out = CooperativeMesh::new(&config, 42).unwrap().run().unwrap();
/// assert_eq!(out.words.len(), 4 * 9);
/// ```
pub struct CooperativeMesh<S: Stencil = AverageStencil> {
    nodes: Vec<HeatNode<S>>,
    transport: LocalMesh,
    rng: ChaCha8Rng,
    order: Vec<usize>,
    rounds: u64,
}

impl CooperativeMesh<AverageStencil> {
    /// Averaging nodes over channels of
    /// [`LocalMesh::DEFAULT_CAPACITY`].
    pub fn new(config: &MeshConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_capacity(config, seed, LocalMesh::DEFAULT_CAPACITY)
    }

    /// Averaging nodes over channels of `capacity` messages.
    pub fn with_capacity(
        config: &MeshConfig,
        seed: u64,
        capacity: usize,
    ) -> Result<Self, ConfigError> {
        Self::with_stencils(config, seed, capacity, |_| AverageStencil)
    }
}

impl<S: Stencil> CooperativeMesh<S> {
    /// Nodes whose stencils come from `make`.
    pub fn with_stencils(
        config: &MeshConfig,
        seed: u64,
        capacity: usize,
        mut make: impl FnMut(NodeId) -> S,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let nodes = (0..config.node_count())
            .map(NodeId)
            .map(|id| HeatNode::with_stencil(config, id, make(id)))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_nodes(config, nodes, seed, capacity)
    }

    /// Drive prebuilt nodes, one per identity of `config`'s mesh, in
    /// identity order.
    pub fn from_nodes(
        config: &MeshConfig,
        nodes: Vec<HeatNode<S>>,
        seed: u64,
        capacity: usize,
    ) -> Result<Self, ConfigError> {
        let topology = config.topology()?;
        // The RNG for receive order is derived so that it differs from
        // the schedule RNG for the same seed.
        let transport = LocalMesh::new(&topology, capacity, seed ^ 0x9e37_79b9_7f4a_7c15)?;
        let order = (0..nodes.len()).collect();
        Ok(Self {
            nodes,
            transport,
            rng: ChaCha8Rng::seed_from_u64(seed),
            order,
            rounds: 0,
        })
    }

    /// Poll every unfinished node once, in shuffled order.
    pub fn round(&mut self) -> Result<RoundOutcome, MeshError> {
        self.order.shuffle(&mut self.rng);
        self.rounds += 1;
        let mut progressed = false;
        let mut finished = true;
        for i in 0..self.order.len() {
            let node = &mut self.nodes[self.order[i]];
            if node.is_finished() {
                continue;
            }
            let id = node.id();
            let mut port = self.transport.port(id);
            match node
                .poll(&mut port)
                .map_err(|source| MeshError::Node { id, source })?
            {
                NodePoll::Progress => {
                    progressed = true;
                    finished = false;
                }
                NodePoll::Finished => progressed = true,
                NodePoll::Blocked(_) => finished = false,
            }
        }
        Ok(RoundOutcome {
            progressed,
            finished,
        })
    }

    /// Run rounds until every node finishes, then collect results in
    /// identity order.
    ///
    /// A round in which every unfinished node is blocked can never be
    /// followed by one that makes progress, and is reported as
    /// [`MeshError::Deadlock`].
    pub fn run(&mut self) -> Result<MeshOutput, MeshError> {
        loop {
            let outcome = self.round()?;
            if self.nodes.iter().all(|n| n.is_finished()) {
                break;
            }
            if !outcome.progressed {
                let blocked: Vec<_> = self
                    .nodes
                    .iter()
                    .filter(|n| !n.is_finished())
                    .map(|n| n.id())
                    .collect();
                warn!(blocked = blocked.len(), rounds = self.rounds, "mesh deadlocked");
                return Err(MeshError::Deadlock { blocked });
            }
        }
        debug!(nodes = self.nodes.len(), rounds = self.rounds, "mesh finished");
        Ok(self.collect())
    }

    /// Result words and metrics for the current state of every node.
    pub fn collect(&self) -> MeshOutput {
        let mut out = MeshOutput::default();
        for node in &self.nodes {
            node.emit(&mut out.words);
            out.metrics.push((node.id(), node.metrics().clone()));
        }
        out
    }

    /// The nodes, in identity order.
    pub fn nodes(&self) -> &[HeatNode<S>] {
        &self.nodes
    }

    /// The in-process transport.
    pub fn transport(&self) -> &LocalMesh {
        &self.transport
    }

    /// Rounds run so far.
    pub fn rounds(&self) -> u64 {
        self.rounds
    }
}
