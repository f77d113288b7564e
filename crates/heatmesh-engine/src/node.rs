//! One simulated processing element.

use std::time::Instant;

use heatmesh_arena::LocalState;
use heatmesh_core::{ExchangeError, HostSink, Interest, NodeId, StepId, Transport};
use heatmesh_propagators::{AverageStencil, Stencil};
use heatmesh_space::NodeTopology;
use tracing::{debug, trace};

use crate::config::{ConfigError, MeshConfig};
use crate::emit::emit_subgrid;
use crate::exchange::{EdgeExchange, ExchangePoll};
use crate::metrics::NodeMetrics;

/// Outcome of one [`HeatNode::poll`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodePoll {
    /// The node did some work; poll again.
    Progress,
    /// The exchange is stalled until `Interest` is met.
    Blocked(Interest),
    /// Every step is complete.
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Update,
    Exchange,
    Finished,
}

/// A node running the fixed-step heat simulation on its own subgrid.
///
/// Each step is stencil, then edge exchange, then buffer swap. The node
/// can be driven cooperatively with [`poll`](HeatNode::poll), which
/// never blocks, or on its own thread with [`run`](HeatNode::run).
///
/// # Examples
///
/// ```
/// use heatmesh_core::NodeId;
/// use heatmesh_engine::{HeatNode, LocalMesh, MeshConfig};
///
/// // A 1×1 mesh never talks to anyone.
/// let config = MeshConfig::new(0, 2, 10);
/// let mut node = HeatNode::new(&config, NodeId(0)).unwrap();
/// let mut mesh = LocalMesh::new(&config.topology().unwrap(), 1, 0).unwrap();
/// node.run(&mut mesh.port(NodeId(0))).unwrap();
/// assert!(node.is_finished());
/// assert_eq!(node.metrics().messages_sent, 0);
/// ```
pub struct HeatNode<S: Stencil = AverageStencil> {
    topology: NodeTopology,
    state: LocalState,
    exchange: EdgeExchange,
    stencil: S,
    step: StepId,
    steps: u64,
    stage: Stage,
    metrics: NodeMetrics,
}

impl HeatNode<AverageStencil> {
    /// Node `id` with the averaging stencil.
    pub fn new(config: &MeshConfig, id: NodeId) -> Result<Self, ConfigError> {
        Self::with_stencil(config, id, AverageStencil)
    }
}

impl<S: Stencil> HeatNode<S> {
    /// Node `id` with a custom stencil.
    ///
    /// Validates `config`, resolves the node's neighbours, allocates its
    /// local state and burns in the fixed boundary temperatures.
    pub fn with_stencil(config: &MeshConfig, id: NodeId, stencil: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let topology = config.topology()?.resolve(id)?;
        let mut state = LocalState::new(&config.arena_config())?;
        config.fixed_edges().apply(&topology, &mut state);
        Ok(Self {
            topology,
            state,
            exchange: EdgeExchange::new(),
            stencil,
            step: StepId(0),
            steps: config.steps,
            stage: Stage::Update,
            metrics: NodeMetrics::default(),
        })
    }

    /// Advance by at most one stencil pass and one exchange poll.
    pub fn poll<T: Transport + ?Sized>(
        &mut self,
        transport: &mut T,
    ) -> Result<NodePoll, ExchangeError> {
        if self.stage == Stage::Finished {
            return Ok(NodePoll::Finished);
        }

        if self.stage == Stage::Update {
            if self.step.0 >= self.steps {
                self.stage = Stage::Finished;
                debug!(node = %self.id(), steps = self.steps, "node finished");
                return Ok(NodePoll::Finished);
            }
            let start = Instant::now();
            self.stencil.apply(self.state.begin_step());
            self.metrics.stencil_us += start.elapsed().as_micros() as u64;
            self.exchange.begin(self.step, &mut self.state);
            self.stage = Stage::Exchange;
        }

        match self
            .exchange
            .poll(&self.topology, &mut self.state, transport)?
        {
            ExchangePoll::Complete(report) => {
                self.state.swap();
                self.metrics.record(&report);
                trace!(node = %self.id(), step = %self.step, "step complete");
                self.step = self.step.next();
                self.stage = Stage::Update;
                Ok(NodePoll::Progress)
            }
            ExchangePoll::Progress => Ok(NodePoll::Progress),
            ExchangePoll::Blocked(interest) => {
                self.metrics.blocked_polls += 1;
                Ok(NodePoll::Blocked(interest))
            }
        }
    }

    /// Run every remaining step, suspending in `transport.wait` whenever
    /// the exchange stalls.
    pub fn run<T: Transport + ?Sized>(&mut self, transport: &mut T) -> Result<(), ExchangeError> {
        loop {
            match self.poll(transport)? {
                NodePoll::Finished => return Ok(()),
                NodePoll::Progress => {}
                NodePoll::Blocked(interest) => transport.wait(interest)?,
            }
        }
    }

    /// Emit the current subgrid as result words. Returns the word count.
    pub fn emit<H: HostSink + ?Sized>(&self, sink: &mut H) -> usize {
        emit_subgrid(&self.topology, &self.state, sink)
    }

    /// This node's identity.
    pub fn id(&self) -> NodeId {
        self.topology.id()
    }

    /// Position and neighbours.
    pub fn topology(&self) -> &NodeTopology {
        &self.topology
    }

    /// Subgrid and boundary buffers.
    pub fn state(&self) -> &LocalState {
        &self.state
    }

    /// Exchange state, including pending early arrivals.
    pub fn exchange(&self) -> &EdgeExchange {
        &self.exchange
    }

    /// The stencil in use.
    pub fn stencil(&self) -> &S {
        &self.stencil
    }

    /// Steps completed so far.
    pub fn steps_completed(&self) -> u64 {
        self.step.0
    }

    /// Configured step count.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Whether every step has completed.
    pub fn is_finished(&self) -> bool {
        self.stage == Stage::Finished
    }

    /// Counters accumulated so far.
    pub fn metrics(&self) -> &NodeMetrics {
        &self.metrics
    }
}

impl<S: Stencil> std::fmt::Debug for HeatNode<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeatNode")
            .field("id", &self.id())
            .field("stencil", &self.stencil.name())
            .field("step", &self.step)
            .field("steps", &self.steps)
            .field("stage", &self.stage)
            .finish_non_exhaustive()
    }
}
