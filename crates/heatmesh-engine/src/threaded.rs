//! One OS thread per node.

use std::panic::{self, AssertUnwindSafe};
use std::thread;

use crossbeam_channel::unbounded;
use heatmesh_core::{ExchangeError, NodeId};
use tracing::{debug, warn};

use crate::channel::{channel_mesh, ChannelSink};
use crate::config::{ConfigError, MeshConfig};
use crate::emit::MeshOutput;
use crate::error::MeshError;
use crate::metrics::NodeMetrics;
use crate::node::HeatNode;

enum Failure {
    Exchange(ExchangeError),
    Panicked,
}

/// Runs every node of a mesh on its own thread over crossbeam channels.
///
/// Threads are named `heat-node-{id}`. When a node fails, the remaining
/// nodes are woken with [`TransportError::Shutdown`] and the first
/// failure is returned.
///
/// [`TransportError::Shutdown`]: heatmesh_core::TransportError::Shutdown
#[derive(Clone, Debug)]
pub struct ThreadedMesh {
    config: MeshConfig,
}

impl ThreadedMesh {
    /// Validate `config` and prepare a run.
    pub fn new(config: MeshConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use.
    pub fn config(&self) -> &MeshConfig {
        &self.config
    }

    /// Spawn every node, wait for all of them, and gather their results.
    ///
    /// Result words arrive in completion order; metrics are sorted by
    /// node ID.
    pub fn run(&self) -> Result<MeshOutput, MeshError> {
        let topology = self.config.topology()?;
        let (transports, shutdown) = channel_mesh(&topology);
        let (host_tx, host_rx) = unbounded();
        let (done_tx, done_rx) = unbounded::<(NodeId, Result<NodeMetrics, Failure>)>();

        let mut handles = Vec::with_capacity(transports.len());
        let mut spawn_error = None;
        for mut transport in transports {
            let id = transport.id();
            let mut node = HeatNode::new(&self.config, id)?;
            let mut sink = ChannelSink::new(host_tx.clone());
            let done = done_tx.clone();
            let spawned = thread::Builder::new()
                .name(format!("heat-node-{id}"))
                .spawn(move || {
                    let outcome = panic::catch_unwind(AssertUnwindSafe(
                        || -> Result<NodeMetrics, ExchangeError> {
                            node.run(&mut transport)?;
                            node.emit(&mut sink);
                            Ok(node.metrics().clone())
                        },
                    ));
                    let outcome = match outcome {
                        Ok(r) => r.map_err(Failure::Exchange),
                        Err(_) => Err(Failure::Panicked),
                    };
                    // Report before the channels close, so the first
                    // failure the collector sees is the root cause.
                    let _ = done.send((id, outcome));
                    drop(transport);
                });
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    spawn_error = Some(MeshError::ThreadSpawnFailed {
                        reason: e.to_string(),
                    });
                    break;
                }
            }
        }
        drop(host_tx);
        drop(done_tx);
        debug!(nodes = handles.len(), "node threads spawned");

        let mut shutdown = Some(shutdown);
        let mut failure = spawn_error;
        if failure.is_some() {
            if let Some(s) = shutdown.take() {
                s.trigger();
            }
        }

        let mut metrics = Vec::with_capacity(handles.len());
        for (id, outcome) in done_rx.iter() {
            match outcome {
                Ok(m) => metrics.push((id, m)),
                Err(f) => {
                    if failure.is_none() {
                        let err = match f {
                            Failure::Exchange(source) => MeshError::Node { id, source },
                            Failure::Panicked => MeshError::NodePanicked { id },
                        };
                        warn!(error = %err, "node failed; shutting down mesh");
                        failure = Some(err);
                    }
                    if let Some(s) = shutdown.take() {
                        s.trigger();
                    }
                }
            }
        }

        for handle in handles {
            let _ = handle.join();
        }
        debug!(finished = metrics.len(), "node threads joined");

        if let Some(err) = failure {
            return Err(err);
        }
        metrics.sort_by_key(|(id, _)| *id);
        Ok(MeshOutput {
            words: host_rx.iter().collect(),
            metrics,
        })
    }
}
