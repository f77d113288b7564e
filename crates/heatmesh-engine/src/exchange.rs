//! Phase-tagged boundary exchange between neighbouring nodes.
//!
//! Every step, a node sends its four outgoing edges to the neighbours
//! that exist and receives one edge from each. Neighbours are not in
//! lockstep: a neighbour that has already finished step `t` may deliver
//! its step `t + 1` edge before this node has received everything for
//! step `t`. Each message carries the parity of the step it belongs to,
//! and a mismatched parity parks the message in a one-deep pending slot
//! for its direction until the next step begins.
//!
//! ```text
//!   begin(step)            drain pending slots into incoming
//!        │
//!        ▼
//!   ┌─ poll ──────────────────────────────────────────────┐
//!   │ send next edge (canonical order) if its dest ready  │
//!   │ recv one message if any:                            │
//!   │    phase == p  → install as incoming, count         │
//!   │    phase != p  → park in pending[dir]               │
//!   └──────────┬──────────────────────────┬───────────────┘
//!              │ sent == received == deg  │ nothing ready
//!              ▼                          ▼
//!          Complete                 Blocked(Interest)
//! ```

use heatmesh_arena::LocalState;
use heatmesh_core::{
    BoundaryBuffer, Direction, EdgeTag, ExchangeError, Interest, ProtocolError, StepId, Transport,
};
use heatmesh_space::NodeTopology;
use tracing::trace;

/// Counts from one completed exchange.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExchangeReport {
    /// The step exchanged.
    pub step: StepId,
    /// Edges sent.
    pub sent: u32,
    /// Current-phase edges received during this step.
    pub received: u32,
    /// Edges taken from pending slots at the start of the step.
    pub drained_early: u32,
    /// Next-phase edges parked during this step.
    pub buffered_early: u32,
}

/// Outcome of one [`EdgeExchange::poll`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExchangePoll {
    /// A send or receive happened; poll again.
    Progress,
    /// Nothing could be done. Resume once `Interest` is met.
    Blocked(Interest),
    /// All edges for this step are sent and received.
    Complete(ExchangeReport),
}

/// Per-node exchange state that survives across steps.
#[derive(Clone, Debug, Default)]
pub struct EdgeExchange {
    pending: [Option<BoundaryBuffer>; 4],
    received: [bool; 4],
    sent: usize,
    received_count: usize,
    step: StepId,
    report: ExchangeReport,
}

impl EdgeExchange {
    /// Empty state: no step in progress, no pending messages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start exchanging edges for `step`.
    ///
    /// Early arrivals parked during the previous step become this step's
    /// incoming edges and count as received.
    pub fn begin(&mut self, step: StepId, state: &mut LocalState) {
        self.step = step;
        self.sent = 0;
        self.received_count = 0;
        self.received = [false; 4];
        self.report = ExchangeReport {
            step,
            ..ExchangeReport::default()
        };
        for d in Direction::ALL {
            if let Some(buf) = self.pending[d.index()].take() {
                debug_assert_eq!(buf.tag().map(|t| t.phase).ok(), Some(step.phase()));
                state.install_incoming(d, buf);
                self.received[d.index()] = true;
                self.received_count += 1;
                self.report.drained_early += 1;
                trace!(%step, direction = %d, "drained early edge");
            }
        }
    }

    /// Make at most one send and one receive.
    ///
    /// Sends go out in the canonical order of `node.directions()`, each
    /// only when the transport reports its destination ready. A receive
    /// is attempted whenever the transport has a message, even after
    /// every current-phase edge has arrived, so that a neighbour already
    /// sending next-phase edges is never left waiting.
    pub fn poll<T: Transport + ?Sized>(
        &mut self,
        node: &NodeTopology,
        state: &mut LocalState,
        transport: &mut T,
    ) -> Result<ExchangePoll, ExchangeError> {
        let degree = node.degree();
        if self.is_done(degree) {
            return Ok(ExchangePoll::Complete(self.report));
        }

        let mut progressed = false;

        if self.sent < degree {
            let d = node.directions()[self.sent];
            if let Some(dest) = node.neighbour(d).filter(|&dest| transport.can_send(dest)) {
                let out = state.edges_mut().outgoing_mut(d);
                out.set_tag(EdgeTag {
                    direction: d.opposite(),
                    phase: self.step.phase(),
                });
                transport.send(dest, out)?;
                self.sent += 1;
                self.report.sent += 1;
                progressed = true;
                trace!(step = %self.step, direction = %d, %dest, "sent edge");
            }
        }

        if transport.can_recv() {
            let msg = transport.recv()?;
            self.accept(node, state, msg)?;
            progressed = true;
        }

        if self.is_done(degree) {
            Ok(ExchangePoll::Complete(self.report))
        } else if progressed {
            Ok(ExchangePoll::Progress)
        } else {
            Ok(ExchangePoll::Blocked(self.interest(node)))
        }
    }

    /// Exchange all edges for `step`, blocking in `transport.wait` when
    /// nothing is ready.
    pub fn run<T: Transport + ?Sized>(
        &mut self,
        step: StepId,
        node: &NodeTopology,
        state: &mut LocalState,
        transport: &mut T,
    ) -> Result<ExchangeReport, ExchangeError> {
        self.begin(step, state);
        loop {
            match self.poll(node, state, transport)? {
                ExchangePoll::Complete(report) => return Ok(report),
                ExchangePoll::Progress => {}
                ExchangePoll::Blocked(interest) => transport.wait(interest)?,
            }
        }
    }

    /// What the node still needs: the next send's destination and
    /// whether any current-phase edges are outstanding.
    pub fn interest(&self, node: &NodeTopology) -> Interest {
        let degree = node.degree();
        let send_to = if self.sent < degree {
            node.neighbour(node.directions()[self.sent])
        } else {
            None
        };
        Interest {
            send_to,
            recv: self.received_count < degree,
        }
    }

    /// The step being exchanged.
    pub fn step(&self) -> StepId {
        self.step
    }

    /// Edges sent so far this step.
    pub fn sent(&self) -> usize {
        self.sent
    }

    /// Current-phase edges consumed so far this step.
    pub fn received(&self) -> usize {
        self.received_count
    }

    /// Whether an early message is parked for `d`.
    pub fn has_pending(&self, d: Direction) -> bool {
        self.pending[d.index()].is_some()
    }

    /// Number of parked early messages.
    pub fn pending_count(&self) -> usize {
        self.pending.iter().filter(|p| p.is_some()).count()
    }

    fn is_done(&self, degree: usize) -> bool {
        self.sent == degree && self.received_count == degree
    }

    fn accept(
        &mut self,
        node: &NodeTopology,
        state: &mut LocalState,
        msg: BoundaryBuffer,
    ) -> Result<(), ProtocolError> {
        if msg.edge_len() != state.edge_len() {
            return Err(ProtocolError::LengthMismatch {
                expected: state.edge_len(),
                actual: msg.edge_len(),
            });
        }
        let tag = msg.tag()?;
        let d = tag.direction;
        if node.is_mesh_edge(d) {
            return Err(ProtocolError::UnexpectedEdge { direction: d });
        }
        let slot = d.index();

        if tag.phase == self.step.phase() {
            if self.received[slot] {
                return Err(ProtocolError::DuplicateEdge {
                    direction: d,
                    step: self.step,
                });
            }
            state.install_incoming(d, msg);
            self.received[slot] = true;
            self.received_count += 1;
            self.report.received += 1;
            trace!(step = %self.step, direction = %d, "received edge");
        } else {
            if self.pending[slot].is_some() {
                return Err(ProtocolError::SkewExceeded {
                    direction: d,
                    step: self.step,
                });
            }
            self.pending[slot] = Some(msg);
            self.report.buffered_early += 1;
            trace!(step = %self.step, direction = %d, "parked early edge");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heatmesh_arena::ArenaConfig;
    use heatmesh_core::{Fixed, NodeId, Phase, TransportError};
    use heatmesh_space::MeshTopology;
    use heatmesh_test_utils::fixtures::edge_message;
    use heatmesh_test_utils::ScriptedTransport;

    const L: usize = 3;

    /// Node 0 of a 2×2 mesh: neighbours south (2) and east (1).
    fn corner() -> (NodeTopology, LocalState) {
        let node = MeshTopology::new(1).unwrap().resolve(NodeId(0)).unwrap();
        let state = LocalState::new(&ArenaConfig::new(2)).unwrap();
        (node, state)
    }

    /// Node 5 of a 4×4 mesh: all four neighbours.
    fn interior() -> (NodeTopology, LocalState) {
        let node = MeshTopology::new(2).unwrap().resolve(NodeId(5)).unwrap();
        let state = LocalState::new(&ArenaConfig::new(2)).unwrap();
        (node, state)
    }

    fn poll_until_blocked_or_done(
        ex: &mut EdgeExchange,
        node: &NodeTopology,
        state: &mut LocalState,
        t: &mut ScriptedTransport,
    ) -> ExchangePoll {
        loop {
            match ex.poll(node, state, t).unwrap() {
                ExchangePoll::Progress => continue,
                other => return other,
            }
        }
    }

    #[test]
    fn sends_in_canonical_order_with_receiver_direction_tags() {
        let (node, mut state) = interior();
        let mut t = ScriptedTransport::new();
        let mut ex = EdgeExchange::new();
        ex.begin(StepId(1), &mut state);
        let r = poll_until_blocked_or_done(&mut ex, &node, &mut state, &mut t);
        assert!(matches!(r, ExchangePoll::Blocked(_)));

        let sent = t.sent();
        let dests: Vec<_> = sent.iter().map(|(d, _)| d.0).collect();
        // north (1), south (9), east (6), west (4)
        assert_eq!(dests, vec![1, 9, 6, 4]);
        let tags: Vec<_> = sent.iter().map(|(_, m)| m.tag().unwrap()).collect();
        assert_eq!(tags[0].direction, Direction::South);
        assert_eq!(tags[1].direction, Direction::North);
        assert_eq!(tags[2].direction, Direction::West);
        assert_eq!(tags[3].direction, Direction::East);
        assert!(tags.iter().all(|t| t.phase == Phase::Odd));
        assert_eq!(sent[0].1.tag_word(), (1 << 1) | 1);
    }

    #[test]
    fn completes_when_all_edges_sent_and_received() {
        let (node, mut state) = corner();
        let mut t = ScriptedTransport::new();
        t.deliver(edge_message(Direction::South, Phase::Even, L, 7));
        t.deliver(edge_message(Direction::East, Phase::Even, L, 9));

        let mut ex = EdgeExchange::new();
        let report = ex.run(StepId(0), &node, &mut state, &mut t).unwrap();
        assert_eq!(report.sent, 2);
        assert_eq!(report.received, 2);
        assert_eq!(report.buffered_early, 0);
        assert_eq!(state.read_incoming(Direction::South, 0), Fixed::from_int(7));
        assert_eq!(state.read_incoming(Direction::East, 2), Fixed::from_int(9));
        assert_eq!(t.waits(), 0);
    }

    #[test]
    fn blocked_interest_names_next_destination_and_recv() {
        let (node, mut state) = corner();
        let mut t = ScriptedTransport::new();
        t.hold_sends();
        let mut ex = EdgeExchange::new();
        ex.begin(StepId(0), &mut state);
        let r = ex.poll(&node, &mut state, &mut t).unwrap();
        assert_eq!(
            r,
            ExchangePoll::Blocked(Interest {
                send_to: Some(NodeId(2)),
                recv: true,
            })
        );
    }

    #[test]
    fn blocking_driver_surfaces_transport_stall() {
        let (node, mut state) = corner();
        let mut t = ScriptedTransport::new();
        let mut ex = EdgeExchange::new();
        assert_eq!(
            ex.run(StepId(0), &node, &mut state, &mut t),
            Err(ExchangeError::Transport(TransportError::WouldBlock))
        );
        assert_eq!(t.sent().len(), 2);
    }

    #[test]
    fn early_edge_is_parked_then_drained_next_step() {
        let (node, mut state) = corner();
        let mut t = ScriptedTransport::new();
        // The east neighbour finished step 0 and already sent its step-1
        // edge. Per-channel order still holds: step 0 precedes step 1.
        t.deliver(edge_message(Direction::East, Phase::Even, L, 1));
        t.deliver(edge_message(Direction::East, Phase::Odd, L, 2));
        t.deliver(edge_message(Direction::South, Phase::Even, L, 3));

        let mut ex = EdgeExchange::new();
        let r0 = ex.run(StepId(0), &node, &mut state, &mut t).unwrap();
        assert_eq!(r0.received, 2);
        assert_eq!(r0.buffered_early, 1);
        assert!(ex.has_pending(Direction::East));
        assert_eq!(ex.pending_count(), 1);
        assert_eq!(state.read_incoming(Direction::East, 0), Fixed::from_int(1));

        t.deliver(edge_message(Direction::South, Phase::Odd, L, 4));
        let r1 = ex.run(StepId(1), &node, &mut state, &mut t).unwrap();
        assert_eq!(r1.drained_early, 1);
        assert_eq!(r1.received, 1);
        assert_eq!(ex.pending_count(), 0);
        assert_eq!(state.read_incoming(Direction::East, 0), Fixed::from_int(2));
        assert_eq!(state.read_incoming(Direction::South, 0), Fixed::from_int(4));
    }

    #[test]
    fn receives_after_own_edges_are_complete() {
        // All current edges in, one send still held: a next-phase edge
        // must still be taken off the wire.
        let (node, mut state) = corner();
        let mut t = ScriptedTransport::new();
        t.hold_sends();
        t.deliver(edge_message(Direction::South, Phase::Even, L, 1));
        t.deliver(edge_message(Direction::East, Phase::Even, L, 1));
        t.deliver(edge_message(Direction::East, Phase::Odd, L, 2));

        let mut ex = EdgeExchange::new();
        ex.begin(StepId(0), &mut state);
        let r = poll_until_blocked_or_done(&mut ex, &node, &mut state, &mut t);
        assert_eq!(
            r,
            ExchangePoll::Blocked(Interest {
                send_to: Some(NodeId(2)),
                recv: false,
            })
        );
        assert!(ex.has_pending(Direction::East));
        assert_eq!(t.inbox_len(), 0);
    }

    #[test]
    fn second_early_edge_is_skew() {
        let (node, mut state) = corner();
        let mut t = ScriptedTransport::new();
        t.deliver(edge_message(Direction::East, Phase::Odd, L, 1));
        t.deliver(edge_message(Direction::East, Phase::Odd, L, 2));
        let mut ex = EdgeExchange::new();
        assert_eq!(
            ex.run(StepId(0), &node, &mut state, &mut t),
            Err(ExchangeError::Protocol(ProtocolError::SkewExceeded {
                direction: Direction::East,
                step: StepId(0),
            }))
        );
    }

    #[test]
    fn duplicate_current_edge_is_rejected() {
        let (node, mut state) = corner();
        let mut t = ScriptedTransport::new();
        t.deliver(edge_message(Direction::South, Phase::Even, L, 1));
        t.deliver(edge_message(Direction::South, Phase::Even, L, 1));
        let mut ex = EdgeExchange::new();
        assert!(matches!(
            ex.run(StepId(0), &node, &mut state, &mut t),
            Err(ExchangeError::Protocol(ProtocolError::DuplicateEdge {
                direction: Direction::South,
                ..
            }))
        ));
    }

    #[test]
    fn edge_from_outside_the_mesh_is_rejected() {
        let (node, mut state) = corner();
        let mut t = ScriptedTransport::new();
        t.deliver(edge_message(Direction::North, Phase::Even, L, 1));
        let mut ex = EdgeExchange::new();
        assert_eq!(
            ex.run(StepId(0), &node, &mut state, &mut t),
            Err(ExchangeError::Protocol(ProtocolError::UnexpectedEdge {
                direction: Direction::North,
            }))
        );
    }

    #[test]
    fn malformed_tag_is_rejected() {
        let (node, mut state) = corner();
        let mut t = ScriptedTransport::new();
        let mut words = [0u32; L + 1];
        words[0] = 4 << 1;
        t.deliver(BoundaryBuffer::from_words(&words).unwrap());
        let mut ex = EdgeExchange::new();
        assert_eq!(
            ex.run(StepId(0), &node, &mut state, &mut t),
            Err(ExchangeError::Protocol(ProtocolError::MalformedTag {
                word: 4 << 1,
            }))
        );
    }

    #[test]
    fn wrong_edge_length_is_rejected() {
        let (node, mut state) = corner();
        let mut t = ScriptedTransport::new();
        t.deliver(edge_message(Direction::South, Phase::Even, 7, 1));
        let mut ex = EdgeExchange::new();
        assert_eq!(
            ex.run(StepId(0), &node, &mut state, &mut t),
            Err(ExchangeError::Protocol(ProtocolError::LengthMismatch {
                expected: 3,
                actual: 7,
            }))
        );
    }

    #[test]
    fn isolated_node_completes_without_transport() {
        let node = MeshTopology::new(0).unwrap().resolve(NodeId(0)).unwrap();
        let mut state = LocalState::new(&ArenaConfig::new(2)).unwrap();
        let mut t = ScriptedTransport::new();
        t.hold_sends();
        let mut ex = EdgeExchange::new();
        let r = ex.run(StepId(0), &node, &mut state, &mut t).unwrap();
        assert_eq!(r, ExchangeReport::default());
        assert!(t.sent().is_empty());
        assert_eq!(t.waits(), 0);
    }
}
