//! A neighbour one step ahead is absorbed by the one-deep pending slot.

use heatmesh_core::{Direction, ExchangeError, Fixed, NodeId, Phase, ProtocolError, StepId};
use heatmesh_engine::{HeatNode, MeshConfig, NodePoll};
use heatmesh_test_utils::fixtures::edge_message;
use heatmesh_test_utils::ScriptedTransport;

const L: usize = 3;

/// Poll until blocked or finished, checking the pending bound each time.
fn drive(node: &mut HeatNode, t: &mut ScriptedTransport) -> Result<NodePoll, ExchangeError> {
    loop {
        let r = node.poll(t)?;
        for d in Direction::ALL {
            // At most one early edge parked per direction, and never one
            // for a side with no neighbour.
            if node.exchange().has_pending(d) {
                assert!(!node.topology().is_mesh_edge(d));
            }
        }
        assert!(node.exchange().pending_count() <= node.topology().degree());
        if r != NodePoll::Progress {
            return Ok(r);
        }
    }
}

#[test]
fn east_neighbour_one_step_ahead() {
    // Node 0 of a 2×2 mesh: neighbours east (1) and south (2). East has finished
    // step 0 and already sent step 1; south is still on step 0.
    let config = MeshConfig::new(2, 2, 2);
    let mut node = HeatNode::new(&config, NodeId(0)).unwrap();
    let mut t = ScriptedTransport::new();
    t.deliver(edge_message(Direction::East, Phase::Even, L, 10));
    t.deliver(edge_message(Direction::East, Phase::Odd, L, 20));

    let r = drive(&mut node, &mut t).unwrap();
    assert!(matches!(r, NodePoll::Blocked(_)));
    assert_eq!(node.steps_completed(), 0);
    assert!(node.exchange().has_pending(Direction::East));

    // South catches up; step 0 completes and step 1 drains the early edge.
    t.deliver(edge_message(Direction::South, Phase::Even, L, 30));
    let r = drive(&mut node, &mut t).unwrap();
    assert!(matches!(r, NodePoll::Blocked(_)));
    assert_eq!(node.steps_completed(), 1);
    assert_eq!(node.exchange().step(), StepId(1));
    assert!(!node.exchange().has_pending(Direction::East));
    assert_eq!(node.exchange().received(), 1);
    assert_eq!(
        node.state().read_incoming(Direction::East, 0),
        Fixed::from_int(20)
    );

    t.deliver(edge_message(Direction::South, Phase::Odd, L, 40));
    assert_eq!(drive(&mut node, &mut t).unwrap(), NodePoll::Finished);

    let m = node.metrics();
    assert_eq!(m.steps_completed, 2);
    assert_eq!(m.messages_sent, 4);
    assert_eq!(m.early_buffered, 1);
    assert_eq!(m.early_drained, 1);
    assert_eq!(m.messages_received, 3);

    // Sent tags alternate phase with the step.
    let phases: Vec<_> = t.sent().iter().map(|(_, m)| m.tag().unwrap().phase).collect();
    assert_eq!(phases, vec![Phase::Even, Phase::Even, Phase::Odd, Phase::Odd]);
}

#[test]
fn neighbour_two_steps_ahead_is_rejected() {
    let config = MeshConfig::new(2, 2, 3);
    let mut node = HeatNode::new(&config, NodeId(0)).unwrap();
    let mut t = ScriptedTransport::new();
    // Step 0 edge lost to reordering, then steps 1 and 3 from east.
    t.deliver(edge_message(Direction::East, Phase::Odd, L, 1));
    t.deliver(edge_message(Direction::East, Phase::Odd, L, 3));

    assert_eq!(
        drive(&mut node, &mut t),
        Err(ExchangeError::Protocol(ProtocolError::SkewExceeded {
            direction: Direction::East,
            step: StepId(0),
        }))
    );
}
