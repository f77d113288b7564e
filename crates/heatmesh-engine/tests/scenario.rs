//! The 2×2 mesh, L = 3, one step: every value checked by hand.

use heatmesh_core::{Direction, Fixed, NodeId};
use heatmesh_engine::{CooperativeMesh, MeshConfig, ResultWord, ThreadedMesh};

const QUARTER: Fixed = Fixed::from_parts(63, 0xc000); // 255 / 4
const HALF: Fixed = Fixed::from_parts(127, 0x8000); // 510 / 4
const HOT_COLD: Fixed = Fixed::from_parts(73, 0xc000); // 295 / 4
const COLD: Fixed = Fixed::from_int(10); // 40 / 4
const TWO_COLD: Fixed = Fixed::from_int(20); // 80 / 4
const Z: Fixed = Fixed::ZERO;

fn config() -> MeshConfig {
    MeshConfig::new(2, 2, 1)
}

fn grid(mesh: &CooperativeMesh, id: u32) -> Vec<Fixed> {
    mesh.nodes()[id as usize].state().current().cells().to_vec()
}

#[test]
fn one_step_grids_are_floor_averages() {
    let mut mesh = CooperativeMesh::new(&config(), 5).unwrap();
    mesh.run().unwrap();

    // North-west: hot above and to the left.
    assert_eq!(
        grid(&mesh, 0),
        vec![HALF, QUARTER, QUARTER, QUARTER, Z, Z, QUARTER, Z, Z]
    );
    // North-east: hot above, cold to the right.
    assert_eq!(
        grid(&mesh, 1),
        vec![QUARTER, QUARTER, HOT_COLD, Z, Z, COLD, Z, Z, COLD]
    );
    // South-west: hot to the left, cold below.
    assert_eq!(
        grid(&mesh, 2),
        vec![QUARTER, Z, Z, QUARTER, Z, Z, HOT_COLD, COLD, COLD]
    );
    // South-east: cold below and to the right.
    assert_eq!(
        grid(&mesh, 3),
        vec![Z, Z, COLD, Z, Z, COLD, COLD, COLD, TWO_COLD]
    );
}

#[test]
fn edges_cross_to_the_facing_neighbour() {
    let mut mesh = CooperativeMesh::new(&config(), 9).unwrap();
    mesh.run().unwrap();
    let nodes = mesh.nodes();

    // Node 0's east edge is node 1's west column, and so on.
    let e0 = nodes[0].state().edges().incoming(Direction::East);
    let w1 = nodes[1].state().edges().outgoing(Direction::West);
    assert_eq!(e0.samples().collect::<Vec<_>>(), vec![QUARTER, Z, Z]);
    assert_eq!(e0.samples().collect::<Vec<_>>(), w1.samples().collect::<Vec<_>>());

    let s0 = nodes[0].state().edges().incoming(Direction::South);
    assert_eq!(s0.samples().collect::<Vec<_>>(), vec![QUARTER, Z, Z]);

    let n3 = nodes[3].state().edges().incoming(Direction::North);
    assert_eq!(n3.samples().collect::<Vec<_>>(), vec![Z, Z, COLD]);
    let w3 = nodes[3].state().edges().incoming(Direction::West);
    assert_eq!(w3.samples().collect::<Vec<_>>(), vec![Z, Z, COLD]);
}

#[test]
fn two_sends_and_two_receives_per_node() {
    let out = CooperativeMesh::new(&config(), 0).unwrap().run().unwrap();
    assert_eq!(out.metrics.len(), 4);
    for (_, m) in &out.metrics {
        assert_eq!(m.steps_completed, 1);
        assert_eq!(m.messages_sent, 2);
        assert_eq!(m.edges_consumed(), 2);
    }
}

#[test]
fn result_words_cover_the_global_grid() {
    let out = ThreadedMesh::new(config()).unwrap().run().unwrap();
    assert_eq!(out.words.len(), 36);

    let g = out.grid(6);
    assert_eq!(g[0], vec![127, 63, 63, 63, 63, 73]);
    assert_eq!(g[5], vec![73, 10, 10, 10, 10, 20]);

    let corner = out
        .results()
        .find(|r| r.row() == 5 && r.col() == 5)
        .unwrap();
    assert_eq!(corner, ResultWord::new(5, 5, TWO_COLD));
    assert_eq!(out.metrics[3].0, NodeId(3));
}
