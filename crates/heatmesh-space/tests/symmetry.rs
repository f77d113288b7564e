//! Neighbour symmetry across the whole mesh.

use heatmesh_core::{Direction, NodeId};
use heatmesh_space::MeshTopology;
use proptest::prelude::*;

#[test]
fn every_link_is_reciprocated_on_an_eight_by_eight_mesh() {
    let mesh = MeshTopology::new(3).unwrap();
    for node in mesh.nodes() {
        for &d in node.directions() {
            let other = mesh.resolve(node.neighbour(d).unwrap()).unwrap();
            assert_eq!(other.neighbour(d.opposite()), Some(node.id()));
        }
    }
}

#[test]
fn link_count_matches_grid_edges() {
    // An n×n grid has 2·n·(n-1) undirected links.
    let mesh = MeshTopology::new(2).unwrap();
    let directed: usize = mesh.nodes().map(|n| n.degree()).sum();
    assert_eq!(directed, 2 * (2 * 4 * 3));
}

proptest! {
    #[test]
    fn neighbour_relation_is_symmetric(log_len in 0u32..6, raw in any::<u32>()) {
        let mesh = MeshTopology::new(log_len).unwrap();
        let id = NodeId(raw % mesh.node_count());
        let node = mesh.resolve(id).unwrap();
        for d in Direction::ALL {
            match node.neighbour(d) {
                Some(n) => {
                    let other = mesh.resolve(n).unwrap();
                    prop_assert_eq!(other.neighbour(d.opposite()), Some(id));
                }
                None => prop_assert!(node.is_mesh_edge(d)),
            }
        }
    }

    #[test]
    fn same_coordinate_pattern_gives_same_direction_list(log_len in 2u32..6, raw in any::<u32>()) {
        // Two interior nodes always list all four directions in the same order.
        let mesh = MeshTopology::new(log_len).unwrap();
        let len = mesh.side_len();
        let x = 1 + raw % (len - 2);
        let y = 1 + (raw / len) % (len - 2);
        let node = mesh.resolve(NodeId((y << log_len) | x)).unwrap();
        prop_assert_eq!(node.directions(), &Direction::ALL[..]);
    }
}
