use netopt::algo::{
    bellman_ford, bidirectional_dijkstra, dijkstra, dijkstra_with_heap, floyd_warshall,
    reverse_dijkstra, reverse_dijkstra_with_heap, Direction, ShortestPathConfig,
};
use netopt::graph::{props, Graph, GraphError, NodeId, PropertyMap};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

fn n(id: u64) -> NodeId {
    NodeId::new(id)
}

/// Six-node road network used throughout these tests
fn road_network() -> Graph {
    Graph::from_weighted_edges(
        "length",
        [
            (1, 2, 6.0),
            (1, 3, 4.0),
            (2, 3, 2.0),
            (2, 4, 2.0),
            (3, 4, 1.0),
            (3, 5, 2.0),
            (4, 6, 7.0),
            (5, 4, 1.0),
            (5, 6, 3.0),
        ],
    )
}

fn random_network(seed: u64, nodes: u64, edges: usize) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = Graph::new();
    for id in 0..nodes {
        graph.add_node(n(id), PropertyMap::new());
    }
    for _ in 0..edges {
        let u = rng.gen_range(0..nodes);
        let v = rng.gen_range(0..nodes);
        let length: i64 = rng.gen_range(0..20);
        graph.add_edge(n(u), n(v), props([("length", length)]));
    }
    graph
}

fn expected(pairs: &[(u64, f64)]) -> HashMap<NodeId, f64> {
    pairs.iter().map(|&(id, d)| (n(id), d)).collect()
}

#[test]
fn test_reverse_dijkstra_on_road_network() {
    let graph = road_network();
    let config = ShortestPathConfig::default();

    for paths in [
        reverse_dijkstra(&graph, n(6), &config).unwrap(),
        reverse_dijkstra_with_heap(&graph, n(6), &config).unwrap(),
    ] {
        assert_eq!(paths.direction, Direction::Reverse);
        assert_eq!(
            paths.distance,
            expected(&[(6, 0.0), (5, 3.0), (4, 7.0), (3, 5.0), (2, 7.0), (1, 9.0)])
        );
        for (node, next) in [(5, 6), (4, 6), (3, 5), (2, 3), (1, 3)] {
            assert_eq!(paths.parent_of(n(node)), Some(n(next)), "successor of {}", node);
        }
        assert_eq!(paths.parent_of(n(6)), None);
        assert_eq!(paths.path(n(1)), Some(vec![n(1), n(3), n(5), n(6)]));
    }
}

#[test]
fn test_forward_dijkstra_on_road_network() {
    let graph = road_network();
    let config = ShortestPathConfig::default();

    for paths in [
        dijkstra(&graph, n(1), &config).unwrap(),
        dijkstra_with_heap(&graph, n(1), &config).unwrap(),
    ] {
        assert_eq!(
            paths.distance,
            expected(&[(1, 0.0), (2, 6.0), (3, 4.0), (4, 5.0), (5, 6.0), (6, 9.0)])
        );
        for (node, prev) in [(2, 1), (3, 1), (4, 3), (5, 3), (6, 5)] {
            assert_eq!(paths.parent_of(n(node)), Some(n(prev)), "predecessor of {}", node);
        }
        assert_eq!(paths.path(n(6)), Some(vec![n(1), n(3), n(5), n(6)]));
    }
}

#[test]
fn test_unreachable_nodes_stay_infinite() {
    let mut graph = road_network();
    graph.add_node(n(7), PropertyMap::new());
    let config = ShortestPathConfig::default();

    let forward = dijkstra(&graph, n(1), &config).unwrap();
    assert_eq!(forward.distance_to(n(7)), Some(f64::INFINITY));
    assert_eq!(forward.parent_of(n(7)), None);
    assert_eq!(forward.path(n(7)), None);
    assert_eq!(forward.reachable_count(), 6);

    // nothing reaches node 1
    let reverse = reverse_dijkstra_with_heap(&graph, n(1), &config).unwrap();
    assert_eq!(reverse.reachable_count(), 1);
    assert!(!reverse.is_reachable(n(2)));
}

#[test]
fn test_naive_and_heap_variants_agree() {
    let config = ShortestPathConfig::default();
    for seed in 0..8 {
        let graph = random_network(seed, 60, 240);
        for root in [0, 13, 42] {
            assert_eq!(
                dijkstra(&graph, n(root), &config).unwrap(),
                dijkstra_with_heap(&graph, n(root), &config).unwrap(),
                "forward from {} (seed {})",
                root,
                seed
            );
            assert_eq!(
                reverse_dijkstra(&graph, n(root), &config).unwrap(),
                reverse_dijkstra_with_heap(&graph, n(root), &config).unwrap(),
                "reverse to {} (seed {})",
                root,
                seed
            );
        }
    }
}

#[test]
fn test_reverse_matches_forward_per_source() {
    let graph = random_network(99, 40, 160);
    let config = ShortestPathConfig::default();
    let target = n(5);

    let reverse = reverse_dijkstra_with_heap(&graph, target, &config).unwrap();
    for source in graph.nodes() {
        let forward = dijkstra_with_heap(&graph, source, &config).unwrap();
        assert_eq!(forward.distance_to(target), reverse.distance_to(source));
    }
}

#[test]
fn test_other_algorithms_match_dijkstra() {
    let graph = random_network(21, 50, 200);
    let config = ShortestPathConfig::default();
    let all = floyd_warshall(&graph, &config).unwrap();

    for source in [0, 7, 31] {
        let baseline = dijkstra_with_heap(&graph, n(source), &config).unwrap();
        let relaxed = bellman_ford(&graph, n(source), &config).unwrap();
        assert_eq!(baseline.distance, relaxed.distance);

        for target in graph.nodes() {
            let expected = baseline.distance_to(target).unwrap();
            assert_eq!(all.distance(n(source), target), Some(expected));

            match bidirectional_dijkstra(&graph, n(source), target, &config).unwrap() {
                Some(found) => {
                    assert_eq!(found.cost, expected);
                    assert_eq!(found.path.first(), Some(&n(source)));
                    assert_eq!(found.path.last(), Some(&target));
                    let cost: f64 = found
                        .path
                        .windows(2)
                        .map(|hop| {
                            graph.edge_attrs(hop[0], hop[1]).unwrap()["length"]
                                .as_number()
                                .unwrap()
                        })
                        .sum();
                    assert_eq!(cost, expected);
                }
                None => assert!(expected.is_infinite()),
            }
        }
    }
}

#[test]
fn test_missing_weights() {
    let mut graph = road_network();
    graph.add_edge(n(6), n(1), props([("name", "return road")]));
    let config = ShortestPathConfig::default();

    // edge 6 -> 1 is reached once node 6 settles
    let err = dijkstra(&graph, n(1), &config).unwrap_err();
    assert_eq!(
        err,
        GraphError::MissingWeight {
            from: n(6),
            to: n(1),
            attribute: "length".to_string()
        }
    );
    assert_eq!(dijkstra_with_heap(&graph, n(1), &config).unwrap_err(), err);

    let relaxed = ShortestPathConfig::default().with_default_weight(1.0);
    let paths = reverse_dijkstra(&graph, n(1), &relaxed).unwrap();
    assert_eq!(paths.distance_to(n(6)), Some(1.0));
}

#[test]
fn test_empty_graph() {
    let graph = Graph::new();
    let config = ShortestPathConfig::default();
    let missing = Err(GraphError::NodeNotFound(n(1)));

    assert_eq!(dijkstra(&graph, n(1), &config), missing);
    assert_eq!(dijkstra_with_heap(&graph, n(1), &config), missing);
    assert_eq!(reverse_dijkstra(&graph, n(1), &config), missing);
    assert_eq!(reverse_dijkstra_with_heap(&graph, n(1), &config), missing);
    assert_eq!(bellman_ford(&graph, n(1), &config), missing);
    assert!(floyd_warshall(&graph, &config).unwrap().nodes.is_empty());
}
