//! Netopt
//!
//! Directed attributed graphs for network optimisation: an in-memory graph
//! store with successor and predecessor indexes, breadth-first and
//! depth-first traversal, and a family of shortest-path algorithms.
//!
//! # Modules
//!
//! - [`graph`]: node and edge records, the [`Graph`] store and its read-only views
//! - [`algo`]: BFS/DFS and Dijkstra (naive, heap, reverse), Bellman-Ford,
//!   bidirectional Dijkstra and Floyd-Warshall
//!
//! ## Example Usage
//!
//! ```rust
//! use netopt::{props, reverse_dijkstra_with_heap, Graph, NodeId, ShortestPathConfig};
//!
//! let mut graph = Graph::new();
//! graph.add_edge(NodeId::new(1), NodeId::new(2), props([("length", 6)]));
//! graph.add_edge(NodeId::new(2), NodeId::new(3), props([("length", 2)]));
//! graph.add_edge(NodeId::new(1), NodeId::new(3), props([("length", 10)]));
//!
//! // Distance from every node to node 3
//! let paths = reverse_dijkstra_with_heap(&graph, NodeId::new(3), &ShortestPathConfig::default()).unwrap();
//! assert_eq!(paths.distance_to(NodeId::new(1)), Some(8.0));
//! assert_eq!(
//!     paths.path(NodeId::new(1)),
//!     Some(vec![NodeId::new(1), NodeId::new(2), NodeId::new(3)])
//! );
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod graph;

// Re-export main types for convenience
pub use graph::{
    props, AdjacencyView, Edge, EdgeId, EdgeView, Graph, GraphError, GraphResult, Neighbors, Node,
    NodeId, NodeView, PropertyMap, PropertyValue,
};

pub use algo::{
    bellman_ford, bfs, bidirectional_dijkstra, dfs, dijkstra, dijkstra_with_heap, floyd_warshall,
    reverse_dijkstra, reverse_dijkstra_with_heap, AllPairs, Direction, PathResult,
    ShortestPathConfig, ShortestPaths, TraversalResult,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
