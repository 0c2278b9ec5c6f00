//! Graph algorithms module
//!
//! Traversals (BFS, DFS) and shortest paths over a [`Graph`](crate::graph::Graph).
//! Every algorithm borrows the graph immutably and allocates only its own
//! working state.

pub mod shortest_paths;
pub mod traversal;

// Re-export algorithms
pub use shortest_paths::{
    bellman_ford, bidirectional_dijkstra, dijkstra, dijkstra_with_heap, floyd_warshall,
    reverse_dijkstra, reverse_dijkstra_with_heap, AllPairs, Direction, PathResult,
    ShortestPathConfig, ShortestPaths, DEFAULT_WEIGHT_ATTRIBUTE,
};
pub use traversal::{bfs, dfs, TraversalResult};
