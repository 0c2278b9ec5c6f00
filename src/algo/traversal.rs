//! Graph traversal: breadth-first and depth-first search
//!
//! Both searches follow successor edges from a single source and report the
//! same shape of result: per-node reachability, the predecessor in the search
//! tree, the 1-based discovery order, and the tree edges in discovery order.

use crate::graph::{Adjacent, Graph, GraphError, GraphResult, NodeId};
use std::collections::{HashMap, VecDeque};
use tracing::debug;

/// Outcome of a BFS or DFS run
///
/// Every node of the graph has an entry in `reachable`, `predecessor` and
/// `order`. `predecessor` is `None` for the source and for unreached nodes,
/// and `order` is `None` for unreached nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct TraversalResult {
    pub source: NodeId,
    pub reachable: HashMap<NodeId, bool>,
    pub predecessor: HashMap<NodeId, Option<NodeId>>,
    pub order: HashMap<NodeId, Option<usize>>,
    /// Tree edges in discovery order
    pub edges: Vec<(NodeId, NodeId)>,
}

impl TraversalResult {
    fn start(graph: &Graph, source: NodeId) -> Self {
        let node_count = graph.node_count();
        let mut result = TraversalResult {
            source,
            reachable: HashMap::with_capacity(node_count),
            predecessor: HashMap::with_capacity(node_count),
            order: HashMap::with_capacity(node_count),
            edges: Vec::new(),
        };
        for id in graph.nodes() {
            result.reachable.insert(id, false);
            result.predecessor.insert(id, None);
            result.order.insert(id, None);
        }
        result.reachable.insert(source, true);
        result.order.insert(source, Some(1));
        result
    }

    /// Record that `to` was first reached through the edge `from -> to`.
    fn discover(&mut self, from: NodeId, to: NodeId) {
        // the source holds order 1 and each discovery adds exactly one tree edge
        let order = self.edges.len() + 2;
        self.reachable.insert(to, true);
        self.predecessor.insert(to, Some(from));
        self.order.insert(to, Some(order));
        self.edges.push((from, to));
    }

    pub fn is_reachable(&self, id: NodeId) -> bool {
        self.reachable.get(&id).copied().unwrap_or(false)
    }

    pub fn predecessor_of(&self, id: NodeId) -> Option<NodeId> {
        self.predecessor.get(&id).copied().flatten()
    }

    pub fn order_of(&self, id: NodeId) -> Option<usize> {
        self.order.get(&id).copied().flatten()
    }

    /// Number of reached nodes, the source included
    pub fn reached_count(&self) -> usize {
        self.edges.len() + 1
    }

    /// Reached nodes sorted by discovery order
    pub fn visit_sequence(&self) -> Vec<NodeId> {
        std::iter::once(self.source)
            .chain(self.edges.iter().map(|&(_, to)| to))
            .collect()
    }

    /// Tree path from the source to `target`, or `None` if it was not reached
    pub fn path_to(&self, target: NodeId) -> Option<Vec<NodeId>> {
        if !self.is_reachable(target) {
            return None;
        }
        let mut path = vec![target];
        let mut current = target;
        while let Some(parent) = self.predecessor_of(current) {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        Some(path)
    }
}

/// Breadth-First Search from `source`
///
/// Discovery order is non-decreasing in hop distance from the source.
pub fn bfs(graph: &Graph, source: NodeId) -> GraphResult<TraversalResult> {
    if !graph.has_node(source) {
        return Err(GraphError::NodeNotFound(source));
    }

    let mut result = TraversalResult::start(graph, source);
    let mut queue = VecDeque::new();
    queue.push_back(source);

    while let Some(u) = queue.pop_front() {
        for v in graph.successors(u)? {
            if !result.is_reachable(v) {
                result.discover(u, v);
                queue.push_back(v);
            }
        }
    }

    debug!(
        "bfs from {} reached {} of {} nodes",
        source,
        result.reached_count(),
        graph.node_count()
    );
    Ok(result)
}

/// Depth-First Search from `source`
///
/// Iterative: each stack frame owns the successor cursor of its node. A node
/// is pushed once, so its successors are enumerated exactly once over the
/// whole run and deep graphs cannot overflow the call stack.
pub fn dfs(graph: &Graph, source: NodeId) -> GraphResult<TraversalResult> {
    if !graph.has_node(source) {
        return Err(GraphError::NodeNotFound(source));
    }

    let mut result = TraversalResult::start(graph, source);
    let mut stack: Vec<(NodeId, Adjacent<'_>)> = vec![(source, graph.successors(source)?)];

    while let Some((u, cursor)) = stack.last_mut() {
        let u = *u;
        match cursor.next() {
            Some(v) => {
                if !result.is_reachable(v) {
                    result.discover(u, v);
                    stack.push((v, graph.successors(v)?));
                }
            }
            None => {
                stack.pop();
            }
        }
    }

    debug!(
        "dfs from {} reached {} of {} nodes",
        source,
        result.reached_count(),
        graph.node_count()
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::PropertyMap;

    fn n(id: u64) -> NodeId {
        NodeId::new(id)
    }

    fn chain(edges: &[(u64, u64)]) -> Graph {
        let mut graph = Graph::new();
        for &(u, v) in edges {
            graph.add_edge(n(u), n(v), PropertyMap::new());
        }
        graph
    }

    #[test]
    fn test_bfs() {
        // 1 -> 2 -> 4, 1 -> 3 -> 4, 5 isolated
        let mut graph = chain(&[(1, 2), (1, 3), (2, 4), (3, 4)]);
        graph.add_node(n(5), PropertyMap::new());

        let result = bfs(&graph, n(1)).unwrap();
        assert_eq!(result.edges, vec![(n(1), n(2)), (n(1), n(3)), (n(2), n(4))]);
        assert_eq!(result.order_of(n(1)), Some(1));
        assert_eq!(result.order_of(n(3)), Some(3));
        assert_eq!(result.order_of(n(4)), Some(4));
        assert_eq!(result.predecessor_of(n(4)), Some(n(2)));
        assert_eq!(result.predecessor_of(n(1)), None);
        assert!(!result.is_reachable(n(5)));
        assert_eq!(result.order_of(n(5)), None);
        assert_eq!(result.reachable.len(), 5);
    }

    #[test]
    fn test_dfs() {
        let graph = chain(&[(1, 2), (1, 3), (2, 4), (3, 4)]);

        let result = dfs(&graph, n(1)).unwrap();
        assert_eq!(result.edges, vec![(n(1), n(2)), (n(2), n(4)), (n(1), n(3))]);
        assert_eq!(result.visit_sequence(), vec![n(1), n(2), n(4), n(3)]);
        assert_eq!(result.order_of(n(3)), Some(4));
        assert_eq!(result.path_to(n(4)), Some(vec![n(1), n(2), n(4)]));
    }

    #[test]
    fn test_dfs_handles_long_chains() {
        let edges: Vec<(u64, u64)> = (0..200_000).map(|i| (i, i + 1)).collect();
        let graph = chain(&edges);

        let result = dfs(&graph, n(0)).unwrap();
        assert_eq!(result.reached_count(), 200_001);
        assert_eq!(result.order_of(n(200_000)), Some(200_001));
    }

    #[test]
    fn test_missing_source() {
        let graph = Graph::new();
        assert_eq!(bfs(&graph, n(1)), Err(GraphError::NodeNotFound(n(1))));
        assert_eq!(dfs(&graph, n(1)), Err(GraphError::NodeNotFound(n(1))));
    }

    #[test]
    fn test_isolated_source() {
        let mut graph = Graph::new();
        graph.add_node(n(3), PropertyMap::new());

        for result in [bfs(&graph, n(3)).unwrap(), dfs(&graph, n(3)).unwrap()] {
            assert!(result.is_reachable(n(3)));
            assert!(result.edges.is_empty());
            assert_eq!(result.reached_count(), 1);
            assert_eq!(result.path_to(n(3)), Some(vec![n(3)]));
        }
    }

    #[test]
    fn test_self_loop_is_not_a_tree_edge() {
        let graph = chain(&[(1, 1), (1, 2)]);
        let result = bfs(&graph, n(1)).unwrap();
        assert_eq!(result.edges, vec![(n(1), n(2))]);
    }
}
