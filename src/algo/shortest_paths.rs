//! Shortest-path algorithms over edge-weight attributes
//!
//! Label-setting (Dijkstra) variants come in pairs: a naive O(V^2) form that
//! scans the unsettled set for its minimum, and a binary-heap form. Each pair
//! exists forward (distances from a source) and reverse (distances to a
//! target, i.e. Dijkstra on the transposed graph). The naive forms are the
//! correctness baseline and both forms agree on final distances.
//!
//! Ties between equal tentative distances are broken by the lowest
//! [`NodeId`], in both forms.
//!
//! Also here: Bellman-Ford, bidirectional Dijkstra and Floyd-Warshall.

use crate::graph::{Graph, GraphError, GraphResult, Neighbors, NodeId, PropertyMap};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use tracing::debug;

/// Edge attribute read as the weight unless configured otherwise
pub const DEFAULT_WEIGHT_ATTRIBUTE: &str = "length";

/// Where edge weights come from
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPathConfig {
    /// Name of the numeric edge attribute used as weight
    pub weight_attribute: String,
    /// Weight used for edges that lack a numeric weight attribute.
    /// `None` makes such edges an error.
    pub default_weight: Option<f64>,
}

impl Default for ShortestPathConfig {
    fn default() -> Self {
        ShortestPathConfig {
            weight_attribute: DEFAULT_WEIGHT_ATTRIBUTE.to_string(),
            default_weight: None,
        }
    }
}

impl ShortestPathConfig {
    pub fn with_weight_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.weight_attribute = attribute.into();
        self
    }

    pub fn with_default_weight(mut self, weight: f64) -> Self {
        self.default_weight = Some(weight);
        self
    }

    /// Weight of the edge `from -> to` given its attributes.
    fn weight(&self, attrs: &PropertyMap, from: NodeId, to: NodeId) -> GraphResult<f64> {
        let weight = attrs
            .get(&self.weight_attribute)
            .and_then(|value| value.as_number())
            .or(self.default_weight)
            .ok_or_else(|| GraphError::MissingWeight {
                from,
                to,
                attribute: self.weight_attribute.clone(),
            })?;
        if weight.is_nan() {
            return Err(GraphError::InvalidWeight { from, to, weight });
        }
        Ok(weight)
    }

    /// Same as `weight`, additionally rejecting negative values.
    fn non_negative_weight(&self, attrs: &PropertyMap, from: NodeId, to: NodeId) -> GraphResult<f64> {
        let weight = self.weight(attrs, from, to)?;
        if weight < 0.0 {
            return Err(GraphError::InvalidWeight { from, to, weight });
        }
        Ok(weight)
    }
}

/// Which way edges are followed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Distances from the root along successor edges
    Forward,
    /// Distances to the root along predecessor edges
    Reverse,
}

impl Direction {
    fn links(self, graph: &Graph, id: NodeId) -> GraphResult<Neighbors<'_>> {
        match self {
            Direction::Forward => graph.neighbors(id),
            Direction::Reverse => graph.reverse_neighbors(id),
        }
    }

    /// Orient a `(settled, neighbor)` pair as the stored edge `(from, to)`.
    fn edge(self, settled: NodeId, neighbor: NodeId) -> (NodeId, NodeId) {
        match self {
            Direction::Forward => (settled, neighbor),
            Direction::Reverse => (neighbor, settled),
        }
    }
}

/// Single-source (or single-target) shortest-path tree
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPaths {
    /// Source for forward runs, target for reverse runs
    pub root: NodeId,
    pub direction: Direction,
    /// Distance per node, `f64::INFINITY` when unreachable
    pub distance: HashMap<NodeId, f64>,
    /// Predecessor (forward) or successor (reverse) on a shortest path;
    /// `None` for the root and for unreachable nodes
    pub parent: HashMap<NodeId, Option<NodeId>>,
}

impl ShortestPaths {
    fn start(graph: &Graph, root: NodeId, direction: Direction) -> Self {
        let node_count = graph.node_count();
        let mut distance = HashMap::with_capacity(node_count);
        let mut parent = HashMap::with_capacity(node_count);
        for id in graph.nodes() {
            distance.insert(id, f64::INFINITY);
            parent.insert(id, None);
        }
        distance.insert(root, 0.0);
        ShortestPaths {
            root,
            direction,
            distance,
            parent,
        }
    }

    /// Distance of `id`, `None` if the node is not in the graph
    pub fn distance_to(&self, id: NodeId) -> Option<f64> {
        self.distance.get(&id).copied()
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(&id).copied().flatten()
    }

    pub fn is_reachable(&self, id: NodeId) -> bool {
        self.distance_to(id).is_some_and(f64::is_finite)
    }

    pub fn reachable_count(&self) -> usize {
        self.distance.values().filter(|d| d.is_finite()).count()
    }

    /// Mean distance over reachable nodes, the root included
    pub fn mean_reachable_distance(&self) -> Option<f64> {
        let (count, total) = self
            .distance
            .values()
            .filter(|d| d.is_finite())
            .fold((0usize, 0.0), |(count, total), d| (count + 1, total + d));
        if count == 0 {
            None
        } else {
            Some(total / count as f64)
        }
    }

    /// Node sequence of a shortest path in travel direction: root to `id` for
    /// forward runs, `id` to root for reverse runs.
    pub fn path(&self, id: NodeId) -> Option<Vec<NodeId>> {
        if !self.is_reachable(id) {
            return None;
        }
        let mut path = vec![id];
        let mut current = id;
        while let Some(next) = self.parent_of(current) {
            path.push(next);
            current = next;
        }
        if self.direction == Direction::Forward {
            path.reverse();
        }
        Some(path)
    }
}

/// A single source-to-target shortest path
#[derive(Debug, Clone, PartialEq)]
pub struct PathResult {
    pub source: NodeId,
    pub target: NodeId,
    pub path: Vec<NodeId>,
    pub cost: f64,
}

/// Heap entry for the priority-queue variants
#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    node: NodeId,
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed on both keys: min-heap by cost, then by lowest node id
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn tentative(distance: &HashMap<NodeId, f64>, id: NodeId) -> f64 {
    distance.get(&id).copied().unwrap_or(f64::INFINITY)
}

/// Relax every edge leaving (or, in reverse, entering) the settled node `u`.
///
/// Returns the neighbors whose tentative distance improved.
fn relax(
    graph: &Graph,
    u: NodeId,
    config: &ShortestPathConfig,
    direction: Direction,
    distance: &mut HashMap<NodeId, f64>,
    parent: &mut HashMap<NodeId, Option<NodeId>>,
) -> GraphResult<Vec<NodeId>> {
    let base = tentative(distance, u);
    let mut improved = Vec::new();
    for (v, attrs) in direction.links(graph, u)?.iter() {
        let (from, to) = direction.edge(u, v);
        let candidate = base + config.non_negative_weight(attrs, from, to)?;
        if candidate < tentative(distance, v) {
            distance.insert(v, candidate);
            parent.insert(v, Some(u));
            improved.push(v);
        }
    }
    Ok(improved)
}

/// Lowest tentative distance in the unsettled set, lowest id on ties
fn closest_unsettled(unsettled: &HashSet<NodeId>, distance: &HashMap<NodeId, f64>) -> Option<NodeId> {
    unsettled.iter().copied().min_by(|&a, &b| {
        tentative(distance, a)
            .partial_cmp(&tentative(distance, b))
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.cmp(&b))
    })
}

fn label_setting_scan(
    graph: &Graph,
    root: NodeId,
    config: &ShortestPathConfig,
    direction: Direction,
) -> GraphResult<ShortestPaths> {
    if !graph.has_node(root) {
        return Err(GraphError::NodeNotFound(root));
    }

    let mut paths = ShortestPaths::start(graph, root, direction);
    let mut unsettled: HashSet<NodeId> = graph.nodes().iter().collect();

    while let Some(u) = closest_unsettled(&unsettled, &paths.distance) {
        unsettled.remove(&u);
        // unreachable nodes settle at infinity and relax nothing
        if tentative(&paths.distance, u).is_infinite() {
            continue;
        }
        relax(graph, u, config, direction, &mut paths.distance, &mut paths.parent)?;
    }

    debug!(
        "{:?} label-setting scan from {} settled {} nodes, {} reachable",
        direction,
        root,
        graph.node_count(),
        paths.reachable_count()
    );
    Ok(paths)
}

fn label_setting_heap(
    graph: &Graph,
    root: NodeId,
    config: &ShortestPathConfig,
    direction: Direction,
) -> GraphResult<ShortestPaths> {
    if !graph.has_node(root) {
        return Err(GraphError::NodeNotFound(root));
    }

    let mut paths = ShortestPaths::start(graph, root, direction);
    let mut settled: HashSet<NodeId> = HashSet::with_capacity(graph.node_count());
    let mut heap = BinaryHeap::new();
    heap.push(State { cost: 0.0, node: root });

    while let Some(State { node: u, .. }) = heap.pop() {
        // stale duplicate of an already settled node
        if !settled.insert(u) {
            continue;
        }
        for v in relax(graph, u, config, direction, &mut paths.distance, &mut paths.parent)? {
            heap.push(State {
                cost: tentative(&paths.distance, v),
                node: v,
            });
        }
    }

    debug!(
        "{:?} label-setting heap from {} settled {} nodes",
        direction,
        root,
        settled.len()
    );
    Ok(paths)
}

/// Dijkstra's algorithm, naive O(V^2) form
///
/// Settles every node (including unreachable ones, at infinity) before
/// returning.
pub fn dijkstra(graph: &Graph, source: NodeId, config: &ShortestPathConfig) -> GraphResult<ShortestPaths> {
    label_setting_scan(graph, source, config, Direction::Forward)
}

/// Dijkstra's algorithm with a binary heap, O(E log V)
pub fn dijkstra_with_heap(
    graph: &Graph,
    source: NodeId,
    config: &ShortestPathConfig,
) -> GraphResult<ShortestPaths> {
    label_setting_heap(graph, source, config, Direction::Forward)
}

/// Distances from every node to `target`, naive O(V^2) form
///
/// `parent` holds each node's successor on a shortest path to the target.
pub fn reverse_dijkstra(
    graph: &Graph,
    target: NodeId,
    config: &ShortestPathConfig,
) -> GraphResult<ShortestPaths> {
    label_setting_scan(graph, target, config, Direction::Reverse)
}

/// Distances from every node to `target` using a binary heap
///
/// A node is pushed each time its distance improves; duplicates popped after
/// the node is settled are skipped.
pub fn reverse_dijkstra_with_heap(
    graph: &Graph,
    target: NodeId,
    config: &ShortestPathConfig,
) -> GraphResult<ShortestPaths> {
    label_setting_heap(graph, target, config, Direction::Reverse)
}

/// Bellman-Ford single-source shortest paths
///
/// Accepts negative weights. Fails with `NegativeCycle` when a cycle of
/// negative total weight is reachable from `source`.
pub fn bellman_ford(graph: &Graph, source: NodeId, config: &ShortestPathConfig) -> GraphResult<ShortestPaths> {
    if !graph.has_node(source) {
        return Err(GraphError::NodeNotFound(source));
    }

    let mut paths = ShortestPaths::start(graph, source, Direction::Forward);
    let rounds = graph.node_count();

    for round in 0..rounds {
        let mut changed = None;
        for u in graph.nodes() {
            let base = tentative(&paths.distance, u);
            if base.is_infinite() {
                continue;
            }
            for (v, attrs) in graph.neighbors(u)?.iter() {
                let candidate = base + config.weight(attrs, u, v)?;
                if candidate < tentative(&paths.distance, v) {
                    paths.distance.insert(v, candidate);
                    paths.parent.insert(v, Some(u));
                    changed = Some(v);
                }
            }
        }
        match changed {
            None => {
                debug!("bellman-ford from {} converged after {} rounds", source, round + 1);
                return Ok(paths);
            }
            // V-1 rounds suffice without negative cycles; a change in round V proves one
            Some(v) if round + 1 == rounds => return Err(GraphError::NegativeCycle(v)),
            Some(_) => {}
        }
    }

    Ok(paths)
}

/// One side of a bidirectional search
struct Frontier {
    direction: Direction,
    distance: HashMap<NodeId, f64>,
    parent: HashMap<NodeId, Option<NodeId>>,
    settled: HashSet<NodeId>,
    heap: BinaryHeap<State>,
}

impl Frontier {
    fn new(root: NodeId, direction: Direction) -> Self {
        let mut distance = HashMap::new();
        distance.insert(root, 0.0);
        let mut heap = BinaryHeap::new();
        heap.push(State { cost: 0.0, node: root });
        Frontier {
            direction,
            distance,
            parent: HashMap::new(),
            settled: HashSet::new(),
            heap,
        }
    }

    /// Smallest live key in the queue, dropping stale entries.
    fn peek(&mut self) -> Option<f64> {
        while let Some(top) = self.heap.peek() {
            if self.settled.contains(&top.node) {
                self.heap.pop();
            } else {
                return Some(top.cost);
            }
        }
        None
    }

    /// Settle the next node and return every node whose distance changed,
    /// the settled node included.
    fn step(&mut self, graph: &Graph, config: &ShortestPathConfig) -> GraphResult<Vec<NodeId>> {
        let Some(State { node: u, .. }) = self.heap.pop() else {
            return Ok(Vec::new());
        };
        self.settled.insert(u);
        let improved = relax(graph, u, config, self.direction, &mut self.distance, &mut self.parent)?;
        for &v in &improved {
            self.heap.push(State {
                cost: tentative(&self.distance, v),
                node: v,
            });
        }
        let mut touched = improved;
        touched.push(u);
        Ok(touched)
    }

    /// Walk parents from `id` back to this frontier's root.
    fn walk(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = vec![id];
        let mut current = id;
        while let Some(next) = self.parent.get(&current).copied().flatten() {
            path.push(next);
            current = next;
        }
        path
    }
}

/// Point-to-point Dijkstra growing one search from each end
///
/// Returns `None` when `target` is unreachable from `source`.
pub fn bidirectional_dijkstra(
    graph: &Graph,
    source: NodeId,
    target: NodeId,
    config: &ShortestPathConfig,
) -> GraphResult<Option<PathResult>> {
    for id in [source, target] {
        if !graph.has_node(id) {
            return Err(GraphError::NodeNotFound(id));
        }
    }

    let mut forward = Frontier::new(source, Direction::Forward);
    let mut backward = Frontier::new(target, Direction::Reverse);
    let mut best: Option<(f64, NodeId)> = if source == target {
        Some((0.0, source))
    } else {
        None
    };

    loop {
        let (Some(f_top), Some(b_top)) = (forward.peek(), backward.peek()) else {
            break;
        };
        if best.is_some_and(|(cost, _)| f_top + b_top >= cost) {
            break;
        }

        let (grown, other) = if f_top <= b_top {
            (&mut forward, &backward)
        } else {
            (&mut backward, &forward)
        };
        for v in grown.step(graph, config)? {
            let through = tentative(&grown.distance, v) + tentative(&other.distance, v);
            if through.is_finite() && best.map_or(true, |(cost, _)| through < cost) {
                best = Some((through, v));
            }
        }
    }

    let Some((cost, meeting)) = best else {
        debug!("bidirectional dijkstra: {} unreachable from {}", target, source);
        return Ok(None);
    };

    let mut path = forward.walk(meeting);
    path.reverse();
    path.extend(backward.walk(meeting).into_iter().skip(1));

    Ok(Some(PathResult {
        source,
        target,
        path,
        cost,
    }))
}

/// All-pairs distance matrix
#[derive(Debug, Clone, PartialEq)]
pub struct AllPairs {
    /// Row/column order (graph node order)
    pub nodes: Vec<NodeId>,
    index: HashMap<NodeId, usize>,
    distances: Vec<Vec<f64>>,
}

impl AllPairs {
    /// Distance `from -> to`, `None` if either node is unknown
    pub fn distance(&self, from: NodeId, to: NodeId) -> Option<f64> {
        let i = *self.index.get(&from)?;
        let j = *self.index.get(&to)?;
        Some(self.distances[i][j])
    }

    /// Distances from `from` to every node, in `nodes` order
    pub fn row(&self, from: NodeId) -> Option<&[f64]> {
        let i = *self.index.get(&from)?;
        Some(&self.distances[i])
    }
}

/// Floyd-Warshall all-pairs shortest paths, O(V^3)
///
/// Accepts negative weights; fails with `NegativeCycle` if any exists.
pub fn floyd_warshall(graph: &Graph, config: &ShortestPathConfig) -> GraphResult<AllPairs> {
    let nodes: Vec<NodeId> = graph.nodes().iter().collect();
    let index: HashMap<NodeId, usize> = nodes.iter().enumerate().map(|(i, &id)| (id, i)).collect();
    let size = nodes.len();

    let mut distances = vec![vec![f64::INFINITY; size]; size];
    for (i, row) in distances.iter_mut().enumerate() {
        row[i] = 0.0;
    }
    for (i, &u) in nodes.iter().enumerate() {
        for (v, attrs) in graph.neighbors(u)?.iter() {
            let j = index[&v];
            let weight = config.weight(attrs, u, v)?;
            if weight < distances[i][j] {
                distances[i][j] = weight;
            }
        }
    }

    for k in 0..size {
        for i in 0..size {
            let via = distances[i][k];
            if via.is_infinite() {
                continue;
            }
            for j in 0..size {
                let candidate = via + distances[k][j];
                if candidate < distances[i][j] {
                    distances[i][j] = candidate;
                }
            }
        }
    }

    if let Some(i) = (0..size).find(|&i| distances[i][i] < 0.0) {
        return Err(GraphError::NegativeCycle(nodes[i]));
    }

    debug!("floyd-warshall over {} nodes", size);
    Ok(AllPairs {
        nodes,
        index,
        distances,
    })
}
