//! In-memory graph storage implementation
//!
//! Nodes live in an insertion-ordered map, edge records live in an arena
//! (`Vec<Option<Edge>>` with slot reuse), and two adjacency indexes map
//! `u -> {v -> EdgeId}` (successors) and `v -> {u -> EdgeId}` (predecessors).
//! Both indexes hold the same handle for a pair, so there is a single copy of
//! every edge's attributes.

use super::edge::Edge;
use super::node::Node;
use super::property::{PropertyMap, PropertyValue};
use super::types::{EdgeId, NodeId};
use super::view::{AdjacencyView, Adjacent, EdgeView, Links, Neighbors, NodeView};
use indexmap::IndexMap;
use std::collections::HashMap;
use thiserror::Error;
use tracing::trace;

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Edge ({0}, {1}) not found")]
    EdgeNotFound(NodeId, NodeId),

    #[error("Edge ({from}, {to}) has no numeric '{attribute}' attribute")]
    MissingWeight {
        from: NodeId,
        to: NodeId,
        attribute: String,
    },

    #[error("Edge ({from}, {to}) has unusable weight {weight}")]
    InvalidWeight { from: NodeId, to: NodeId, weight: f64 },

    #[error("Negative cycle through node {0}")]
    NegativeCycle(NodeId),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Directed graph with attributed nodes and edges
///
/// At most one edge exists per ordered pair; adding the same pair again
/// replaces its attributes. Every iteration (nodes, successors, predecessors,
/// edges) follows insertion order, and removals keep the relative order of
/// what remains.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// Node records in insertion order
    pub(super) nodes: IndexMap<NodeId, Node>,

    /// Successor index: u -> {v -> edge handle}
    pub(super) successors: HashMap<NodeId, Links>,

    /// Predecessor index: v -> {u -> edge handle}
    pub(super) predecessors: HashMap<NodeId, Links>,

    /// Edge arena indexed by `EdgeId`
    edges: Vec<Option<Edge>>,

    /// Freed arena slots for reuse
    free_edge_ids: Vec<u64>,

    edge_total: usize,
}

impl Graph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for a known graph size.
    pub fn with_capacity(node_count: usize, edge_count: usize) -> Self {
        Graph {
            nodes: IndexMap::with_capacity(node_count),
            successors: HashMap::with_capacity(node_count),
            predecessors: HashMap::with_capacity(node_count),
            edges: Vec::with_capacity(edge_count),
            free_edge_ids: Vec::new(),
            edge_total: 0,
        }
    }

    /// Build a graph from `(u, v, weight)` triples, storing each weight as a
    /// float attribute named `attribute`.
    pub fn from_weighted_edges<I>(attribute: &str, edges: I) -> Self
    where
        I: IntoIterator<Item = (u64, u64, f64)>,
    {
        let mut graph = Graph::new();
        for (u, v, w) in edges {
            let mut attrs = PropertyMap::with_capacity(1);
            attrs.insert(attribute.to_string(), PropertyValue::Float(w));
            graph.add_edge(NodeId::new(u), NodeId::new(v), attrs);
        }
        graph
    }

    // ------------------------------------------------------------------
    // Node operations
    // ------------------------------------------------------------------

    /// Insert `id` if absent, then merge `attrs` into its attributes.
    pub fn add_node(&mut self, id: NodeId, attrs: PropertyMap) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.merge_properties(attrs);
            return;
        }
        self.nodes.insert(id, Node::new_with_properties(id, attrs));
        self.successors.insert(id, Links::new());
        self.predecessors.insert(id, Links::new());
        trace!("added node {}", id);
    }

    fn ensure_node(&mut self, id: NodeId) {
        if !self.nodes.contains_key(&id) {
            self.add_node(id, PropertyMap::new());
        }
    }

    /// Remove a node and every edge where it is source or target.
    pub fn remove_node(&mut self, id: NodeId) -> GraphResult<Node> {
        let node = self
            .nodes
            .shift_remove(&id)
            .ok_or(GraphError::NodeNotFound(id))?;

        let outgoing = self.successors.remove(&id).unwrap_or_default();
        let incoming = self.predecessors.remove(&id).unwrap_or_default();

        for (&v, &edge_id) in &outgoing {
            if v != id {
                let mirrored = self
                    .predecessors
                    .get_mut(&v)
                    .and_then(|links| links.shift_remove(&id));
                assert_eq!(
                    mirrored,
                    Some(edge_id),
                    "predecessor index out of sync for edge ({}, {})",
                    id,
                    v
                );
            }
            self.release_edge(edge_id);
        }

        for (&u, &edge_id) in &incoming {
            // self-loop already released above
            if u == id {
                continue;
            }
            let mirrored = self
                .successors
                .get_mut(&u)
                .and_then(|links| links.shift_remove(&id));
            assert_eq!(
                mirrored,
                Some(edge_id),
                "successor index out of sync for edge ({}, {})",
                u,
                id
            );
            self.release_edge(edge_id);
        }

        trace!(
            "removed node {} with {} outgoing and {} incoming edges",
            id,
            outgoing.len(),
            incoming.len()
        );
        Ok(node)
    }

    /// Set a single attribute on an existing node
    pub fn set_node_property(
        &mut self,
        id: NodeId,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> GraphResult<Option<PropertyValue>> {
        let node = self.nodes.get_mut(&id).ok_or(GraphError::NodeNotFound(id))?;
        Ok(node.set_property(key, value))
    }

    // ------------------------------------------------------------------
    // Edge operations
    // ------------------------------------------------------------------

    /// Add (or overwrite) the directed edge `u -> v`, creating missing
    /// endpoints with empty attributes.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId, attrs: PropertyMap) -> EdgeId {
        self.ensure_node(u);
        self.ensure_node(v);

        if let Some(existing) = self.edge_handle(u, v) {
            self.edge_record_mut(existing).properties = attrs;
            trace!("replaced attributes of edge ({}, {})", u, v);
            return existing;
        }

        let edge_id = self.allocate_edge_id();
        let slot = edge_id.slot();
        if slot >= self.edges.len() {
            self.edges.resize_with(slot + 1, || None);
        }
        self.edges[slot] = Some(Edge::new(edge_id, u, v, attrs));

        self.successors.entry(u).or_default().insert(v, edge_id);
        self.predecessors.entry(v).or_default().insert(u, edge_id);
        self.edge_total += 1;

        trace!("added edge ({}, {}) as {}", u, v, edge_id);
        edge_id
    }

    /// Remove the directed edge `u -> v`.
    ///
    /// Both index entries go together. A pair recorded as a successor but not
    /// as the matching predecessor means the indexes are corrupted, which
    /// panics instead of being skipped.
    pub fn remove_edge(&mut self, u: NodeId, v: NodeId) -> GraphResult<Edge> {
        let edge_id = self
            .edge_handle(u, v)
            .ok_or(GraphError::EdgeNotFound(u, v))?;

        let mirrored = self
            .predecessors
            .get(&v)
            .and_then(|links| links.get(&u))
            .copied();
        assert_eq!(
            mirrored,
            Some(edge_id),
            "predecessor index out of sync for edge ({}, {})",
            u,
            v
        );

        if let Some(links) = self.successors.get_mut(&u) {
            links.shift_remove(&v);
        }
        if let Some(links) = self.predecessors.get_mut(&v) {
            links.shift_remove(&u);
        }

        trace!("removed edge ({}, {})", u, v);
        match self.release_edge(edge_id) {
            Some(edge) => Ok(edge),
            None => panic!("dangling handle {} for edge ({}, {})", edge_id, u, v),
        }
    }

    /// Set a single attribute on an existing edge
    pub fn set_edge_property(
        &mut self,
        u: NodeId,
        v: NodeId,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> GraphResult<()> {
        let edge_id = self
            .edge_handle(u, v)
            .ok_or(GraphError::EdgeNotFound(u, v))?;
        self.edge_record_mut(edge_id).set_property(key, value);
        Ok(())
    }

    fn allocate_edge_id(&mut self) -> EdgeId {
        match self.free_edge_ids.pop() {
            Some(id) => EdgeId::new(id),
            None => EdgeId::new(self.edges.len() as u64),
        }
    }

    fn release_edge(&mut self, edge_id: EdgeId) -> Option<Edge> {
        let edge = self.edges.get_mut(edge_id.slot()).and_then(Option::take)?;
        self.free_edge_ids.push(edge_id.as_u64());
        self.edge_total -= 1;
        Some(edge)
    }

    fn edge_handle(&self, u: NodeId, v: NodeId) -> Option<EdgeId> {
        self.successors.get(&u).and_then(|links| links.get(&v)).copied()
    }

    fn edge_record_mut(&mut self, edge_id: EdgeId) -> &mut Edge {
        match self.edges.get_mut(edge_id.slot()).and_then(Option::as_mut) {
            Some(edge) => edge,
            None => panic!("dangling edge handle {}", edge_id),
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn has_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn has_edge(&self, u: NodeId, v: NodeId) -> bool {
        self.edge_handle(u, v).is_some()
    }

    /// Get a node record
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn node_attrs(&self, id: NodeId) -> Option<&PropertyMap> {
        self.nodes.get(&id).map(|node| &node.properties)
    }

    /// Get the edge record for `u -> v`
    pub fn edge(&self, u: NodeId, v: NodeId) -> Option<&Edge> {
        self.edge_handle(u, v).and_then(|id| self.edge_by_id(id))
    }

    pub fn edge_attrs(&self, u: NodeId, v: NodeId) -> Option<&PropertyMap> {
        self.edge(u, v).map(|edge| &edge.properties)
    }

    /// Resolve an edge handle held by one of the adjacency indexes
    pub fn edge_by_id(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.slot()).and_then(Option::as_ref)
    }

    fn outgoing(&self, id: NodeId) -> GraphResult<&Links> {
        self.successors.get(&id).ok_or(GraphError::NodeNotFound(id))
    }

    fn incoming(&self, id: NodeId) -> GraphResult<&Links> {
        self.predecessors.get(&id).ok_or(GraphError::NodeNotFound(id))
    }

    /// Lazy iterator over the successors of `id`; clone it to restart.
    pub fn successors(&self, id: NodeId) -> GraphResult<Adjacent<'_>> {
        self.outgoing(id).map(Adjacent::new)
    }

    /// Lazy iterator over the predecessors of `id`; clone it to restart.
    pub fn predecessors(&self, id: NodeId) -> GraphResult<Adjacent<'_>> {
        self.incoming(id).map(Adjacent::new)
    }

    /// Successors of `id` together with the attributes of the connecting edges
    pub fn neighbors(&self, id: NodeId) -> GraphResult<Neighbors<'_>> {
        self.outgoing(id).map(|links| Neighbors::new(self, links))
    }

    /// Predecessors of `id` together with the attributes of the connecting
    /// edges (the adjacency of the transposed graph)
    pub fn reverse_neighbors(&self, id: NodeId) -> GraphResult<Neighbors<'_>> {
        self.incoming(id).map(|links| Neighbors::new(self, links))
    }

    pub fn out_degree(&self, id: NodeId) -> GraphResult<usize> {
        self.outgoing(id).map(|links| links.len())
    }

    pub fn in_degree(&self, id: NodeId) -> GraphResult<usize> {
        self.incoming(id).map(|links| links.len())
    }

    /// In-degree plus out-degree (a self-loop counts twice)
    pub fn degree(&self, id: NodeId) -> GraphResult<usize> {
        Ok(self.in_degree(id)? + self.out_degree(id)?)
    }

    /// Outgoing edges of `id` as `(id, v)` pairs
    pub fn out_edges(&self, id: NodeId) -> GraphResult<Vec<(NodeId, NodeId)>> {
        Ok(self.outgoing(id)?.keys().map(|&v| (id, v)).collect())
    }

    /// Incoming edges of `id` as `(u, id)` pairs
    pub fn in_edges(&self, id: NodeId) -> GraphResult<Vec<(NodeId, NodeId)>> {
        Ok(self.incoming(id)?.keys().map(|&u| (u, id)).collect())
    }

    // ------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------

    pub fn nodes(&self) -> NodeView<'_> {
        NodeView::new(self)
    }

    pub fn edges(&self) -> EdgeView<'_> {
        EdgeView::new(self)
    }

    pub fn adj(&self) -> AdjacencyView<'_> {
        AdjacencyView::new(self)
    }

    /// Get total number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get total number of edges
    pub fn edge_count(&self) -> usize {
        self.edge_total
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Clear all data from the graph
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.successors.clear();
        self.predecessors.clear();
        self.edges.clear();
        self.free_edge_ids.clear();
        self.edge_total = 0;
    }
}
