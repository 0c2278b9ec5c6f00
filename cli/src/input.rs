//! Graph documents read from disk
//!
//! ```json
//! {
//!   "nodes": [{"id": 1, "attrs": {"pos": [0.0, 0.0]}}],
//!   "edges": [{"source": 1, "target": 2, "attrs": {"length": 6}}]
//! }
//! ```
//!
//! `nodes` may be omitted; edge endpoints are created on demand.

use anyhow::{Context, Result};
use netopt::{Graph, NodeId, PropertyMap};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    #[serde(default)]
    pub attrs: PropertyMap,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EdgeRecord {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default)]
    pub attrs: PropertyMap,
}

impl GraphDocument {
    pub fn into_graph(self) -> Graph {
        let mut graph = Graph::with_capacity(self.nodes.len(), self.edges.len());
        for node in self.nodes {
            graph.add_node(node.id, node.attrs);
        }
        for edge in self.edges {
            graph.add_edge(edge.source, edge.target, edge.attrs);
        }
        graph
    }
}

/// Parse a graph document from JSON text.
pub fn parse_graph(text: &str) -> Result<Graph> {
    let document: GraphDocument = serde_json::from_str(text).context("invalid graph document")?;
    Ok(document.into_graph())
}

/// Read and parse the graph document at `path`.
pub fn load_graph(path: &Path) -> Result<Graph> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read graph file {}", path.display()))?;
    let graph = parse_graph(&text).with_context(|| format!("failed to load {}", path.display()))?;
    info!(
        "loaded {} nodes and {} edges from {}",
        graph.node_count(),
        graph.edge_count(),
        path.display()
    );
    Ok(graph)
}
