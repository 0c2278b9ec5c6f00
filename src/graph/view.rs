//! Read-only windows onto a [`Graph`]
//!
//! Views borrow the graph, so they always show its live state and cannot be
//! used to edit it. All mutation goes through the store's own methods.

use super::node::Node;
use super::property::PropertyMap;
use super::store::Graph;
use super::types::{EdgeId, NodeId};
use indexmap::IndexMap;
use std::fmt;
use std::ops::Index;

/// Adjacency of one node: neighbor id -> handle of the connecting edge
pub type Links = IndexMap<NodeId, EdgeId>;

/// Lazy iterator over neighbor ids (successors or predecessors)
#[derive(Debug, Clone)]
pub struct Adjacent<'a> {
    inner: indexmap::map::Keys<'a, NodeId, EdgeId>,
}

impl<'a> Adjacent<'a> {
    pub(super) fn new(links: &'a Links) -> Self {
        Adjacent { inner: links.keys() }
    }
}

impl Iterator for Adjacent<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        self.inner.next().copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Adjacent<'_> {}

/// Iterator over node ids in insertion order
#[derive(Debug, Clone)]
pub struct NodeIds<'a> {
    inner: indexmap::map::Keys<'a, NodeId, Node>,
}

impl Iterator for NodeIds<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        self.inner.next().copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for NodeIds<'_> {}

/// Neighbor ids of one node paired with the attributes of the connecting edge
#[derive(Clone, Copy)]
pub struct Neighbors<'a> {
    graph: &'a Graph,
    links: &'a Links,
}

impl<'a> Neighbors<'a> {
    pub(super) fn new(graph: &'a Graph, links: &'a Links) -> Self {
        Neighbors { graph, links }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.links.contains_key(&id)
    }

    /// Attributes of the edge to (or from) `id`
    pub fn get(&self, id: NodeId) -> Option<&'a PropertyMap> {
        let graph = self.graph;
        self.links
            .get(&id)
            .and_then(|&edge_id| graph.edge_by_id(edge_id))
            .map(|edge| &edge.properties)
    }

    pub fn ids(&self) -> Adjacent<'a> {
        Adjacent::new(self.links)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &'a PropertyMap)> + 'a {
        let graph = self.graph;
        let links = self.links;
        links.iter().filter_map(move |(&id, &edge_id)| {
            graph.edge_by_id(edge_id).map(|edge| (id, &edge.properties))
        })
    }
}

impl fmt::Debug for Neighbors<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Neighbors<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (id, attrs)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: ", id)?;
            fmt_properties(f, attrs)?;
        }
        write!(f, "}}")
    }
}

/// Attribute maps print with sorted keys so output is stable.
fn fmt_properties(f: &mut fmt::Formatter<'_>, attrs: &PropertyMap) -> fmt::Result {
    let mut keys: Vec<&String> = attrs.keys().collect();
    keys.sort();
    write!(f, "{{")?;
    for (i, key) in keys.into_iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}: {}", key, attrs[key])?;
    }
    write!(f, "}}")
}

/// All nodes of a graph: iteration, length, membership and attribute lookup
#[derive(Clone, Copy)]
pub struct NodeView<'a> {
    graph: &'a Graph,
}

impl<'a> NodeView<'a> {
    pub(super) fn new(graph: &'a Graph) -> Self {
        NodeView { graph }
    }

    pub fn iter(&self) -> NodeIds<'a> {
        NodeIds {
            inner: self.graph.nodes.keys(),
        }
    }

    pub fn len(&self) -> usize {
        self.graph.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.graph.nodes.contains_key(&id)
    }

    pub fn get(&self, id: NodeId) -> Option<&'a PropertyMap> {
        self.graph.nodes.get(&id).map(|node| &node.properties)
    }
}

impl<'a> IntoIterator for NodeView<'a> {
    type Item = NodeId;
    type IntoIter = NodeIds<'a>;

    fn into_iter(self) -> NodeIds<'a> {
        self.iter()
    }
}

impl Index<NodeId> for NodeView<'_> {
    type Output = PropertyMap;

    /// Panics if the node is absent, like indexing a map.
    fn index(&self, id: NodeId) -> &PropertyMap {
        match self.get(id) {
            Some(attrs) => attrs,
            None => panic!("node {} not in graph", id),
        }
    }
}

impl fmt::Display for NodeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|id| id.as_u64()))
            .finish()
    }
}

/// All edges of a graph as `(u, v)` pairs
#[derive(Clone, Copy)]
pub struct EdgeView<'a> {
    graph: &'a Graph,
}

impl<'a> EdgeView<'a> {
    pub(super) fn new(graph: &'a Graph) -> Self {
        EdgeView { graph }
    }

    /// Edges grouped by source in node order, then by target in insertion order
    pub fn iter(&self) -> EdgePairs<'a> {
        EdgePairs {
            graph: self.graph,
            sources: self.graph.nodes.keys(),
            current: None,
        }
    }

    pub fn len(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.edge_count() == 0
    }

    pub fn contains(&self, (u, v): (NodeId, NodeId)) -> bool {
        self.graph.has_edge(u, v)
    }

    pub fn get(&self, u: NodeId, v: NodeId) -> Option<&'a PropertyMap> {
        self.graph.edge_attrs(u, v)
    }
}

impl<'a> IntoIterator for EdgeView<'a> {
    type Item = (NodeId, NodeId);
    type IntoIter = EdgePairs<'a>;

    fn into_iter(self) -> EdgePairs<'a> {
        self.iter()
    }
}

impl fmt::Display for EdgeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, (u, v)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "({}, {})", u, v)?;
        }
        write!(f, "]")
    }
}

/// Iterator behind [`EdgeView::iter`]
#[derive(Debug, Clone)]
pub struct EdgePairs<'a> {
    graph: &'a Graph,
    sources: indexmap::map::Keys<'a, NodeId, Node>,
    current: Option<(NodeId, indexmap::map::Keys<'a, NodeId, EdgeId>)>,
}

impl Iterator for EdgePairs<'_> {
    type Item = (NodeId, NodeId);

    fn next(&mut self) -> Option<(NodeId, NodeId)> {
        loop {
            if let Some((u, targets)) = &mut self.current {
                if let Some(&v) = targets.next() {
                    return Some((*u, v));
                }
            }
            let &u = self.sources.next()?;
            self.current = self.graph.successors.get(&u).map(|links| (u, links.keys()));
        }
    }
}

/// Node id -> successor attribute mapping
#[derive(Clone, Copy)]
pub struct AdjacencyView<'a> {
    graph: &'a Graph,
}

impl<'a> AdjacencyView<'a> {
    pub(super) fn new(graph: &'a Graph) -> Self {
        AdjacencyView { graph }
    }

    /// Successors of `id` with edge attributes, `None` if the node is absent
    pub fn get(&self, id: NodeId) -> Option<Neighbors<'a>> {
        self.graph
            .successors
            .get(&id)
            .map(|links| Neighbors::new(self.graph, links))
    }

    pub fn iter(&self) -> NodeIds<'a> {
        NodeView::new(self.graph).iter()
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.graph.has_node(id)
    }
}

impl<'a> IntoIterator for AdjacencyView<'a> {
    type Item = NodeId;
    type IntoIter = NodeIds<'a>;

    fn into_iter(self) -> NodeIds<'a> {
        self.iter()
    }
}

impl fmt::Display for AdjacencyView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AdjacencyView({{")?;
        for (i, id) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match self.get(id) {
                Some(neighbors) => write!(f, "{}: {}", id, neighbors)?,
                None => write!(f, "{}: {{}}", id)?,
            }
        }
        write!(f, "}})")
    }
}
