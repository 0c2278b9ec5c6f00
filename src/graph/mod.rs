//! Directed attributed graph store
//!
//! - Nodes keyed by caller-chosen [`NodeId`]s with open attribute maps
//! - At most one directed edge per ordered pair, with its own attributes
//! - Successor and predecessor indexes sharing one canonical edge record
//! - Live, read-only node/edge/adjacency views

pub mod edge;
pub mod node;
pub mod property;
pub mod store;
pub mod types;
pub mod view;

// Re-export main types
pub use edge::Edge;
pub use node::Node;
pub use property::{props, PropertyMap, PropertyValue};
pub use store::{Graph, GraphError, GraphResult};
pub use types::{EdgeId, NodeId};
pub use view::{Adjacent, AdjacencyView, EdgePairs, EdgeView, Links, Neighbors, NodeIds, NodeView};
