//! Canonical edge record
//!
//! There is exactly one `Edge` per ordered `(source, target)` pair. The
//! successor and predecessor indexes of the store both point at it through
//! its [`EdgeId`].

use super::property::{PropertyMap, PropertyValue};
use super::types::{EdgeId, NodeId};

/// A directed edge `source -> target` with attributes (e.g. `length`).
#[derive(Debug, Clone)]
pub struct Edge {
    /// Arena slot of this record
    pub id: EdgeId,

    /// Source node (edge goes FROM this node)
    pub source: NodeId,

    /// Target node (edge goes TO this node)
    pub target: NodeId,

    pub properties: PropertyMap,
}

impl Edge {
    pub fn new(id: EdgeId, source: NodeId, target: NodeId, properties: PropertyMap) -> Self {
        Edge {
            id,
            source,
            target,
            properties,
        }
    }

    /// Set a property value
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Get a property value
    pub fn get_property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    pub fn has_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// The ordered pair this edge connects.
    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.source, self.target)
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.source == other.source && self.target == other.target
    }
}

impl Eq for Edge {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::property::props;

    #[test]
    fn test_edge_properties() {
        let mut edge = Edge::new(EdgeId::new(0), NodeId::new(1), NodeId::new(2), props([("length", 6)]));
        assert_eq!(edge.get_property("length").unwrap().as_number(), Some(6.0));

        edge.set_property("length", 2.5);
        assert_eq!(edge.get_property("length").unwrap().as_float(), Some(2.5));
        assert!(!edge.has_property("weight"));
    }

    #[test]
    fn test_endpoints() {
        let edge = Edge::new(EdgeId::new(3), NodeId::new(4), NodeId::new(9), PropertyMap::new());
        assert_eq!(edge.endpoints(), (NodeId::new(4), NodeId::new(9)));
        assert!(!edge.is_self_loop());

        let lp = Edge::new(EdgeId::new(4), NodeId::new(5), NodeId::new(5), PropertyMap::new());
        assert!(lp.is_self_loop());
    }

    #[test]
    fn test_reused_slot_is_a_different_edge() {
        let removed = Edge::new(EdgeId::new(0), NodeId::new(1), NodeId::new(2), PropertyMap::new());
        let live = Edge::new(EdgeId::new(0), NodeId::new(7), NodeId::new(8), PropertyMap::new());
        assert_ne!(removed, live);

        let relabelled = Edge::new(EdgeId::new(0), NodeId::new(1), NodeId::new(2), props([("length", 3)]));
        assert_eq!(removed, relabelled);
    }
}
