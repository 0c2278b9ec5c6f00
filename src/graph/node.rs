//! Node record owned by the graph store

use super::property::{PropertyMap, PropertyValue};
use super::types::NodeId;

/// A node: caller-chosen id plus its attribute map.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub properties: PropertyMap,
}

impl Node {
    pub fn new(id: NodeId) -> Self {
        Node {
            id,
            properties: PropertyMap::new(),
        }
    }

    pub fn new_with_properties(id: NodeId, properties: PropertyMap) -> Self {
        Node { id, properties }
    }

    /// Merge attributes into this node, last write wins per key.
    pub fn merge_properties(&mut self, properties: PropertyMap) {
        self.properties.extend(properties);
    }

    /// Set a property value
    pub fn set_property(
        &mut self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Option<PropertyValue> {
        self.properties.insert(key.into(), value.into())
    }

    /// Get a property value
    pub fn get_property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    pub fn has_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}
