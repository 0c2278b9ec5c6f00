//! Attribute values carried by nodes and edges
//!
//! Attributes are an open key/value bag, but the value side is a closed set
//! of kinds so the store stays strongly typed.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Attribute value attached to a node or an edge
///
/// Supports:
/// - Boolean
/// - Integer (i64)
/// - Float (f64)
/// - String
/// - Point (coordinate pair, e.g. a drawing position or lon/lat)
///
/// Serialized untagged: `true`, `6`, `2.5`, `"main st"`, `[12.9, 77.5]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Point(f64, f64),
}

impl PropertyValue {
    /// Get string value if this is a string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get integer value if this is an integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PropertyValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get float value if this is a float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            PropertyValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get boolean value if this is a boolean
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            PropertyValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the coordinate pair if this is a point
    pub fn as_point(&self) -> Option<(f64, f64)> {
        match self {
            PropertyValue::Point(x, y) => Some((*x, *y)),
            _ => None,
        }
    }

    /// Numeric view used for edge weights: integers widen to `f64`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropertyValue::Integer(i) => Some(*i as f64),
            PropertyValue::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Boolean(b) => write!(f, "{}", b),
            PropertyValue::Integer(i) => write!(f, "{}", i),
            PropertyValue::Float(fl) => write!(f, "{}", fl),
            PropertyValue::String(s) => write!(f, "\"{}\"", s),
            PropertyValue::Point(x, y) => write!(f, "({}, {})", x, y),
        }
    }
}

// Convenience conversions
impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Integer(i)
    }
}

impl From<i32> for PropertyValue {
    fn from(i: i32) -> Self {
        PropertyValue::Integer(i as i64)
    }
}

impl From<f64> for PropertyValue {
    fn from(f: f64) -> Self {
        PropertyValue::Float(f)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Boolean(b)
    }
}

impl From<(f64, f64)> for PropertyValue {
    fn from((x, y): (f64, f64)) -> Self {
        PropertyValue::Point(x, y)
    }
}

/// Property map for storing node and edge attributes
pub type PropertyMap = HashMap<String, PropertyValue>;

/// Build a [`PropertyMap`] from `(key, value)` pairs.
///
/// ```
/// use netopt::graph::props;
///
/// let attrs = props([("length", 6)]);
/// assert_eq!(attrs["length"].as_integer(), Some(6));
/// ```
pub fn props<K, V, I>(pairs: I) -> PropertyMap
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<PropertyValue>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_value_conversions() {
        let string_prop: PropertyValue = "hello".into();
        assert_eq!(string_prop.as_string(), Some("hello"));

        let int_prop: PropertyValue = 42i64.into();
        assert_eq!(int_prop.as_integer(), Some(42));

        let float_prop: PropertyValue = 3.5.into();
        assert_eq!(float_prop.as_float(), Some(3.5));

        let bool_prop: PropertyValue = true.into();
        assert_eq!(bool_prop.as_boolean(), Some(true));

        let point_prop: PropertyValue = (4.0, -2.0).into();
        assert_eq!(point_prop.as_point(), Some((4.0, -2.0)));
    }

    #[test]
    fn test_as_number_widens_integers() {
        assert_eq!(PropertyValue::Integer(7).as_number(), Some(7.0));
        assert_eq!(PropertyValue::Float(0.25).as_number(), Some(0.25));
        assert_eq!(PropertyValue::String("7".into()).as_number(), None);
        assert_eq!(PropertyValue::Point(1.0, 1.0).as_number(), None);
    }

    #[test]
    fn test_props_builder() {
        let attrs = props([("name", "A"), ("kind", "junction")]);
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get("name").unwrap().as_string(), Some("A"));
    }

    #[test]
    fn test_untagged_json_shapes() {
        let parsed: PropertyMap = serde_json::from_str(
            r#"{"length": 6, "speed": 2.5, "oneway": true, "name": "x", "pos": [0.0, 4.0]}"#,
        )
        .unwrap();
        assert_eq!(parsed["length"], PropertyValue::Integer(6));
        assert_eq!(parsed["speed"], PropertyValue::Float(2.5));
        assert_eq!(parsed["oneway"], PropertyValue::Boolean(true));
        assert_eq!(parsed["name"], PropertyValue::String("x".into()));
        assert_eq!(parsed["pos"], PropertyValue::Point(0.0, 4.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(PropertyValue::Point(1.5, 2.0).to_string(), "(1.5, 2)");
        assert_eq!(PropertyValue::String("a".into()).to_string(), "\"a\"");
    }
}
