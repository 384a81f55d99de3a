//! Parsed payload trees.
//!
//! Every decoded payload is turned into a [`TreeNode`] at parse time. The
//! node kind (leaf value or container) is fixed then, so comparison code
//! matches on variants instead of probing types at runtime.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use serde_json::{Map, Number, Value};

use crate::error::TypeError;

/// A primitive leaf value.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl Scalar {
    /// Canonical text rendering: strings unquoted, everything else in its
    /// JSON literal form.
    pub fn render(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => n.to_string(),
            Self::String(s) => s.clone(),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(n.clone()),
            Self::String(s) => Value::String(s.clone()),
        }
    }
}

/// A node with named or indexed children.
#[derive(Clone, Debug, PartialEq)]
pub enum Container {
    Object(BTreeMap<String, TreeNode>),
    Array(Vec<TreeNode>),
}

impl Container {
    /// Named children in key order. Arrays expose no field names.
    pub fn field_names(&self) -> Vec<&str> {
        match self {
            Self::Object(fields) => fields.keys().map(String::as_str).collect(),
            Self::Array(_) => Vec::new(),
        }
    }

    /// Look up a named child. Always `None` for arrays.
    pub fn field(&self, name: &str) -> Option<&TreeNode> {
        match self {
            Self::Object(fields) => fields.get(name),
            Self::Array(_) => None,
        }
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        match self {
            Self::Object(fields) => fields.len(),
            Self::Array(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn to_json(&self) -> Value {
        match self {
            Self::Object(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect::<Map<String, Value>>(),
            ),
            Self::Array(items) => Value::Array(items.iter().map(TreeNode::to_json).collect()),
        }
    }
}

/// A parsed payload node: exactly one of a leaf value or a container.
///
/// Equality is structural and recursive.
#[derive(Clone, Debug, PartialEq)]
pub enum TreeNode {
    Value(Scalar),
    Container(Container),
}

impl TreeNode {
    /// Parse JSON text into a tree.
    pub fn parse(text: &str) -> Result<Self, TypeError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| TypeError::InvalidJson(e.to_string()))?;
        Ok(Self::from(value))
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Self::Container(_))
    }

    /// Field names visible at this node. Leaves and arrays have none.
    pub fn field_names(&self) -> Vec<&str> {
        match self {
            Self::Container(c) => c.field_names(),
            Self::Value(_) => Vec::new(),
        }
    }

    /// Named child lookup. `None` for leaves, arrays, and absent keys.
    pub fn field(&self, name: &str) -> Option<&TreeNode> {
        match self {
            Self::Container(c) => c.field(name),
            Self::Value(_) => None,
        }
    }

    /// Text rendering of this node.
    ///
    /// Leaves render through [`Scalar::render`]. Containers have no text form
    /// and render as the empty string.
    pub fn render_text(&self) -> String {
        match self {
            Self::Value(s) => s.render(),
            Self::Container(_) => String::new(),
        }
    }

    /// Convert back into a JSON value, preserving nesting.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Value(s) => s.to_json(),
            Self::Container(c) => c.to_json(),
        }
    }
}

impl From<Value> for TreeNode {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Value(Scalar::Null),
            Value::Bool(b) => Self::Value(Scalar::Bool(b)),
            Value::Number(n) => Self::Value(Scalar::Number(n)),
            Value::String(s) => Self::Value(Scalar::String(s)),
            Value::Array(items) => Self::Container(Container::Array(
                items.into_iter().map(TreeNode::from).collect(),
            )),
            Value::Object(fields) => Self::Container(Container::Object(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, TreeNode::from(v)))
                    .collect(),
            )),
        }
    }
}

impl From<&TreeNode> for Value {
    fn from(node: &TreeNode) -> Self {
        node.to_json()
    }
}

impl Serialize for TreeNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn parse_object_as_container() {
        let node = TreeNode::parse(r#"{"a":"b","n":1}"#).unwrap();
        assert!(node.is_container());
        assert_eq!(node.field_names(), vec!["a", "n"]);
        assert_eq!(node.field("a").unwrap().render_text(), "b");
        assert_eq!(node.field("n").unwrap().render_text(), "1");
        assert!(node.field("missing").is_none());
    }

    #[test]
    fn parse_scalar_documents() {
        assert_eq!(TreeNode::parse("true").unwrap(), TreeNode::Value(Scalar::Bool(true)));
        assert_eq!(TreeNode::parse("null").unwrap().render_text(), "null");
        assert_eq!(TreeNode::parse("\"x\"").unwrap().render_text(), "x");
    }

    #[test]
    fn parse_rejects_malformed_text() {
        let err = TreeNode::parse("{\"a\":").unwrap_err();
        assert!(matches!(err, TypeError::InvalidJson(_)));
        assert!(TreeNode::parse("not json").is_err());
    }

    #[test]
    fn arrays_expose_no_field_names() {
        let node = TreeNode::parse("[1,2,3]").unwrap();
        assert!(node.is_container());
        assert!(node.field_names().is_empty());
        assert!(node.field("0").is_none());
        match node {
            TreeNode::Container(c) => assert_eq!(c.len(), 3),
            other => panic!("expected container, got {other:?}"),
        }
    }

    #[test]
    fn containers_render_as_empty_text() {
        let node = TreeNode::parse(r#"{"inner":{"k":"v"}}"#).unwrap();
        assert_eq!(node.field("inner").unwrap().render_text(), "");
    }

    #[test]
    fn structural_equality_ignores_key_order() {
        let a = TreeNode::parse(r#"{"x":1,"y":{"z":[true,null]}}"#).unwrap();
        let b = TreeNode::parse(r#"{"y":{"z":[true,null]},"x":1}"#).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn integer_and_float_are_distinct() {
        let a = TreeNode::parse("1").unwrap();
        let b = TreeNode::parse("1.0").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn serializes_as_nested_json() {
        let node = TreeNode::parse(r#"{"innerField1":"innerValue1","list":[1,false]}"#).unwrap();
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value, json!({"innerField1": "innerValue1", "list": [1, false]}));
    }

    fn arb_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| json!(n)),
            "[a-z]{0,8}".prop_map(Value::String),
        ];
        leaf.prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,4}", inner, 0..4)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn json_conversion_preserves_structure(value in arb_json()) {
            let node = TreeNode::from(value.clone());
            prop_assert_eq!(node.to_json(), value);
        }
    }
}
