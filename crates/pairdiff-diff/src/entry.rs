//! Diff result types and their wire shape.
//!
//! A [`DiffMap`] serializes as a JSON object keyed by rendered field path,
//! each value being `{"left": <value>, "right": <value>}`.

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use pairdiff_types::{FieldPath, TreeNode};

/// Sentinel recorded for a side on which a field does not exist.
pub const UNAVAILABLE_FIELD: &str = "unavailable field";

/// What one side contributes to a diff entry.
#[derive(Clone, Debug, PartialEq)]
pub enum DiffValue {
    /// Rendered leaf text (or the empty rendering of a container).
    Text(String),
    /// The field is absent on this side.
    Unavailable,
    /// Raw sub-node, kept when the other side is of a different kind.
    Node(TreeNode),
}

impl DiffValue {
    /// Rendered text, or `None` for raw nodes. `Unavailable` yields the sentinel.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Unavailable => Some(UNAVAILABLE_FIELD),
            Self::Node(_) => None,
        }
    }
}

impl Serialize for DiffValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(s) => serializer.serialize_str(s),
            Self::Unavailable => serializer.serialize_str(UNAVAILABLE_FIELD),
            Self::Node(node) => node.serialize(serializer),
        }
    }
}

/// The pair of differing values recorded at one path.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DiffEntry {
    pub left: DiffValue,
    pub right: DiffValue,
}

impl DiffEntry {
    pub fn new(left: DiffValue, right: DiffValue) -> Self {
        Self { left, right }
    }
}

/// Differences between two trees, keyed by rendered field path.
///
/// Empty iff the compared trees had no reportable disagreement.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DiffMap {
    entries: BTreeMap<String, DiffEntry>,
}

impl DiffMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a difference at `path`, replacing any earlier entry there.
    pub fn insert(&mut self, path: &FieldPath, entry: DiffEntry) {
        self.entries.insert(path.render(), entry);
    }

    /// Look up an entry by its rendered path.
    pub fn get(&self, path: &str) -> Option<&DiffEntry> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Rendered paths in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, DiffEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a DiffMap {
    type Item = (&'a String, &'a DiffEntry);
    type IntoIter = btree_map::Iter<'a, String, DiffEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(keys: &[&str]) -> FieldPath {
        keys.iter().copied().collect()
    }

    #[test]
    fn unavailable_serializes_as_sentinel() {
        let entry = DiffEntry::new(DiffValue::Text("value1".into()), DiffValue::Unavailable);
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({"left": "value1", "right": "unavailable field"})
        );
    }

    #[test]
    fn raw_nodes_serialize_as_nested_json() {
        let left = TreeNode::parse(r#"{"innerField1":"innerValue1"}"#).unwrap();
        let right = TreeNode::parse("true").unwrap();
        let entry = DiffEntry::new(DiffValue::Node(left), DiffValue::Node(right));
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({"left": {"innerField1": "innerValue1"}, "right": true})
        );
    }

    #[test]
    fn map_is_keyed_by_rendered_path() {
        let mut diff = DiffMap::new();
        diff.insert(
            &path(&["field3", "innerField1"]),
            DiffEntry::new(DiffValue::Text("a".into()), DiffValue::Text("b".into())),
        );
        assert!(diff.contains("field3.innerField1"));
        assert_eq!(diff.len(), 1);
        assert_eq!(
            serde_json::to_value(&diff).unwrap(),
            json!({"field3.innerField1": {"left": "a", "right": "b"}})
        );
    }

    #[test]
    fn empty_map_serializes_as_empty_object() {
        assert_eq!(serde_json::to_value(DiffMap::new()).unwrap(), json!({}));
    }
}
