//! Tree-level diff: compare two parsed payloads field by field.
//!
//! Walks the union of field names visible at each level. Keys are drawn only
//! from object containers; arrays contribute no iterable keys, so two
//! differing arrays under the same field produce no entries at all.

use std::collections::BTreeSet;

use pairdiff_types::{FieldPath, TreeNode};

use crate::entry::{DiffEntry, DiffMap, DiffValue};

/// Compare two trees and collect every differing path.
///
/// - both sides present, equal: skipped
/// - both containers: recurse, no entry for the container itself
/// - both leaves: one entry with the rendered text of each side
/// - leaf vs container: one entry holding both nodes as-is
/// - present on one side only: the present side's rendered text against
///   [`DiffValue::Unavailable`]
///
/// Pure and deterministic for a given pair of trees.
pub fn diff_trees(left: &TreeNode, right: &TreeNode) -> DiffMap {
    let mut diff = DiffMap::new();
    let mut path = FieldPath::root();
    diff_level(&mut path, left, right, &mut diff);
    diff
}

fn diff_level(path: &mut FieldPath, left: &TreeNode, right: &TreeNode, diff: &mut DiffMap) {
    for name in union_field_names(left, right) {
        path.push(name);

        match (left.field(name), right.field(name)) {
            (Some(l), Some(r)) => {
                if l != r {
                    diff_present_pair(path, l, r, diff);
                }
            }
            (l, r) => {
                diff.insert(path, DiffEntry::new(render_or_unavailable(l), render_or_unavailable(r)));
            }
        }

        path.pop();
    }
}

fn diff_present_pair(path: &mut FieldPath, left: &TreeNode, right: &TreeNode, diff: &mut DiffMap) {
    match (left, right) {
        (TreeNode::Container(_), TreeNode::Container(_)) => diff_level(path, left, right, diff),
        (TreeNode::Value(l), TreeNode::Value(r)) => {
            diff.insert(
                path,
                DiffEntry::new(DiffValue::Text(l.render()), DiffValue::Text(r.render())),
            );
        }
        _ => {
            diff.insert(
                path,
                DiffEntry::new(DiffValue::Node(left.clone()), DiffValue::Node(right.clone())),
            );
        }
    }
}

fn union_field_names<'a>(left: &'a TreeNode, right: &'a TreeNode) -> BTreeSet<&'a str> {
    left.field_names()
        .into_iter()
        .chain(right.field_names())
        .collect()
}

fn render_or_unavailable(node: Option<&TreeNode>) -> DiffValue {
    match node {
        Some(n) => DiffValue::Text(n.render_text()),
        None => DiffValue::Unavailable,
    }
}
