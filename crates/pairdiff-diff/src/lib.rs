//! Diff engine for pairdiff.
//!
//! Compares two parsed payload trees and produces a mapping from dot-joined
//! field path to the differing values on each side. Only disagreeing paths
//! appear in the result; equal subtrees contribute nothing.
//!
//! # Key Types
//!
//! - [`DiffMap`] -- path-keyed collection of differences
//! - [`DiffEntry`] / [`DiffValue`] -- the left/right pair recorded for one path

pub mod entry;
pub mod tree_diff;

pub use entry::{DiffEntry, DiffMap, DiffValue, UNAVAILABLE_FIELD};
pub use tree_diff::diff_trees;
