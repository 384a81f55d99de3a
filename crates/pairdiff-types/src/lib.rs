//! Foundation types for pairdiff.
//!
//! A caller stores two payloads ("left" and "right") under a shared
//! identifier and later asks whether they are structurally equal. This crate
//! provides the vocabulary every other pairdiff crate shares.
//!
//! # Key Types
//!
//! - [`Side`] -- which of the two labeled inputs a payload belongs to
//! - [`TreeNode`] -- parsed payload, either a [`Scalar`] leaf or a [`Container`]
//! - [`FieldPath`] -- dot-joined location of a node inside a tree

pub mod error;
pub mod path;
pub mod side;
pub mod tree;

pub use error::TypeError;
pub use path::FieldPath;
pub use side::Side;
pub use tree::{Container, Scalar, TreeNode};
