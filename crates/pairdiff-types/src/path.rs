use std::fmt;

/// Ordered sequence of field names locating a node within a tree.
///
/// Rendered by joining the keys with `.`; the empty path is the root.
/// The rendering is for display only and is never parsed back.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    keys: Vec<String>,
}

impl FieldPath {
    /// The root path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Extend the path by one key.
    pub fn push(&mut self, key: impl Into<String>) {
        self.keys.push(key.into());
    }

    /// Drop the last key. Returns it, or `None` at the root.
    pub fn pop(&mut self) -> Option<String> {
        self.keys.pop()
    }

    /// Dot-joined rendering, used as the diff map key.
    pub fn render(&self) -> String {
        self.keys.join(".")
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl<S: Into<String>> FromIterator<S> for FieldPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}
