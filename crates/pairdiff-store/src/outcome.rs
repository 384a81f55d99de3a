//! Memoized comparison outcomes.

use pairdiff_diff::DiffMap;
use pairdiff_types::Side;

/// A comparison-stage failure for one identifier.
///
/// Failures are plain values: a cached failure is replayed by cloning it,
/// never by recomputing.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ComparisonFailure {
    /// A side was read before any payload was written to it.
    #[error("the {side} memory does not contain a payload set for the id {id}")]
    MissingInMemory { side: Side, id: String },

    /// The raw payloads differ in character count.
    #[error("left and right payloads has different size: left {left} bytes and right {right} bytes")]
    SizeMismatch { left: usize, right: usize },

    /// Both payloads parsed but their trees differ.
    #[error("both payloads contains different content/values")]
    ContentMismatch(DiffMap),

    /// A payload could not be decoded or parsed.
    #[error("the {side} payload is invalid and cannot be deserialized")]
    Deserialization { side: Side, cause: String },
}

impl ComparisonFailure {
    /// Short stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingInMemory { .. } => "missing_in_memory",
            Self::SizeMismatch { .. } => "size_mismatch",
            Self::ContentMismatch(_) => "content_mismatch",
            Self::Deserialization { .. } => "deserialization",
        }
    }
}

/// Result of one full validation: `Ok(())` when both payloads are equal.
pub type Outcome = Result<(), ComparisonFailure>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_side_and_id() {
        let failure = ComparisonFailure::MissingInMemory {
            side: Side::Right,
            id: "42".into(),
        };
        assert_eq!(
            failure.to_string(),
            "the right memory does not contain a payload set for the id 42"
        );
    }

    #[test]
    fn size_mismatch_message_carries_both_lengths() {
        let failure = ComparisonFailure::SizeMismatch { left: 32, right: 36 };
        assert_eq!(
            failure.to_string(),
            "left and right payloads has different size: left 32 bytes and right 36 bytes"
        );
        assert_eq!(failure.kind(), "size_mismatch");
    }

    #[test]
    fn deserialization_message_names_side() {
        let failure = ComparisonFailure::Deserialization {
            side: Side::Left,
            cause: "bad".into(),
        };
        assert_eq!(
            failure.to_string(),
            "the left payload is invalid and cannot be deserialized"
        );
    }
}
