use pairdiff_types::Side;

use crate::outcome::Outcome;

/// Everything stored for one identifier.
///
/// Payloads and the cached outcome live together so a single lock can cover
/// write, invalidation, and recomputation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PayloadRecord {
    left: Option<String>,
    right: Option<String>,
    outcome: Option<Outcome>,
}

impl PayloadRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently written payload for `side`.
    pub fn payload(&self, side: Side) -> Option<&str> {
        match side {
            Side::Left => self.left.as_deref(),
            Side::Right => self.right.as_deref(),
        }
    }

    /// Overwrite the payload for `side`. Does not touch the cached outcome.
    pub fn set_payload(&mut self, side: Side, raw: String) {
        match side {
            Side::Left => self.left = Some(raw),
            Side::Right => self.right = Some(raw),
        }
    }

    pub fn cached_outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Memoize `outcome`, replacing whatever was cached.
    pub fn cache_outcome(&mut self, outcome: Outcome) {
        self.outcome = Some(outcome);
    }

    /// Drop the cached outcome. Returns `true` if one was present.
    pub fn invalidate(&mut self) -> bool {
        self.outcome.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::ComparisonFailure;

    #[test]
    fn payloads_are_independent_per_side() {
        let mut record = PayloadRecord::new();
        assert_eq!(record.payload(Side::Left), None);
        record.set_payload(Side::Left, "l".into());
        assert_eq!(record.payload(Side::Left), Some("l"));
        assert_eq!(record.payload(Side::Right), None);
    }

    #[test]
    fn set_payload_overwrites() {
        let mut record = PayloadRecord::new();
        record.set_payload(Side::Right, "first".into());
        record.set_payload(Side::Right, "second".into());
        assert_eq!(record.payload(Side::Right), Some("second"));
    }

    #[test]
    fn invalidate_reports_presence() {
        let mut record = PayloadRecord::new();
        assert!(!record.invalidate());
        record.cache_outcome(Err(ComparisonFailure::SizeMismatch { left: 1, right: 2 }));
        assert!(record.cached_outcome().is_some());
        assert!(record.invalidate());
        assert!(record.cached_outcome().is_none());
    }
}
