use tracing::{debug, info, warn};

use pairdiff_diff::diff_trees;
use pairdiff_store::{ComparisonFailure, InMemorySideStore, Outcome, PayloadRecord, SideStore};
use pairdiff_types::{Side, TreeNode};

use crate::error::{ValidateError, ValidateResult};
use crate::parser::{JsonPayloadParser, PayloadParser};

/// Orchestrates side writes and comparison reads over a [`SideStore`].
///
/// Every operation on an identifier runs under that identifier's record
/// lock, so the pair of payloads and the cached outcome always change
/// together.
pub struct Validator<S = InMemorySideStore, P = JsonPayloadParser> {
    store: S,
    parser: P,
}

impl Validator {
    /// Empty in-memory store, plain JSON payloads.
    pub fn in_memory() -> Self {
        Self::new(InMemorySideStore::new(), JsonPayloadParser)
    }
}

impl<S: SideStore, P: PayloadParser> Validator<S, P> {
    pub fn new(store: S, parser: P) -> Self {
        Self { store, parser }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }

    /// Store `raw` as the `side` payload for `id`.
    ///
    /// Any cached outcome for `id` is dropped first, even when the payload
    /// turns out to be blank. A blank payload is rejected with
    /// [`ValidateError::RequiredPayload`] and leaves the stored payload as it
    /// was.
    pub fn set_side(&self, side: Side, id: &str, raw: impl Into<String>) -> ValidateResult<()> {
        let raw = raw.into();
        self.store.with_record(id, |record| {
            if record.invalidate() {
                debug!(id, %side, "cached outcome invalidated by write");
            }
            if raw.trim().is_empty() {
                warn!(id, %side, "rejected blank payload");
                return Err(ValidateError::RequiredPayload {
                    side,
                    id: id.to_owned(),
                });
            }
            record.set_payload(side, raw);
            info!(id, %side, "payload stored");
            Ok(())
        })?
    }

    /// Compare both sides of `id`, replaying the cached outcome if present.
    ///
    /// The returned [`Outcome`] is whatever is now cached for `id`. The outer
    /// error only reports store faults.
    pub fn validate_and_diff(&self, id: &str) -> ValidateResult<Outcome> {
        debug!(id, "starting validation");
        let outcome = self.store.with_record(id, |record| {
            if let Some(cached) = record.cached_outcome() {
                debug!(id, "replaying cached outcome");
                return cached.clone();
            }
            let outcome = self.compare(id, record);
            record.cache_outcome(outcome.clone());
            outcome
        })?;

        match &outcome {
            Ok(()) => info!(id, "payloads are equal"),
            Err(failure) => info!(id, kind = failure.kind(), "payloads do not match"),
        }
        Ok(outcome)
    }

    /// Like [`Self::validate_and_diff`], with any failure surfaced as an error.
    pub fn get_diff(&self, id: &str) -> ValidateResult<()> {
        self.validate_and_diff(id)?.map_err(ValidateError::from)
    }

    /// The outcome currently cached for `id`, without computing one.
    pub fn cached_outcome(&self, id: &str) -> ValidateResult<Option<Outcome>> {
        Ok(self
            .store
            .inspect_record(id, |record| record.cached_outcome().cloned())?
            .flatten())
    }

    fn compare(&self, id: &str, record: &PayloadRecord) -> Outcome {
        let left = required_payload(record, Side::Left, id)?;
        let right = required_payload(record, Side::Right, id)?;

        let (left_len, right_len) = (left.chars().count(), right.chars().count());
        if left_len != right_len {
            return Err(ComparisonFailure::SizeMismatch {
                left: left_len,
                right: right_len,
            });
        }

        let left_tree = self.parse_side(Side::Left, left)?;
        let right_tree = self.parse_side(Side::Right, right)?;
        if left_tree == right_tree {
            return Ok(());
        }

        Err(ComparisonFailure::ContentMismatch(diff_trees(
            &left_tree,
            &right_tree,
        )))
    }

    fn parse_side(&self, side: Side, raw: &str) -> Result<TreeNode, ComparisonFailure> {
        self.parser.parse(raw).map_err(|err| {
            warn!(%side, error = %err, "payload could not be deserialized");
            ComparisonFailure::Deserialization {
                side,
                cause: err.to_string(),
            }
        })
    }
}

fn required_payload<'a>(
    record: &'a PayloadRecord,
    side: Side,
    id: &str,
) -> Result<&'a str, ComparisonFailure> {
    record
        .payload(side)
        .ok_or_else(|| ComparisonFailure::MissingInMemory {
            side,
            id: id.to_owned(),
        })
}

impl<S: std::fmt::Debug, P: std::fmt::Debug> std::fmt::Debug for Validator<S, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("store", &self.store)
            .field("parser", &self.parser)
            .finish()
    }
}
