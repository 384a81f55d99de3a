use pairdiff_types::Side;

use crate::error::StoreResult;
use crate::record::PayloadRecord;

/// Keyed storage of side payloads and cached outcomes.
///
/// All implementations must satisfy these invariants:
/// - `with_record` grants exclusive access to one identifier's record for the
///   duration of the closure; no other caller observes it half-updated.
/// - Exclusive access to one identifier never blocks another identifier.
/// - The store never interprets payload contents.
pub trait SideStore: Send + Sync {
    /// Run `f` with exclusive access to the record for `id`, creating an
    /// empty record first if none exists.
    fn with_record<R>(&self, id: &str, f: impl FnOnce(&mut PayloadRecord) -> R) -> StoreResult<R>;

    /// Run `f` against the record for `id` if it exists.
    ///
    /// Returns `Ok(None)` without creating anything when the id is unknown.
    fn inspect_record<R>(
        &self,
        id: &str,
        f: impl FnOnce(&PayloadRecord) -> R,
    ) -> StoreResult<Option<R>>;

    /// Overwrite the payload for (`side`, `id`).
    ///
    /// This is the raw keyed write: it performs no validation and leaves the
    /// cached outcome alone. Callers that keep outcomes consistent go through
    /// [`Self::with_record`] instead.
    fn set_side(&self, side: Side, id: &str, raw: String) -> StoreResult<()> {
        self.with_record(id, |record| record.set_payload(side, raw))
    }

    /// The stored payload for (`side`, `id`), if any.
    fn get_side(&self, side: Side, id: &str) -> StoreResult<Option<String>> {
        Ok(self
            .inspect_record(id, |record| record.payload(side).map(str::to_owned))?
            .flatten())
    }
}
