use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::record::PayloadRecord;
use crate::traits::SideStore;

type Slot = Arc<Mutex<PayloadRecord>>;

/// In-memory, HashMap-based side store.
///
/// The outer `RwLock` only guards the id-to-slot index and is held just long
/// enough to find or create a slot. Each slot carries its own `Mutex`, so
/// work on one identifier never serializes work on another.
pub struct InMemorySideStore {
    records: RwLock<HashMap<String, Slot>>,
}

impl InMemorySideStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Number of identifiers with a record.
    pub fn len(&self) -> usize {
        self.records.read().map(|map| map.len()).unwrap_or(0)
    }

    /// Returns `true` if no identifier has a record.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sorted list of all identifiers with a record.
    pub fn ids(&self) -> StoreResult<Vec<String>> {
        let map = self
            .records
            .read()
            .map_err(|_| StoreError::LockPoisoned("record index"))?;
        let mut ids: Vec<String> = map.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }

    /// Remove every record.
    pub fn clear(&self) -> StoreResult<()> {
        self.records
            .write()
            .map_err(|_| StoreError::LockPoisoned("record index"))?
            .clear();
        Ok(())
    }

    fn existing_slot(&self, id: &str) -> StoreResult<Option<Slot>> {
        let map = self
            .records
            .read()
            .map_err(|_| StoreError::LockPoisoned("record index"))?;
        Ok(map.get(id).map(Arc::clone))
    }

    fn slot(&self, id: &str) -> StoreResult<Slot> {
        if let Some(slot) = self.existing_slot(id)? {
            return Ok(slot);
        }
        let mut map = self
            .records
            .write()
            .map_err(|_| StoreError::LockPoisoned("record index"))?;
        let slot = map.entry(id.to_owned()).or_insert_with(|| {
            debug!(id, "creating payload record");
            Slot::default()
        });
        Ok(Arc::clone(slot))
    }
}

impl Default for InMemorySideStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SideStore for InMemorySideStore {
    fn with_record<R>(&self, id: &str, f: impl FnOnce(&mut PayloadRecord) -> R) -> StoreResult<R> {
        let slot = self.slot(id)?;
        let mut record = slot
            .lock()
            .map_err(|_| StoreError::LockPoisoned("payload record"))?;
        Ok(f(&mut record))
    }

    fn inspect_record<R>(
        &self,
        id: &str,
        f: impl FnOnce(&PayloadRecord) -> R,
    ) -> StoreResult<Option<R>> {
        let Some(slot) = self.existing_slot(id)? else {
            return Ok(None);
        };
        let record = slot
            .lock()
            .map_err(|_| StoreError::LockPoisoned("payload record"))?;
        Ok(Some(f(&record)))
    }
}

impl std::fmt::Debug for InMemorySideStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemorySideStore")
            .field("record_count", &self.len())
            .finish()
    }
}
