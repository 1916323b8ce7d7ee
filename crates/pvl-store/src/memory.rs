use std::sync::RwLock;

use pvl_types::ChainRecord;

use crate::error::StoreResult;
use crate::traits::ChainStore;

/// In-memory chain store for tests, local demos, and embedding.
///
/// Records are held in an ordered `Vec` behind a `RwLock`; readers take a
/// point-in-time snapshot and never observe a partially appended record.
pub struct InMemoryChainStore {
    records: RwLock<Vec<ChainRecord>>,
}

impl InMemoryChainStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Returns `true` if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.read().expect("lock poisoned").is_empty()
    }
}

impl Default for InMemoryChainStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainStore for InMemoryChainStore {
    fn head(&self) -> StoreResult<Option<ChainRecord>> {
        let records = self.records.read().expect("lock poisoned");
        Ok(records.last().cloned())
    }

    fn append(&self, record: &ChainRecord) -> StoreResult<()> {
        let mut records = self.records.write().expect("lock poisoned");
        records.push(record.clone());
        Ok(())
    }

    fn read_all(&self) -> StoreResult<Vec<ChainRecord>> {
        let records = self.records.read().expect("lock poisoned");
        Ok(records.clone())
    }

    fn count(&self) -> StoreResult<u64> {
        let records = self.records.read().expect("lock poisoned");
        Ok(records.len() as u64)
    }
}

impl std::fmt::Debug for InMemoryChainStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.records.read().expect("lock poisoned").len();
        f.debug_struct("InMemoryChainStore")
            .field("record_count", &count)
            .finish()
    }
}
