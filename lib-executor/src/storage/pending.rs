//! Write overlay for atomic transactions
//!
//! Every write made while a transaction runs lands in the overlay. Reads see
//! the overlay first and fall through to the base storage. On success the
//! executor commits the overlay; on any failure the overlay is dropped and the
//! base storage is exactly as it was before the transaction.

use std::collections::BTreeMap;
use std::sync::Mutex;

use super::ContractStorage;
use crate::errors::{StorageError, StorageResult};

/// Staged writes: `Some(value)` = set, `None` = delete
type Writes = BTreeMap<Vec<u8>, Option<Vec<u8>>>;

pub struct PendingStorage<'a> {
    base: &'a dyn ContractStorage,
    writes: Mutex<Writes>,
}

impl<'a> PendingStorage<'a> {
    pub fn new(base: &'a dyn ContractStorage) -> Self {
        Self {
            base,
            writes: Mutex::new(BTreeMap::new()),
        }
    }

    /// Number of staged writes
    pub fn pending_writes(&self) -> StorageResult<usize> {
        Ok(self.lock()?.len())
    }

    /// Apply every staged write to the base storage
    pub fn commit(self) -> StorageResult<usize> {
        let writes = self
            .writes
            .into_inner()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;
        let count = writes.len();

        for (key, value) in writes {
            match value {
                Some(value) => self.base.set(&key, &value)?,
                None => self.base.delete(&key)?,
            }
        }

        Ok(count)
    }

    /// Drop every staged write
    pub fn discard(self) {}

    fn lock(&self) -> StorageResult<std::sync::MutexGuard<'_, Writes>> {
        self.writes
            .lock()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))
    }
}

impl ContractStorage for PendingStorage<'_> {
    fn get(&self, key: &[u8]) -> StorageResult<Option<Vec<u8>>> {
        if let Some(staged) = self.lock()?.get(key) {
            return Ok(staged.clone());
        }
        self.base.get(key)
    }

    fn set(&self, key: &[u8], value: &[u8]) -> StorageResult<()> {
        self.lock()?.insert(key.to_vec(), Some(value.to_vec()));
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> StorageResult<()> {
        self.lock()?.insert(key.to_vec(), None);
        Ok(())
    }

    fn exists(&self, key: &[u8]) -> StorageResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}
