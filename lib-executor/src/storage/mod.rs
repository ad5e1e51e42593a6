//! Contract Storage
//!
//! A flat key/value store shared by every account. Keys are namespaced by
//! account address, so an account's state is exactly the set of keys under
//! its prefix. Contract code never holds persistent fields of its own; it
//! works through a [`StateHandle`] for whichever account the execution
//! context says it is running against.
//!
//! # Storage Format
//!
//! - `{account(32 bytes)}:{slot}` - bincode-encoded value

pub mod pending;

pub use pending::PendingStorage;

use lib_types::Address;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::errors::{StorageError, StorageResult};

/// Contract storage interface
///
/// All methods take `&self` to allow shared access. Implementations use
/// interior mutability to stay thread-safe.
pub trait ContractStorage {
    /// Get value from storage
    fn get(&self, key: &[u8]) -> StorageResult<Option<Vec<u8>>>;

    /// Set value in storage
    fn set(&self, key: &[u8], value: &[u8]) -> StorageResult<()>;

    /// Delete value from storage
    fn delete(&self, key: &[u8]) -> StorageResult<()>;

    /// Check if key exists in storage
    fn exists(&self, key: &[u8]) -> StorageResult<bool>;
}

/// Simple in-memory storage implementation
///
/// Uses `Arc<Mutex<>>` so clones share the same underlying map.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    data: Arc<Mutex<HashMap<Vec<u8>, Vec<u8>>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> StorageResult<usize> {
        let data = self
            .data
            .lock()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;
        Ok(data.len())
    }

    pub fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl ContractStorage for MemoryStorage {
    fn get(&self, key: &[u8]) -> StorageResult<Option<Vec<u8>>> {
        let data = self
            .data
            .lock()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;
        Ok(data.get(key).cloned())
    }

    fn set(&self, key: &[u8], value: &[u8]) -> StorageResult<()> {
        let mut data = self
            .data
            .lock()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;
        data.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> StorageResult<()> {
        let mut data = self
            .data
            .lock()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;
        data.remove(key);
        Ok(())
    }

    fn exists(&self, key: &[u8]) -> StorageResult<bool> {
        let data = self
            .data
            .lock()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;
        Ok(data.contains_key(key))
    }
}

/// Build the physical key for `slot` in `account`'s namespace
pub fn generate_storage_key(account: &Address, slot: &[u8]) -> Vec<u8> {
    let mut key = Vec::with_capacity(33 + slot.len());
    key.extend_from_slice(account.as_bytes());
    key.push(b':');
    key.extend_from_slice(slot);
    key
}

/// Build a slot name for a mapping entry: `{prefix}/{part}/{part}...`
pub fn map_slot(prefix: &[u8], parts: &[&[u8]]) -> Vec<u8> {
    let mut slot = prefix.to_vec();
    for part in parts {
        slot.push(b'/');
        slot.extend_from_slice(part);
    }
    slot
}

/// Typed view of one account's storage
#[derive(Clone, Copy)]
pub struct StateHandle<'a> {
    storage: &'a dyn ContractStorage,
    account: Address,
}

impl<'a> StateHandle<'a> {
    pub fn new(storage: &'a dyn ContractStorage, account: Address) -> Self {
        Self { storage, account }
    }

    /// The account this handle reads and writes
    pub fn account(&self) -> Address {
        self.account
    }

    pub fn get<T: DeserializeOwned>(&self, slot: &[u8]) -> StorageResult<Option<T>> {
        match self.storage.get(&generate_storage_key(&self.account, slot))? {
            Some(bytes) => Ok(Some(bincode::deserialize(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Read a slot, falling back to `T::default()` when it was never written
    pub fn get_or_default<T: DeserializeOwned + Default>(&self, slot: &[u8]) -> StorageResult<T> {
        Ok(self.get(slot)?.unwrap_or_default())
    }

    pub fn set<T: Serialize>(&self, slot: &[u8], value: &T) -> StorageResult<()> {
        let bytes = bincode::serialize(value)?;
        self.storage
            .set(&generate_storage_key(&self.account, slot), &bytes)
    }

    pub fn delete(&self, slot: &[u8]) -> StorageResult<()> {
        self.storage
            .delete(&generate_storage_key(&self.account, slot))
    }

    pub fn exists(&self, slot: &[u8]) -> StorageResult<bool> {
        self.storage
            .exists(&generate_storage_key(&self.account, slot))
    }
}

impl std::fmt::Debug for StateHandle<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateHandle")
            .field("account", &self.account)
            .finish()
    }
}
