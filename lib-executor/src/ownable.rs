//! Shared owner slot
//!
//! The front door and every logic unit it forwards to read the owner from the
//! same slot of the same account. Transferring token ownership therefore also
//! transfers the right to repoint the front door.

use lib_types::Address;
use thiserror::Error;

use crate::errors::{ExecutionError, StorageError, StorageResult};
use crate::storage::StateHandle;

pub const OWNER_SLOT: &[u8] = b"ownable/owner";

/// Current owner (zero when never set)
pub fn owner(state: &StateHandle<'_>) -> StorageResult<Address> {
    state.get_or_default(OWNER_SLOT)
}

pub fn set_owner(state: &StateHandle<'_>, new_owner: Address) -> StorageResult<()> {
    state.set(OWNER_SLOT, &new_owner)
}

pub fn is_owner(state: &StateHandle<'_>, account: &Address) -> StorageResult<bool> {
    let current = owner(state)?;
    Ok(!current.is_zero() && current == *account)
}

/// Failure of the owner guard
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OwnableError {
    #[error("{0} is not the owner")]
    NotOwner(Address),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<OwnableError> for ExecutionError {
    fn from(err: OwnableError) -> Self {
        match err {
            OwnableError::Storage(e) => ExecutionError::Storage(e),
            other => ExecutionError::revert("Unauthorized", other.to_string()),
        }
    }
}

/// The one owner check used by the front door and by every logic unit
pub fn require_owner(state: &StateHandle<'_>, caller: &Address) -> Result<(), OwnableError> {
    if !is_owner(state, caller)? {
        return Err(OwnableError::NotOwner(*caller));
    }
    Ok(())
}
