//! Storage and execution error types

use lib_types::Address;
use thiserror::Error;

/// Storage layer result type
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage-specific errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Backend error: {0}")]
    BackendError(String),
}

impl From<bincode::Error> for StorageError {
    fn from(err: bincode::Error) -> Self {
        StorageError::SerializationError(err.to_string())
    }
}

/// A deliberate abort raised by contract code.
///
/// `reason` is a stable, machine-comparable code (e.g. `"Unauthorized"`);
/// `message` carries the human-readable detail. Reverts cross delegate-call
/// boundaries unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}: {message}")]
pub struct Revert {
    pub reason: String,
    pub message: String,
}

impl Revert {
    pub fn new(reason: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            message: message.into(),
        }
    }
}

/// Execution result type
pub type ExecutionResult<T> = Result<T, ExecutionError>;

/// Any reason a transaction aborts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("Reverted: {0}")]
    Reverted(Revert),

    #[error("No code deployed at {0}")]
    NoCode(Address),

    #[error("No delegation target set")]
    NoDelegation,

    #[error("Call depth limit exceeded: {depth} >= {max}")]
    CallDepthExceeded { depth: u32, max: u32 },

    #[error("Invalid call: {0}")]
    InvalidCall(String),

    #[error("Codec error: {0}")]
    Codec(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ExecutionError {
    /// Shorthand for a contract revert
    pub fn revert(reason: impl Into<String>, message: impl Into<String>) -> Self {
        ExecutionError::Reverted(Revert::new(reason, message))
    }

    /// The distinguishing reason code when this is a revert
    pub fn revert_reason(&self) -> Option<&str> {
        match self {
            ExecutionError::Reverted(revert) => Some(revert.reason.as_str()),
            _ => None,
        }
    }
}

impl From<bincode::Error> for ExecutionError {
    fn from(err: bincode::Error) -> Self {
        ExecutionError::Codec(err.to_string())
    }
}
