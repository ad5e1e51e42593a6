//! Execution context threaded through every call
//!
//! The context answers two questions for contract code:
//! - *who* initiated the state change (`caller`)
//! - *whose storage* is being read and written (`this`) versus *whose code*
//!   is running (`code`)
//!
//! For a top-level call `this == code`. A delegate call keeps `caller` and
//! `this` and swaps `code`, so logic reached through the front door sees the
//! front door as `this` while its own address is `code`.

use lib_types::{Address, TxHash};
use serde::{Deserialize, Serialize};

use crate::errors::{ExecutionError, ExecutionResult};

/// Maximum allowed call depth to prevent unbounded delegation chains
pub const DEFAULT_MAX_CALL_DEPTH: u32 = 10;

/// Discriminates how the currently running code was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallOrigin {
    /// Called directly by an account: code runs against its own storage
    User,
    /// Reached through a delegate call: code runs against the caller frame's storage
    Delegated,
}

/// Contract execution environment state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionContext {
    /// Account that initiated the transaction
    pub caller: Address,
    /// Account whose storage this frame reads and writes
    pub this: Address,
    /// Account whose code is executing in this frame
    pub code: Address,
    /// How this frame was reached
    pub call_origin: CallOrigin,
    /// Transaction hash that triggered this execution
    pub tx_hash: TxHash,
    /// Current call depth (0 = top-level user call)
    pub call_depth: u32,
    /// Maximum allowed call depth
    pub max_call_depth: u32,
}

impl ExecutionContext {
    /// Create a context for a user-initiated call against `target`
    pub fn new(caller: Address, target: Address, tx_hash: TxHash) -> Self {
        Self {
            caller,
            this: target,
            code: target,
            call_origin: CallOrigin::User,
            tx_hash,
            call_depth: 0,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }

    pub fn with_max_call_depth(mut self, max_call_depth: u32) -> Self {
        self.max_call_depth = max_call_depth;
        self
    }

    /// Create a nested context with incremented call depth
    ///
    /// # Returns
    /// - `Ok(ExecutionContext)` if depth limit not exceeded
    /// - `Err(CallDepthExceeded)` if incrementing depth would exceed max_call_depth
    pub fn with_incremented_depth(&self) -> ExecutionResult<ExecutionContext> {
        if self.call_depth >= self.max_call_depth {
            return Err(ExecutionError::CallDepthExceeded {
                depth: self.call_depth,
                max: self.max_call_depth,
            });
        }

        Ok(ExecutionContext {
            call_depth: self.call_depth + 1,
            ..self.clone()
        })
    }

    /// Context for running `code`'s logic against this frame's storage
    pub fn delegated(&self, code: Address) -> ExecutionResult<ExecutionContext> {
        let mut nested = self.with_incremented_depth()?;
        nested.code = code;
        nested.call_origin = CallOrigin::Delegated;
        Ok(nested)
    }

    /// True when the running code is not the owner of the storage it touches
    pub fn is_delegated(&self) -> bool {
        self.this != self.code
    }
}
