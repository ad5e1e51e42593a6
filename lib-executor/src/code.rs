//! Deployable code units and the call frame they execute in

use lib_types::Address;
use std::collections::HashMap;
use std::sync::Arc;

use crate::call::ContractCall;
use crate::context::ExecutionContext;
use crate::errors::{ExecutionError, ExecutionResult};
use crate::logs::ContractLog;
use crate::storage::{ContractStorage, StateHandle};

/// Code registered at an address
///
/// Implementations hold no persistent state. Everything they read or write
/// goes through [`CallFrame::state`], which points at the execution-context
/// account and not necessarily at the code's own address.
pub trait ContractCode: Send + Sync {
    /// Short human-readable name used in logs
    fn name(&self) -> &str;

    /// Runs once at deployment with `this == code == the new address`
    fn construct(&self, _frame: &mut CallFrame<'_>) -> ExecutionResult<()> {
        Ok(())
    }

    /// Handle one call
    fn call(&self, frame: &mut CallFrame<'_>, call: &ContractCall) -> ExecutionResult<Vec<u8>>;
}

/// Address -> code lookup
pub type CodeRegistry = HashMap<Address, Arc<dyn ContractCode>>;

/// Everything a code unit can see and do while handling a call
pub struct CallFrame<'a> {
    ctx: ExecutionContext,
    storage: &'a dyn ContractStorage,
    registry: &'a CodeRegistry,
    logs: &'a mut Vec<ContractLog>,
}

impl<'a> CallFrame<'a> {
    pub(crate) fn new(
        ctx: ExecutionContext,
        storage: &'a dyn ContractStorage,
        registry: &'a CodeRegistry,
        logs: &'a mut Vec<ContractLog>,
    ) -> Self {
        Self {
            ctx,
            storage,
            registry,
            logs,
        }
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.ctx
    }

    pub fn caller(&self) -> Address {
        self.ctx.caller
    }

    /// The account whose storage this frame touches
    pub fn this(&self) -> Address {
        self.ctx.this
    }

    /// Storage of the execution-context account
    pub fn state(&self) -> StateHandle<'a> {
        StateHandle::new(self.storage, self.ctx.this)
    }

    /// Run the code at `code_address` against this frame's storage
    ///
    /// The callee sees the same `caller` and `this`; only `code` changes.
    /// Errors, including reverts, are returned unchanged.
    pub fn delegate_call(
        &mut self,
        code_address: Address,
        call: &ContractCall,
    ) -> ExecutionResult<Vec<u8>> {
        let code = self
            .registry
            .get(&code_address)
            .cloned()
            .ok_or(ExecutionError::NoCode(code_address))?;
        let ctx = self.ctx.delegated(code_address)?;

        tracing::trace!(
            this = %ctx.this,
            code = %code_address,
            method = %call.method,
            depth = ctx.call_depth,
            "delegate call"
        );

        let mut frame = CallFrame::new(ctx, self.storage, self.registry, &mut *self.logs);
        code.call(&mut frame, call)
    }

    /// Record an event for the current transaction
    pub fn emit(&mut self, event: impl Into<String>, data: Vec<u8>) {
        self.logs.push(ContractLog::new(
            self.ctx.this,
            self.ctx.code,
            event.into(),
            data,
            self.ctx.tx_hash,
        ));
    }
}
