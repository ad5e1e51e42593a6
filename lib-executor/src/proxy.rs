//! Front Door (storage proxy)
//!
//! The front door owns state permanently and owns no token logic. It answers
//! two methods itself:
//!
//! - `delegation`: the address of the current logic unit
//! - `transfer_delegation(new_target)`: repoint to a new logic unit (owner only)
//!
//! Every other method is forwarded with a delegate call, so the logic unit's
//! code runs against the front door's storage. Swapping the logic unit
//! therefore keeps balances, supply, owner and flags intact.
//!
//! `transfer_delegation` does not check that the new target implements the
//! expected methods. Pointing at the wrong code is the owner's responsibility.

use lib_types::Address;
use tracing::{debug, info};

use crate::call::{decode_return, encode_return, ContractCall};
use crate::code::{CallFrame, ContractCode};
use crate::errors::{ExecutionError, ExecutionResult, StorageResult};
use crate::executor::ContractExecutor;
use crate::ownable;
use crate::storage::{ContractStorage, StateHandle};

pub const DELEGATION_SLOT: &[u8] = b"proxy/delegation";

pub const METHOD_DELEGATION: &str = "delegation";
pub const METHOD_TRANSFER_DELEGATION: &str = "transfer_delegation";

pub const EVENT_DELEGATION_TRANSFERRED: &str = "DelegationTransferred";

/// The storage-holding entry point
#[derive(Debug, Default, Clone, Copy)]
pub struct FrontDoor;

impl FrontDoor {
    pub fn new() -> Self {
        Self
    }

    /// Deploy a front door owned by `deployer`, with no delegation
    pub fn deploy<S: ContractStorage>(
        executor: &mut ContractExecutor<S>,
        deployer: Address,
    ) -> ExecutionResult<Address> {
        executor.deploy(deployer, |_| FrontDoor::new())
    }

    /// Current delegation target (zero when unset)
    pub fn delegation(state: &StateHandle<'_>) -> StorageResult<Address> {
        state.get_or_default(DELEGATION_SLOT)
    }

    fn transfer_delegation(
        &self,
        frame: &mut CallFrame<'_>,
        new_target: Address,
    ) -> ExecutionResult<()> {
        let state = frame.state();
        ownable::require_owner(&state, &frame.caller())?;

        if new_target.is_zero() {
            return Err(ExecutionError::revert(
                "InvalidDelegation",
                "delegation target cannot be the zero address",
            ));
        }

        let previous = Self::delegation(&state)?;
        state.set(DELEGATION_SLOT, &new_target)?;

        info!(
            front_door = %frame.this(),
            previous = %previous,
            new = %new_target,
            "Delegation transferred"
        );
        frame.emit(
            EVENT_DELEGATION_TRANSFERRED,
            encode_return(&(previous, new_target))?,
        );
        Ok(())
    }

    fn forward(&self, frame: &mut CallFrame<'_>, call: &ContractCall) -> ExecutionResult<Vec<u8>> {
        let target = Self::delegation(&frame.state())?;
        if target.is_zero() {
            return Err(ExecutionError::NoDelegation);
        }

        debug!(
            front_door = %frame.this(),
            target = %target,
            method = %call.method,
            "Forwarding call"
        );
        frame.delegate_call(target, call)
    }
}

impl ContractCode for FrontDoor {
    fn name(&self) -> &str {
        "front-door"
    }

    fn construct(&self, frame: &mut CallFrame<'_>) -> ExecutionResult<()> {
        ownable::set_owner(&frame.state(), frame.caller())?;
        Ok(())
    }

    fn call(&self, frame: &mut CallFrame<'_>, call: &ContractCall) -> ExecutionResult<Vec<u8>> {
        match call.method.as_str() {
            METHOD_DELEGATION => encode_return(&Self::delegation(&frame.state())?),
            METHOD_TRANSFER_DELEGATION => {
                let new_target: Address = call.decode_params()?;
                self.transfer_delegation(frame, new_target)?;
                Ok(Vec::new())
            }
            _ => self.forward(frame, call),
        }
    }
}

/// Typed access to a deployed front door
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProxyClient {
    address: Address,
}

impl ProxyClient {
    pub fn at(address: Address) -> Self {
        Self { address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn delegation<S: ContractStorage>(
        &self,
        executor: &ContractExecutor<S>,
    ) -> ExecutionResult<Address> {
        let data = executor.query(
            self.address,
            ContractCall::without_params(METHOD_DELEGATION),
        )?;
        decode_return(&data)
    }

    pub fn transfer_delegation<S: ContractStorage>(
        &self,
        executor: &mut ContractExecutor<S>,
        from: Address,
        new_target: Address,
    ) -> ExecutionResult<()> {
        let call = ContractCall::new(METHOD_TRANSFER_DELEGATION, &new_target)?;
        executor.execute(from, self.address, call)?;
        Ok(())
    }
}
