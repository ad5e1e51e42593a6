//! Typed calls to a token behind a front door

use lib_executor::{decode_return, ContractExecutor, ContractStorage, ExecutionResult};
use lib_types::{Address, Amount};
use serde::de::DeserializeOwned;

use crate::abi::TokenCall;

/// Handle to a token living at `address` (normally a front door)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenClient {
    address: Address,
}

impl TokenClient {
    pub fn at(address: Address) -> Self {
        Self { address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    fn send<S: ContractStorage>(
        &self,
        executor: &mut ContractExecutor<S>,
        from: Address,
        call: TokenCall,
    ) -> ExecutionResult<()> {
        executor.execute(from, self.address, call.encode()?)?;
        Ok(())
    }

    fn read<S: ContractStorage, T: DeserializeOwned>(
        &self,
        executor: &ContractExecutor<S>,
        call: TokenCall,
    ) -> ExecutionResult<T> {
        let data = executor.query(self.address, call.encode()?)?;
        decode_return(&data)
    }

    // --- mutations ---

    pub fn initialize<S: ContractStorage>(
        &self,
        executor: &mut ContractExecutor<S>,
        from: Address,
        owner: Address,
        cap: Amount,
    ) -> ExecutionResult<()> {
        self.send(executor, from, TokenCall::Initialize { owner, cap })
    }

    pub fn mint<S: ContractStorage>(
        &self,
        executor: &mut ContractExecutor<S>,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> ExecutionResult<()> {
        self.send(executor, from, TokenCall::Mint { to, amount })
    }

    pub fn transfer_ownership<S: ContractStorage>(
        &self,
        executor: &mut ContractExecutor<S>,
        from: Address,
        new_owner: Address,
    ) -> ExecutionResult<()> {
        self.send(executor, from, TokenCall::TransferOwnership { new_owner })
    }

    pub fn set_unlock<S: ContractStorage>(
        &self,
        executor: &mut ContractExecutor<S>,
        from: Address,
        unlocked: bool,
    ) -> ExecutionResult<()> {
        self.send(executor, from, TokenCall::SetUnlock { unlocked })
    }

    pub fn set_authorized<S: ContractStorage>(
        &self,
        executor: &mut ContractExecutor<S>,
        from: Address,
        account: Address,
        authorized: bool,
    ) -> ExecutionResult<()> {
        self.send(
            executor,
            from,
            TokenCall::SetAuthorized {
                account,
                authorized,
            },
        )
    }

    pub fn transfer<S: ContractStorage>(
        &self,
        executor: &mut ContractExecutor<S>,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> ExecutionResult<()> {
        self.send(executor, from, TokenCall::Transfer { to, amount })
    }

    pub fn approve<S: ContractStorage>(
        &self,
        executor: &mut ContractExecutor<S>,
        from: Address,
        spender: Address,
        amount: Amount,
    ) -> ExecutionResult<()> {
        self.send(executor, from, TokenCall::Approve { spender, amount })
    }

    pub fn increase_approval<S: ContractStorage>(
        &self,
        executor: &mut ContractExecutor<S>,
        from: Address,
        spender: Address,
        delta: Amount,
    ) -> ExecutionResult<()> {
        self.send(executor, from, TokenCall::IncreaseApproval { spender, delta })
    }

    pub fn decrease_approval<S: ContractStorage>(
        &self,
        executor: &mut ContractExecutor<S>,
        from: Address,
        spender: Address,
        delta: Amount,
    ) -> ExecutionResult<()> {
        self.send(executor, from, TokenCall::DecreaseApproval { spender, delta })
    }

    pub fn transfer_from<S: ContractStorage>(
        &self,
        executor: &mut ContractExecutor<S>,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> ExecutionResult<()> {
        self.send(executor, spender, TokenCall::TransferFrom { from, to, amount })
    }

    // --- reads ---

    pub fn balance_of<S: ContractStorage>(
        &self,
        executor: &ContractExecutor<S>,
        account: Address,
    ) -> ExecutionResult<Amount> {
        self.read(executor, TokenCall::BalanceOf { account })
    }

    pub fn allowance<S: ContractStorage>(
        &self,
        executor: &ContractExecutor<S>,
        owner: Address,
        spender: Address,
    ) -> ExecutionResult<Amount> {
        self.read(executor, TokenCall::Allowance { owner, spender })
    }

    pub fn total_supply<S: ContractStorage>(&self, executor: &ContractExecutor<S>) -> ExecutionResult<Amount> {
        self.read(executor, TokenCall::TotalSupply)
    }

    pub fn cap<S: ContractStorage>(&self, executor: &ContractExecutor<S>) -> ExecutionResult<Amount> {
        self.read(executor, TokenCall::Cap)
    }

    pub fn owner<S: ContractStorage>(&self, executor: &ContractExecutor<S>) -> ExecutionResult<Address> {
        self.read(executor, TokenCall::Owner)
    }

    pub fn authorized<S: ContractStorage>(
        &self,
        executor: &ContractExecutor<S>,
        account: Address,
    ) -> ExecutionResult<bool> {
        self.read(executor, TokenCall::Authorized { account })
    }

    pub fn unlocked<S: ContractStorage>(&self, executor: &ContractExecutor<S>) -> ExecutionResult<bool> {
        self.read(executor, TokenCall::Unlocked)
    }

    pub fn initialized<S: ContractStorage>(&self, executor: &ContractExecutor<S>) -> ExecutionResult<bool> {
        self.read(executor, TokenCall::Initialized)
    }

    /// Address of the logic unit that served the call
    pub fn this_addr<S: ContractStorage>(&self, executor: &ContractExecutor<S>) -> ExecutionResult<Address> {
        self.read(executor, TokenCall::ThisAddr)
    }

    pub fn name<S: ContractStorage>(&self, executor: &ContractExecutor<S>) -> ExecutionResult<String> {
        self.read(executor, TokenCall::Name)
    }

    pub fn symbol<S: ContractStorage>(&self, executor: &ContractExecutor<S>) -> ExecutionResult<String> {
        self.read(executor, TokenCall::Symbol)
    }

    pub fn decimals<S: ContractStorage>(&self, executor: &ContractExecutor<S>) -> ExecutionResult<u8> {
        self.read(executor, TokenCall::Decimals)
    }
}
