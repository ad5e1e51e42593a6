//! Token call surface
//!
//! Every method has a stable snake_case name and bincode-encoded tuple
//! params. [`TokenCall`] is the typed form used by both the controller's
//! dispatcher and the client.

use lib_executor::{ContractCall, ExecutionResult};
use lib_types::{Address, Amount};

use crate::errors::{TokenError, TokenResult};

pub mod methods {
    pub const INITIALIZE: &str = "initialize";
    pub const MINT: &str = "mint";
    pub const TRANSFER_OWNERSHIP: &str = "transfer_ownership";
    pub const SET_UNLOCK: &str = "set_unlock";
    pub const SET_AUTHORIZED: &str = "set_authorized";
    pub const TRANSFER: &str = "transfer";
    pub const APPROVE: &str = "approve";
    pub const INCREASE_APPROVAL: &str = "increase_approval";
    pub const DECREASE_APPROVAL: &str = "decrease_approval";
    pub const TRANSFER_FROM: &str = "transfer_from";

    pub const BALANCE_OF: &str = "balance_of";
    pub const ALLOWANCE: &str = "allowance";
    pub const TOTAL_SUPPLY: &str = "total_supply";
    pub const CAP: &str = "cap";
    pub const OWNER: &str = "owner";
    pub const AUTHORIZED: &str = "authorized";
    pub const UNLOCKED: &str = "unlocked";
    pub const INITIALIZED: &str = "initialized";
    pub const THIS_ADDR: &str = "this_addr";
    pub const NAME: &str = "name";
    pub const SYMBOL: &str = "symbol";
    pub const DECIMALS: &str = "decimals";
}

/// One call into the token logic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenCall {
    Initialize { owner: Address, cap: Amount },
    Mint { to: Address, amount: Amount },
    TransferOwnership { new_owner: Address },
    SetUnlock { unlocked: bool },
    SetAuthorized { account: Address, authorized: bool },
    Transfer { to: Address, amount: Amount },
    Approve { spender: Address, amount: Amount },
    IncreaseApproval { spender: Address, delta: Amount },
    DecreaseApproval { spender: Address, delta: Amount },
    TransferFrom { from: Address, to: Address, amount: Amount },

    BalanceOf { account: Address },
    Allowance { owner: Address, spender: Address },
    TotalSupply,
    Cap,
    Owner,
    Authorized { account: Address },
    Unlocked,
    Initialized,
    ThisAddr,
    Name,
    Symbol,
    Decimals,
}

impl TokenCall {
    pub fn method(&self) -> &'static str {
        match self {
            TokenCall::Initialize { .. } => methods::INITIALIZE,
            TokenCall::Mint { .. } => methods::MINT,
            TokenCall::TransferOwnership { .. } => methods::TRANSFER_OWNERSHIP,
            TokenCall::SetUnlock { .. } => methods::SET_UNLOCK,
            TokenCall::SetAuthorized { .. } => methods::SET_AUTHORIZED,
            TokenCall::Transfer { .. } => methods::TRANSFER,
            TokenCall::Approve { .. } => methods::APPROVE,
            TokenCall::IncreaseApproval { .. } => methods::INCREASE_APPROVAL,
            TokenCall::DecreaseApproval { .. } => methods::DECREASE_APPROVAL,
            TokenCall::TransferFrom { .. } => methods::TRANSFER_FROM,
            TokenCall::BalanceOf { .. } => methods::BALANCE_OF,
            TokenCall::Allowance { .. } => methods::ALLOWANCE,
            TokenCall::TotalSupply => methods::TOTAL_SUPPLY,
            TokenCall::Cap => methods::CAP,
            TokenCall::Owner => methods::OWNER,
            TokenCall::Authorized { .. } => methods::AUTHORIZED,
            TokenCall::Unlocked => methods::UNLOCKED,
            TokenCall::Initialized => methods::INITIALIZED,
            TokenCall::ThisAddr => methods::THIS_ADDR,
            TokenCall::Name => methods::NAME,
            TokenCall::Symbol => methods::SYMBOL,
            TokenCall::Decimals => methods::DECIMALS,
        }
    }

    /// True for calls that never write state
    pub fn is_read_only(&self) -> bool {
        matches!(
            self,
            TokenCall::BalanceOf { .. }
                | TokenCall::Allowance { .. }
                | TokenCall::TotalSupply
                | TokenCall::Cap
                | TokenCall::Owner
                | TokenCall::Authorized { .. }
                | TokenCall::Unlocked
                | TokenCall::Initialized
                | TokenCall::ThisAddr
                | TokenCall::Name
                | TokenCall::Symbol
                | TokenCall::Decimals
        )
    }

    /// Encode into the wire form the executor and front door carry
    pub fn encode(&self) -> ExecutionResult<ContractCall> {
        let method = self.method();
        match *self {
            TokenCall::Initialize { owner, cap } => ContractCall::new(method, &(owner, cap)),
            TokenCall::Mint { to, amount } => ContractCall::new(method, &(to, amount)),
            TokenCall::TransferOwnership { new_owner } => ContractCall::new(method, &new_owner),
            TokenCall::SetUnlock { unlocked } => ContractCall::new(method, &unlocked),
            TokenCall::SetAuthorized {
                account,
                authorized,
            } => ContractCall::new(method, &(account, authorized)),
            TokenCall::Transfer { to, amount } => ContractCall::new(method, &(to, amount)),
            TokenCall::Approve { spender, amount } => ContractCall::new(method, &(spender, amount)),
            TokenCall::IncreaseApproval { spender, delta }
            | TokenCall::DecreaseApproval { spender, delta } => {
                ContractCall::new(method, &(spender, delta))
            }
            TokenCall::TransferFrom { from, to, amount } => {
                ContractCall::new(method, &(from, to, amount))
            }
            TokenCall::BalanceOf { account } | TokenCall::Authorized { account } => {
                ContractCall::new(method, &account)
            }
            TokenCall::Allowance { owner, spender } => ContractCall::new(method, &(owner, spender)),
            TokenCall::TotalSupply
            | TokenCall::Cap
            | TokenCall::Owner
            | TokenCall::Unlocked
            | TokenCall::Initialized
            | TokenCall::ThisAddr
            | TokenCall::Name
            | TokenCall::Symbol
            | TokenCall::Decimals => Ok(ContractCall::without_params(method)),
        }
    }

    /// Decode a wire call; unknown methods fail with `UnknownMethod`
    pub fn decode(call: &ContractCall) -> TokenResult<Self> {
        let params = call.params.as_slice();
        let decoded = match call.method.as_str() {
            methods::INITIALIZE => {
                let (owner, cap): (Address, Amount) = bincode::deserialize(params)?;
                TokenCall::Initialize { owner, cap }
            }
            methods::MINT => {
                let (to, amount): (Address, Amount) = bincode::deserialize(params)?;
                TokenCall::Mint { to, amount }
            }
            methods::TRANSFER_OWNERSHIP => TokenCall::TransferOwnership {
                new_owner: bincode::deserialize(params)?,
            },
            methods::SET_UNLOCK => TokenCall::SetUnlock {
                unlocked: bincode::deserialize(params)?,
            },
            methods::SET_AUTHORIZED => {
                let (account, authorized): (Address, bool) = bincode::deserialize(params)?;
                TokenCall::SetAuthorized {
                    account,
                    authorized,
                }
            }
            methods::TRANSFER => {
                let (to, amount): (Address, Amount) = bincode::deserialize(params)?;
                TokenCall::Transfer { to, amount }
            }
            methods::APPROVE => {
                let (spender, amount): (Address, Amount) = bincode::deserialize(params)?;
                TokenCall::Approve { spender, amount }
            }
            methods::INCREASE_APPROVAL => {
                let (spender, delta): (Address, Amount) = bincode::deserialize(params)?;
                TokenCall::IncreaseApproval { spender, delta }
            }
            methods::DECREASE_APPROVAL => {
                let (spender, delta): (Address, Amount) = bincode::deserialize(params)?;
                TokenCall::DecreaseApproval { spender, delta }
            }
            methods::TRANSFER_FROM => {
                let (from, to, amount): (Address, Address, Amount) = bincode::deserialize(params)?;
                TokenCall::TransferFrom { from, to, amount }
            }
            methods::BALANCE_OF => TokenCall::BalanceOf {
                account: bincode::deserialize(params)?,
            },
            methods::ALLOWANCE => {
                let (owner, spender): (Address, Address) = bincode::deserialize(params)?;
                TokenCall::Allowance { owner, spender }
            }
            methods::TOTAL_SUPPLY => TokenCall::TotalSupply,
            methods::CAP => TokenCall::Cap,
            methods::OWNER => TokenCall::Owner,
            methods::AUTHORIZED => TokenCall::Authorized {
                account: bincode::deserialize(params)?,
            },
            methods::UNLOCKED => TokenCall::Unlocked,
            methods::INITIALIZED => TokenCall::Initialized,
            methods::THIS_ADDR => TokenCall::ThisAddr,
            methods::NAME => TokenCall::Name,
            methods::SYMBOL => TokenCall::Symbol,
            methods::DECIMALS => TokenCall::Decimals,
            other => return Err(TokenError::UnknownMethod(other.to_string())),
        };
        Ok(decoded)
    }
}
