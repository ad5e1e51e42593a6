//! Token storage layout
//!
//! All token state lives in the account the execution context points at
//! (the front door when forwarded). The owner comes from the shared
//! `ownable` slot so the front door and the token agree on who administers
//! both.
//!
//! | Slot | Value |
//! |---|---|
//! | `token/initialized` | `bool` |
//! | `token/cap` | `Amount` |
//! | `token/total_supply` | `Amount` |
//! | `token/unlocked` | `bool` |
//! | `token/balances/{account}` | `Amount` |
//! | `token/allowances/{owner}/{spender}` | `Amount` |
//! | `token/authorized/{account}` | `bool` |

use lib_executor::storage::map_slot;
use lib_executor::{ownable, StateHandle};
use lib_types::{Address, Amount};

use crate::errors::TokenResult;

const INITIALIZED_SLOT: &[u8] = b"token/initialized";
const CAP_SLOT: &[u8] = b"token/cap";
const TOTAL_SUPPLY_SLOT: &[u8] = b"token/total_supply";
const UNLOCKED_SLOT: &[u8] = b"token/unlocked";
const BALANCES_PREFIX: &[u8] = b"token/balances";
const ALLOWANCES_PREFIX: &[u8] = b"token/allowances";
const AUTHORIZED_PREFIX: &[u8] = b"token/authorized";

/// Typed view of token storage
#[derive(Debug, Clone, Copy)]
pub struct TokenState<'a> {
    state: StateHandle<'a>,
}

impl<'a> TokenState<'a> {
    pub fn new(state: StateHandle<'a>) -> Self {
        Self { state }
    }

    /// The account whose storage this view reads
    pub fn account(&self) -> Address {
        self.state.account()
    }

    pub fn initialized(&self) -> TokenResult<bool> {
        Ok(self.state.get_or_default(INITIALIZED_SLOT)?)
    }

    pub fn set_initialized(&self) -> TokenResult<()> {
        Ok(self.state.set(INITIALIZED_SLOT, &true)?)
    }

    pub fn owner(&self) -> TokenResult<Address> {
        Ok(ownable::owner(&self.state)?)
    }

    pub fn is_owner(&self, account: &Address) -> TokenResult<bool> {
        Ok(ownable::is_owner(&self.state, account)?)
    }

    /// Fail with `Unauthorized` unless `caller` holds the shared owner slot
    pub fn require_owner(&self, caller: &Address) -> TokenResult<()> {
        Ok(ownable::require_owner(&self.state, caller)?)
    }

    pub fn set_owner(&self, owner: Address) -> TokenResult<()> {
        Ok(ownable::set_owner(&self.state, owner)?)
    }

    pub fn cap(&self) -> TokenResult<Amount> {
        Ok(self.state.get_or_default(CAP_SLOT)?)
    }

    pub fn set_cap(&self, cap: Amount) -> TokenResult<()> {
        Ok(self.state.set(CAP_SLOT, &cap)?)
    }

    pub fn total_supply(&self) -> TokenResult<Amount> {
        Ok(self.state.get_or_default(TOTAL_SUPPLY_SLOT)?)
    }

    pub fn set_total_supply(&self, supply: Amount) -> TokenResult<()> {
        Ok(self.state.set(TOTAL_SUPPLY_SLOT, &supply)?)
    }

    pub fn unlocked(&self) -> TokenResult<bool> {
        Ok(self.state.get_or_default(UNLOCKED_SLOT)?)
    }

    pub fn set_unlocked(&self, unlocked: bool) -> TokenResult<()> {
        Ok(self.state.set(UNLOCKED_SLOT, &unlocked)?)
    }

    pub fn balance_of(&self, account: &Address) -> TokenResult<Amount> {
        Ok(self
            .state
            .get_or_default(&map_slot(BALANCES_PREFIX, &[account.as_bytes()]))?)
    }

    /// Zero balances are deleted rather than stored
    pub fn set_balance(&self, account: &Address, amount: Amount) -> TokenResult<()> {
        let slot = map_slot(BALANCES_PREFIX, &[account.as_bytes()]);
        if amount == 0 {
            Ok(self.state.delete(&slot)?)
        } else {
            Ok(self.state.set(&slot, &amount)?)
        }
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> TokenResult<Amount> {
        Ok(self.state.get_or_default(&map_slot(
            ALLOWANCES_PREFIX,
            &[owner.as_bytes(), spender.as_bytes()],
        ))?)
    }

    pub fn set_allowance(&self, owner: &Address, spender: &Address, amount: Amount) -> TokenResult<()> {
        let slot = map_slot(ALLOWANCES_PREFIX, &[owner.as_bytes(), spender.as_bytes()]);
        if amount == 0 {
            Ok(self.state.delete(&slot)?)
        } else {
            Ok(self.state.set(&slot, &amount)?)
        }
    }

    pub fn is_authorized(&self, account: &Address) -> TokenResult<bool> {
        Ok(self
            .state
            .get_or_default(&map_slot(AUTHORIZED_PREFIX, &[account.as_bytes()]))?)
    }

    pub fn set_authorized(&self, account: &Address) -> TokenResult<()> {
        Ok(self
            .state
            .set(&map_slot(AUTHORIZED_PREFIX, &[account.as_bytes()]), &true)?)
    }
}
