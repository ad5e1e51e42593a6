//! LockedCappedToken: the replaceable token logic unit
//!
//! # Execution identity
//!
//! The unit records its own address when it is deployed. When it runs behind
//! the front door the execution context's `this` is the front door, so
//! `this != self_address`. When someone calls the unit directly, `this ==
//! self_address` and every state-changing entry point refuses to run: a
//! direct call would otherwise mutate the unit's own, never-used storage
//! instead of failing loudly.
//!
//! # Enforcement
//!
//! Every guard is a precondition evaluated before the first write:
//! - **Initialization**: exactly once, only through forwarding
//! - **Cap**: `total_supply + amount <= cap` on every mint
//! - **Ownership**: single owner, never the zero address
//! - **Sale lock**: transfer-family calls need `unlocked`, or an owner or
//!   authorized *caller*
//! - **Conservation**: transfers never change the sum of balances

use lib_executor::{CallFrame, ContractCall, ContractCode, ContractExecutor, ContractStorage};
use lib_executor::{ExecutionContext, ExecutionResult};
use lib_types::{Address, Amount};
use tracing::{debug, info};

use crate::abi::TokenCall;
use crate::errors::{TokenError, TokenResult};
use crate::events::TokenEvent;
use crate::state::TokenState;

pub const TOKEN_NAME: &str = "Locked ILM token";
pub const TOKEN_SYMBOL: &str = "LILM";
pub const TOKEN_DECIMALS: u8 = 18;

/// The token logic unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockedCappedToken {
    /// Address this unit was deployed at
    self_address: Address,
}

impl LockedCappedToken {
    pub fn new(self_address: Address) -> Self {
        Self { self_address }
    }

    /// Deploy a fresh logic unit and return its address
    pub fn deploy<S: ContractStorage>(
        executor: &mut ContractExecutor<S>,
        deployer: Address,
    ) -> ExecutionResult<Address> {
        executor.deploy(deployer, LockedCappedToken::new)
    }

    /// True when reached through a delegate call and executing against
    /// storage other than our own
    pub fn is_forwarded(&self, ctx: &ExecutionContext) -> bool {
        ctx.is_delegated() && ctx.this != self.self_address
    }

    // =========================================================================
    // Guards
    // =========================================================================

    fn ensure_forwarded(&self, ctx: &ExecutionContext) -> TokenResult<()> {
        if !self.is_forwarded(ctx) {
            return Err(TokenError::DirectCallForbidden);
        }
        Ok(())
    }

    /// Forwarded and initialized: required by every mutation but `initialize`
    fn ensure_live(&self, ctx: &ExecutionContext, token: &TokenState<'_>) -> TokenResult<()> {
        self.ensure_forwarded(ctx)?;
        if !token.initialized()? {
            return Err(TokenError::NotInitialized);
        }
        Ok(())
    }

    fn ensure_owner(&self, ctx: &ExecutionContext, token: &TokenState<'_>) -> TokenResult<()> {
        token.require_owner(&ctx.caller)
    }

    /// The sale lock gates the caller initiating the change, not the holder
    fn ensure_can_trade(&self, ctx: &ExecutionContext, token: &TokenState<'_>) -> TokenResult<()> {
        if token.unlocked()? || token.is_owner(&ctx.caller)? || token.is_authorized(&ctx.caller)? {
            return Ok(());
        }
        Err(TokenError::SaleLocked)
    }

    // =========================================================================
    // Initialization & administration
    // =========================================================================

    pub fn initialize(
        &self,
        ctx: &ExecutionContext,
        token: &TokenState<'_>,
        owner: Address,
        cap: Amount,
    ) -> TokenResult<TokenEvent> {
        if token.initialized()? {
            return Err(TokenError::AlreadyInitialized);
        }
        self.ensure_forwarded(ctx)?;
        // Neither this unit nor the front door ever appears as a caller
        if owner.is_zero() || owner == self.self_address || owner == ctx.this {
            return Err(TokenError::InvalidOwner);
        }

        token.set_owner(owner)?;
        token.set_cap(cap)?;
        token.set_total_supply(0)?;
        token.set_initialized()?;

        info!(
            storage = %token.account(),
            logic = %self.self_address,
            owner = %owner,
            cap,
            "Token initialized"
        );
        Ok(TokenEvent::Initialized { owner, cap })
    }

    pub fn mint(
        &self,
        ctx: &ExecutionContext,
        token: &TokenState<'_>,
        to: Address,
        amount: Amount,
    ) -> TokenResult<TokenEvent> {
        self.ensure_live(ctx, token)?;
        self.ensure_owner(ctx, token)?;

        let cap = token.cap()?;
        let new_supply = token
            .total_supply()?
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        if new_supply > cap {
            return Err(TokenError::CapExceeded {
                cap,
                would_have: new_supply,
            });
        }
        let new_balance = token
            .balance_of(&to)?
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;

        token.set_balance(&to, new_balance)?;
        token.set_total_supply(new_supply)?;

        info!(to = %to, amount, total_supply = new_supply, "Minted");
        Ok(TokenEvent::Mint { to, amount })
    }

    pub fn transfer_ownership(
        &self,
        ctx: &ExecutionContext,
        token: &TokenState<'_>,
        new_owner: Address,
    ) -> TokenResult<TokenEvent> {
        self.ensure_live(ctx, token)?;
        self.ensure_owner(ctx, token)?;
        if new_owner.is_zero() {
            return Err(TokenError::InvalidOwner);
        }

        let previous = token.owner()?;
        token.set_owner(new_owner)?;

        info!(previous = %previous, new_owner = %new_owner, "Ownership transferred");
        Ok(TokenEvent::OwnershipTransferred {
            previous,
            new_owner,
        })
    }

    pub fn set_unlock(
        &self,
        ctx: &ExecutionContext,
        token: &TokenState<'_>,
        unlocked: bool,
    ) -> TokenResult<TokenEvent> {
        self.ensure_live(ctx, token)?;
        self.ensure_owner(ctx, token)?;
        if token.unlocked()? == unlocked {
            return Err(TokenError::UnlockUnchanged(unlocked));
        }

        token.set_unlocked(unlocked)?;

        info!(unlocked, "Sale lock changed");
        Ok(TokenEvent::UnlockChanged { unlocked })
    }

    pub fn set_authorized(
        &self,
        ctx: &ExecutionContext,
        token: &TokenState<'_>,
        account: Address,
        authorized: bool,
    ) -> TokenResult<TokenEvent> {
        self.ensure_live(ctx, token)?;
        self.ensure_owner(ctx, token)?;
        if !authorized {
            return Err(TokenError::AuthorizationIrrevocable);
        }
        if token.is_authorized(&account)? {
            return Err(TokenError::AlreadyAuthorized);
        }

        token.set_authorized(&account)?;

        info!(account = %account, "Address authorized");
        Ok(TokenEvent::Authorized { account })
    }

    // =========================================================================
    // Transfer & allowance engine
    // =========================================================================

    pub fn transfer(
        &self,
        ctx: &ExecutionContext,
        token: &TokenState<'_>,
        to: Address,
        amount: Amount,
    ) -> TokenResult<TokenEvent> {
        self.ensure_live(ctx, token)?;
        self.ensure_can_trade(ctx, token)?;
        let from = ctx.caller;
        self.move_balance(token, from, to, amount)?;

        debug!(from = %from, to = %to, amount, "Transfer");
        Ok(TokenEvent::Transfer { from, to, amount })
    }

    pub fn approve(
        &self,
        ctx: &ExecutionContext,
        token: &TokenState<'_>,
        spender: Address,
        amount: Amount,
    ) -> TokenResult<TokenEvent> {
        self.ensure_live(ctx, token)?;
        self.ensure_can_trade(ctx, token)?;

        token.set_allowance(&ctx.caller, &spender, amount)?;
        Ok(TokenEvent::Approval {
            owner: ctx.caller,
            spender,
            amount,
        })
    }

    pub fn increase_approval(
        &self,
        ctx: &ExecutionContext,
        token: &TokenState<'_>,
        spender: Address,
        delta: Amount,
    ) -> TokenResult<TokenEvent> {
        self.ensure_live(ctx, token)?;
        self.ensure_can_trade(ctx, token)?;

        let amount = token
            .allowance(&ctx.caller, &spender)?
            .checked_add(delta)
            .ok_or(TokenError::Overflow)?;
        token.set_allowance(&ctx.caller, &spender, amount)?;
        Ok(TokenEvent::Approval {
            owner: ctx.caller,
            spender,
            amount,
        })
    }

    /// Decreasing below zero fails instead of clamping
    pub fn decrease_approval(
        &self,
        ctx: &ExecutionContext,
        token: &TokenState<'_>,
        spender: Address,
        delta: Amount,
    ) -> TokenResult<TokenEvent> {
        self.ensure_live(ctx, token)?;
        self.ensure_can_trade(ctx, token)?;

        let have = token.allowance(&ctx.caller, &spender)?;
        let amount = have.checked_sub(delta).ok_or(TokenError::InvalidAllowance {
            have,
            decrease: delta,
        })?;
        token.set_allowance(&ctx.caller, &spender, amount)?;
        Ok(TokenEvent::Approval {
            owner: ctx.caller,
            spender,
            amount,
        })
    }

    /// Spend `from`'s allowance to the caller
    pub fn transfer_from(
        &self,
        ctx: &ExecutionContext,
        token: &TokenState<'_>,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> TokenResult<TokenEvent> {
        self.ensure_live(ctx, token)?;
        self.ensure_can_trade(ctx, token)?;

        let spender = ctx.caller;
        let allowance = token.allowance(&from, &spender)?;
        if allowance < amount {
            return Err(TokenError::InsufficientAllowance {
                have: allowance,
                need: amount,
            });
        }

        self.move_balance(token, from, to, amount)?;
        token.set_allowance(&from, &spender, allowance - amount)?;

        debug!(spender = %spender, from = %from, to = %to, amount, "Transfer from allowance");
        Ok(TokenEvent::Transfer { from, to, amount })
    }

    /// Debit `from` and credit `to`; all checks run before either write
    fn move_balance(
        &self,
        token: &TokenState<'_>,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> TokenResult<()> {
        if to.is_zero() {
            return Err(TokenError::InvalidRecipient);
        }

        let from_balance = token.balance_of(&from)?;
        if from_balance < amount {
            return Err(TokenError::InsufficientBalance {
                have: from_balance,
                need: amount,
            });
        }
        if from == to {
            return Ok(());
        }

        let new_to_balance = token
            .balance_of(&to)?
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;

        token.set_balance(&from, from_balance - amount)?;
        token.set_balance(&to, new_to_balance)?;
        Ok(())
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    fn dispatch(&self, frame: &mut CallFrame<'_>, call: TokenCall) -> TokenResult<Vec<u8>> {
        let ctx = frame.context().clone();
        let token = TokenState::new(frame.state());
        if call.is_read_only() {
            return self.read(&token, call);
        }

        let event = match call {
            TokenCall::Initialize { owner, cap } => self.initialize(&ctx, &token, owner, cap)?,
            TokenCall::Mint { to, amount } => self.mint(&ctx, &token, to, amount)?,
            TokenCall::TransferOwnership { new_owner } => {
                self.transfer_ownership(&ctx, &token, new_owner)?
            }
            TokenCall::SetUnlock { unlocked } => self.set_unlock(&ctx, &token, unlocked)?,
            TokenCall::SetAuthorized {
                account,
                authorized,
            } => self.set_authorized(&ctx, &token, account, authorized)?,
            TokenCall::Transfer { to, amount } => self.transfer(&ctx, &token, to, amount)?,
            TokenCall::Approve { spender, amount } => self.approve(&ctx, &token, spender, amount)?,
            TokenCall::IncreaseApproval { spender, delta } => {
                self.increase_approval(&ctx, &token, spender, delta)?
            }
            TokenCall::DecreaseApproval { spender, delta } => {
                self.decrease_approval(&ctx, &token, spender, delta)?
            }
            TokenCall::TransferFrom { from, to, amount } => {
                self.transfer_from(&ctx, &token, from, to, amount)?
            }
            query => return Err(TokenError::UnknownMethod(query.method().to_string())),
        };

        frame.emit(event.name(), bincode::serialize(&event)?);
        Ok(Vec::new())
    }

    fn read(&self, token: &TokenState<'_>, call: TokenCall) -> TokenResult<Vec<u8>> {
        let data = match call {
            TokenCall::BalanceOf { account } => bincode::serialize(&token.balance_of(&account)?)?,
            TokenCall::Allowance { owner, spender } => {
                bincode::serialize(&token.allowance(&owner, &spender)?)?
            }
            TokenCall::TotalSupply => bincode::serialize(&token.total_supply()?)?,
            TokenCall::Cap => bincode::serialize(&token.cap()?)?,
            TokenCall::Owner => bincode::serialize(&token.owner()?)?,
            TokenCall::Authorized { account } => {
                bincode::serialize(&token.is_authorized(&account)?)?
            }
            TokenCall::Unlocked => bincode::serialize(&token.unlocked()?)?,
            TokenCall::Initialized => bincode::serialize(&token.initialized()?)?,
            TokenCall::ThisAddr => bincode::serialize(&self.self_address)?,
            TokenCall::Name => bincode::serialize(TOKEN_NAME)?,
            TokenCall::Symbol => bincode::serialize(TOKEN_SYMBOL)?,
            TokenCall::Decimals => bincode::serialize(&TOKEN_DECIMALS)?,
            other => return Err(TokenError::UnknownMethod(other.method().to_string())),
        };
        Ok(data)
    }
}

impl ContractCode for LockedCappedToken {
    fn name(&self) -> &str {
        TOKEN_SYMBOL
    }

    fn call(&self, frame: &mut CallFrame<'_>, call: &ContractCall) -> ExecutionResult<Vec<u8>> {
        let call = TokenCall::decode(call)?;
        Ok(self.dispatch(frame, call)?)
    }
}
