//! End-to-end token tests
//!
//! Every test deploys a fresh front door and logic unit, wires them
//! together and drives the token through the front door.

use lib_executor::{ContractExecutor, ExecutionError, FrontDoor, MemoryStorage, ProxyClient};
use lib_tokens::{
    LockedCappedToken, TokenClient, TokenEvent, TOKEN_DECIMALS, TOKEN_NAME, TOKEN_SYMBOL,
};
use lib_types::{Address, Amount};

const INIT_CAP: Amount = 400_000_000;

fn account(id: u8) -> Address {
    Address::new([id; 32])
}

struct Deployment {
    executor: ContractExecutor<MemoryStorage>,
    owner: Address,
    proxy: ProxyClient,
    token: TokenClient,
    unit: Address,
}

/// Front door plus logic unit, wired but not initialized
fn deploy() -> Deployment {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let mut executor = ContractExecutor::new(MemoryStorage::new());
    let owner = account(1);
    let proxy = ProxyClient::at(FrontDoor::deploy(&mut executor, owner).unwrap());
    let unit = LockedCappedToken::deploy(&mut executor, owner).unwrap();
    proxy
        .transfer_delegation(&mut executor, owner, unit)
        .unwrap();

    Deployment {
        executor,
        owner,
        proxy,
        token: TokenClient::at(proxy.address()),
        unit,
    }
}

fn deploy_initialized(cap: Amount) -> Deployment {
    let mut d = deploy();
    d.token
        .initialize(&mut d.executor, d.owner, d.owner, cap)
        .unwrap();
    d
}

fn assert_reverted(result: Result<(), ExecutionError>, reason: &str) {
    match result {
        Err(err) => assert_eq!(err.revert_reason(), Some(reason), "unexpected error: {err}"),
        Ok(()) => panic!("expected revert with {reason}"),
    }
}

// ============================================================================
// Core token
// ============================================================================

#[test]
fn test_initializable_through_front_door() {
    let Deployment {
        mut executor,
        owner,
        proxy,
        token,
        unit,
    } = deploy();

    token.initialize(&mut executor, owner, owner, INIT_CAP).unwrap();

    assert_eq!(token.total_supply(&executor).unwrap(), 0);
    assert_eq!(token.cap(&executor).unwrap(), INIT_CAP);
    assert_eq!(token.owner(&executor).unwrap(), owner);
    assert!(token.initialized(&executor).unwrap());
    assert!(!token.unlocked(&executor).unwrap());
    assert_eq!(proxy.delegation(&executor).unwrap(), unit);
    assert_eq!(token.this_addr(&executor).unwrap(), unit);
}

#[test]
fn test_metadata_reads() {
    let d = deploy_initialized(INIT_CAP);

    assert_eq!(d.token.name(&d.executor).unwrap(), TOKEN_NAME);
    assert_eq!(d.token.symbol(&d.executor).unwrap(), TOKEN_SYMBOL);
    assert_eq!(d.token.decimals(&d.executor).unwrap(), TOKEN_DECIMALS);
}

#[test]
fn test_not_initializable_without_front_door() {
    let Deployment {
        mut executor,
        owner,
        token,
        unit,
        ..
    } = deploy();
    let direct = TokenClient::at(unit);

    assert_reverted(
        direct.initialize(&mut executor, owner, owner, INIT_CAP),
        "DirectCallForbidden",
    );

    // The unit's own storage stays empty and the front door is still usable
    assert!(!direct.initialized(&executor).unwrap());
    token.initialize(&mut executor, owner, owner, INIT_CAP).unwrap();
}

#[test]
fn test_initialize_with_unit_address_as_owner_rejected() {
    let Deployment {
        mut executor,
        owner,
        proxy,
        token,
        unit,
    } = deploy();

    // initialize(controller.address, cap) sent by the deployer
    assert_reverted(
        token.initialize(&mut executor, owner, unit, 100),
        "InvalidOwner",
    );
    assert_reverted(
        token.initialize(&mut executor, owner, proxy.address(), 100),
        "InvalidOwner",
    );
    assert!(!token.initialized(&executor).unwrap());

    // Nothing got stuck: the deployer still administers both sides
    token.initialize(&mut executor, owner, owner, 100).unwrap();
    token.mint(&mut executor, owner, owner, 100).unwrap();
    let new_unit = LockedCappedToken::deploy(&mut executor, owner).unwrap();
    proxy
        .transfer_delegation(&mut executor, owner, new_unit)
        .unwrap();
    assert_eq!(token.total_supply(&executor).unwrap(), 100);
}

#[test]
fn test_initialize_only_once() {
    let mut d = deploy_initialized(100);
    let other = account(2);

    assert_reverted(
        d.token.initialize(&mut d.executor, other, other, 999),
        "AlreadyInitialized",
    );
    assert_eq!(d.token.owner(&d.executor).unwrap(), d.owner);
    assert_eq!(d.token.cap(&d.executor).unwrap(), 100);
}

#[test]
fn test_mutations_before_initialize_fail() {
    let mut d = deploy();

    assert_reverted(
        d.token.mint(&mut d.executor, d.owner, d.owner, 1),
        "NotInitialized",
    );
    assert_reverted(
        d.token.transfer(&mut d.executor, d.owner, account(2), 0),
        "NotInitialized",
    );
}

#[test]
fn test_mint_to_address() {
    let mut d = deploy_initialized(100);
    let holder = account(2);

    d.token.mint(&mut d.executor, d.owner, holder, 100).unwrap();

    assert_eq!(d.token.balance_of(&d.executor, holder).unwrap(), 100);
    assert_eq!(d.token.total_supply(&d.executor).unwrap(), 100);
}

#[test]
fn test_cannot_mint_over_cap() {
    let mut d = deploy_initialized(100);
    let (x, y) = (account(2), account(3));

    assert_reverted(
        d.token.mint(&mut d.executor, d.owner, x, 200),
        "CapExceeded",
    );

    d.token.mint(&mut d.executor, d.owner, x, 100).unwrap();
    assert_reverted(d.token.mint(&mut d.executor, d.owner, y, 1), "CapExceeded");
    assert_eq!(d.token.total_supply(&d.executor).unwrap(), 100);
    assert_eq!(d.token.balance_of(&d.executor, y).unwrap(), 0);
}

#[test]
fn test_upgrade_keeps_state() {
    let mut d = deploy_initialized(200);
    let holder = account(2);

    d.token.mint(&mut d.executor, d.owner, holder, 100).unwrap();
    assert_eq!(d.token.total_supply(&d.executor).unwrap(), 100);

    let new_unit = LockedCappedToken::deploy(&mut d.executor, d.owner).unwrap();
    d.proxy
        .transfer_delegation(&mut d.executor, d.owner, new_unit)
        .unwrap();
    assert_eq!(d.proxy.delegation(&d.executor).unwrap(), new_unit);
    assert_eq!(d.token.this_addr(&d.executor).unwrap(), new_unit);

    d.token.mint(&mut d.executor, d.owner, holder, 100).unwrap();
    assert_eq!(d.token.total_supply(&d.executor).unwrap(), 200);
    assert_eq!(d.token.balance_of(&d.executor, holder).unwrap(), 200);
    // The new unit must not re-run initialization
    assert_reverted(
        d.token.initialize(&mut d.executor, d.owner, d.owner, 1_000),
        "AlreadyInitialized",
    );
}

#[test]
fn test_ownership_transfer() {
    let mut d = deploy_initialized(200);
    let other = account(2);

    d.token
        .transfer_ownership(&mut d.executor, d.owner, other)
        .unwrap();
    assert_eq!(d.token.owner(&d.executor).unwrap(), other);

    let events: Vec<TokenEvent> = d
        .executor
        .logs()
        .iter()
        .filter(|log| log.event == "OwnershipTransferred")
        .map(|log| TokenEvent::decode(&log.data).unwrap())
        .collect();
    assert_eq!(
        events,
        vec![TokenEvent::OwnershipTransferred {
            previous: d.owner,
            new_owner: other
        }]
    );
}

#[test]
fn test_non_owner_cannot_transfer_ownership() {
    let mut d = deploy_initialized(200);
    let other = account(3);

    assert_ne!(d.token.owner(&d.executor).unwrap(), other);
    assert_reverted(
        d.token.transfer_ownership(&mut d.executor, other, other),
        "Unauthorized",
    );
}

#[test]
fn test_previous_owner_cannot_mint() {
    let mut d = deploy_initialized(100);
    let other = account(2);

    d.token
        .transfer_ownership(&mut d.executor, d.owner, other)
        .unwrap();
    assert_reverted(
        d.token.mint(&mut d.executor, d.owner, d.owner, 100),
        "Unauthorized",
    );
}

#[test]
fn test_previous_owner_cannot_upgrade() {
    let mut d = deploy_initialized(200);
    let other = account(2);

    d.token.mint(&mut d.executor, d.owner, d.owner, 100).unwrap();
    let new_unit = LockedCappedToken::deploy(&mut d.executor, d.owner).unwrap();
    d.token
        .transfer_ownership(&mut d.executor, d.owner, other)
        .unwrap();

    assert_reverted(
        d.proxy.transfer_delegation(&mut d.executor, d.owner, new_unit),
        "Unauthorized",
    );
    assert_eq!(d.proxy.delegation(&d.executor).unwrap(), d.unit);
}

#[test]
fn test_new_owner_can_mint() {
    let mut d = deploy_initialized(100);
    let other = account(2);

    d.token
        .transfer_ownership(&mut d.executor, d.owner, other)
        .unwrap();
    d.token.mint(&mut d.executor, other, d.owner, 100).unwrap();

    assert_eq!(d.token.balance_of(&d.executor, d.owner).unwrap(), 100);
    assert_eq!(d.token.total_supply(&d.executor).unwrap(), 100);
}

#[test]
fn test_new_owner_can_upgrade() {
    let mut d = deploy_initialized(200);
    let other = account(2);

    d.token.mint(&mut d.executor, d.owner, d.owner, 100).unwrap();
    d.token
        .transfer_ownership(&mut d.executor, d.owner, other)
        .unwrap();

    let new_unit = LockedCappedToken::deploy(&mut d.executor, other).unwrap();
    d.proxy
        .transfer_delegation(&mut d.executor, other, new_unit)
        .unwrap();
    assert_eq!(d.proxy.delegation(&d.executor).unwrap(), new_unit);

    d.token.mint(&mut d.executor, other, d.owner, 100).unwrap();
    assert_eq!(d.token.total_supply(&d.executor).unwrap(), 200);
}

#[test]
fn test_ownership_guarded_against_zero_address() {
    let mut d = deploy_initialized(200);

    assert_reverted(
        d.token
            .transfer_ownership(&mut d.executor, d.owner, Address::zero()),
        "InvalidOwner",
    );
    assert_eq!(d.token.owner(&d.executor).unwrap(), d.owner);
}

// ============================================================================
// Sale lock
// ============================================================================

#[test]
fn test_only_owner_toggles_lock() {
    let mut d = deploy_initialized(100);
    let other = account(2);

    assert_reverted(
        d.token.set_unlock(&mut d.executor, other, true),
        "Unauthorized",
    );
    assert_reverted(
        d.token.set_unlock(&mut d.executor, d.owner, false),
        "UnlockUnchanged",
    );
    d.token.set_unlock(&mut d.executor, d.owner, true).unwrap();
    assert!(d.token.unlocked(&d.executor).unwrap());
    assert_reverted(
        d.token.set_unlock(&mut d.executor, other, false),
        "Unauthorized",
    );
}

#[test]
fn test_only_owner_authorizes() {
    let mut d = deploy_initialized(100);
    let (first, second) = (account(2), account(3));

    assert_reverted(
        d.token.set_authorized(&mut d.executor, first, first, true),
        "Unauthorized",
    );

    d.token
        .set_authorized(&mut d.executor, d.owner, first, true)
        .unwrap();
    assert!(d.token.authorized(&d.executor, first).unwrap());

    assert_reverted(
        d.token.set_authorized(&mut d.executor, d.owner, first, true),
        "AlreadyAuthorized",
    );
    // Authorized accounts cannot grant authorization themselves
    assert_reverted(
        d.token.set_authorized(&mut d.executor, first, second, true),
        "Unauthorized",
    );

    d.token
        .set_authorized(&mut d.executor, d.owner, second, true)
        .unwrap();
    assert!(d.token.authorized(&d.executor, second).unwrap());
}

#[test]
fn test_authorization_cannot_be_revoked() {
    let mut d = deploy_initialized(100);
    let holder = account(2);

    d.token
        .set_authorized(&mut d.executor, d.owner, holder, true)
        .unwrap();
    assert_reverted(
        d.token.set_authorized(&mut d.executor, d.owner, holder, false),
        "AuthorizationIrrevocable",
    );
    assert!(d.token.authorized(&d.executor, holder).unwrap());
}

#[test]
fn test_owner_transfers_while_locked() {
    let mut d = deploy_initialized(100);
    let receiver = account(2);

    d.token.mint(&mut d.executor, d.owner, d.owner, 100).unwrap();
    d.token
        .transfer(&mut d.executor, d.owner, receiver, 100)
        .unwrap();

    assert_eq!(d.token.balance_of(&d.executor, receiver).unwrap(), 100);
    assert_eq!(d.token.balance_of(&d.executor, d.owner).unwrap(), 0);
}

#[test]
fn test_lock_blocks_then_unlock_allows() {
    let mut d = deploy_initialized(100);
    let holder = account(2);

    d.token.mint(&mut d.executor, d.owner, d.owner, 100).unwrap();
    d.token
        .transfer(&mut d.executor, d.owner, holder, 100)
        .unwrap();

    assert_reverted(
        d.token.transfer(&mut d.executor, holder, d.owner, 100),
        "SaleLocked",
    );
    assert_eq!(d.token.balance_of(&d.executor, holder).unwrap(), 100);

    d.token.set_unlock(&mut d.executor, d.owner, true).unwrap();
    d.token
        .transfer(&mut d.executor, holder, d.owner, 100)
        .unwrap();
    assert_eq!(d.token.balance_of(&d.executor, d.owner).unwrap(), 100);
    assert_eq!(d.token.balance_of(&d.executor, holder).unwrap(), 0);
}

#[test]
fn test_authorized_transfers_while_locked() {
    let mut d = deploy_initialized(100);
    let sale = account(2);

    d.token.mint(&mut d.executor, d.owner, sale, 100).unwrap();
    assert_reverted(
        d.token.transfer(&mut d.executor, sale, d.owner, 100),
        "SaleLocked",
    );

    d.token
        .set_authorized(&mut d.executor, d.owner, sale, true)
        .unwrap();
    d.token
        .transfer(&mut d.executor, sale, d.owner, 100)
        .unwrap();
    assert_eq!(d.token.balance_of(&d.executor, d.owner).unwrap(), 100);
}

#[test]
fn test_allowances_while_locked() {
    let mut d = deploy_initialized(1_000);
    let owner = d.owner;
    let (authorized, other, receiver) = (account(2), account(3), account(4));

    d.token
        .set_authorized(&mut d.executor, owner, authorized, true)
        .unwrap();
    for holder in [owner, authorized, other] {
        d.token.mint(&mut d.executor, owner, holder, 100).unwrap();
    }

    d.token.approve(&mut d.executor, owner, receiver, 20).unwrap();
    d.token
        .approve(&mut d.executor, authorized, receiver, 20)
        .unwrap();
    assert_reverted(
        d.token.approve(&mut d.executor, other, receiver, 20),
        "SaleLocked",
    );
    assert_eq!(d.token.allowance(&d.executor, owner, receiver).unwrap(), 20);
    assert_eq!(
        d.token.allowance(&d.executor, authorized, receiver).unwrap(),
        20
    );
    assert_eq!(d.token.allowance(&d.executor, other, receiver).unwrap(), 0);

    d.token
        .increase_approval(&mut d.executor, owner, receiver, 20)
        .unwrap();
    d.token
        .decrease_approval(&mut d.executor, authorized, receiver, 10)
        .unwrap();
    assert_eq!(d.token.allowance(&d.executor, owner, receiver).unwrap(), 40);
    assert_eq!(
        d.token.allowance(&d.executor, authorized, receiver).unwrap(),
        10
    );

    // The receiver is the caller here, and it is neither owner nor authorized
    assert_reverted(
        d.token
            .transfer_from(&mut d.executor, receiver, owner, receiver, 10),
        "SaleLocked",
    );

    d.token.set_unlock(&mut d.executor, owner, true).unwrap();
    d.token
        .transfer_from(&mut d.executor, receiver, owner, receiver, 10)
        .unwrap();

    assert_eq!(d.token.allowance(&d.executor, owner, receiver).unwrap(), 30);
    assert_eq!(d.token.balance_of(&d.executor, owner).unwrap(), 90);
    assert_eq!(d.token.balance_of(&d.executor, receiver).unwrap(), 10);
}

#[test]
fn test_decrease_approval_below_zero_rejected() {
    let mut d = deploy_initialized(100);
    let spender = account(2);

    d.token.approve(&mut d.executor, d.owner, spender, 5).unwrap();
    assert_reverted(
        d.token
            .decrease_approval(&mut d.executor, d.owner, spender, 6),
        "InvalidAllowance",
    );
    assert_eq!(d.token.allowance(&d.executor, d.owner, spender).unwrap(), 5);
}

#[test]
fn test_failed_transaction_leaves_no_trace() {
    let mut d = deploy_initialized(100);
    let holder = account(2);
    let logs_before = d.executor.logs().len();

    assert_reverted(
        d.token.transfer(&mut d.executor, d.owner, holder, 1),
        "InsufficientBalance",
    );

    assert_eq!(d.executor.logs().len(), logs_before);
    assert_eq!(d.token.balance_of(&d.executor, holder).unwrap(), 0);
}

#[test]
fn test_events_recorded_against_front_door() {
    let mut d = deploy_initialized(100);
    let holder = account(2);

    d.token.mint(&mut d.executor, d.owner, holder, 7).unwrap();

    let log = d.executor.logs().last().unwrap();
    assert_eq!(log.event, "Mint");
    assert_eq!(log.contract, d.proxy.address());
    assert_eq!(log.code, d.unit);
    assert_eq!(
        TokenEvent::decode(&log.data).unwrap(),
        TokenEvent::Mint {
            to: holder,
            amount: 7
        }
    );
}

#[test]
fn test_direct_reads_see_empty_storage() {
    let mut d = deploy_initialized(100);
    d.token.mint(&mut d.executor, d.owner, d.owner, 50).unwrap();

    let direct = TokenClient::at(d.unit);
    assert_eq!(direct.total_supply(&d.executor).unwrap(), 0);
    assert_eq!(direct.balance_of(&d.executor, d.owner).unwrap(), 0);
    assert_eq!(direct.this_addr(&d.executor).unwrap(), d.unit);
}
