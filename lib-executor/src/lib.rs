//! Contract Execution Host
//!
//! This crate is the ledger every token call runs on. It owns all persistent
//! state, executes calls as atomic transactions, and provides the two
//! execution primitives the token logic depends on:
//!
//! - **Deployment**: code units are registered at derived addresses and learn
//!   their own address at construction time.
//! - **Delegate calls**: a unit's code can run against *another* account's
//!   storage, which is how the [`FrontDoor`] forwards calls to the current
//!   logic unit while keeping every byte of state in its own account.
//!
//! # Architecture
//!
//! ```text
//! caller ──> ContractExecutor::execute
//!              ├─> PendingStorage (write overlay, committed on success only)
//!              └─> CallFrame { ctx.this = front door }
//!                    └─> FrontDoor::call
//!                          ├─> delegation / transfer_delegation (handled here)
//!                          └─> delegate_call(delegation) ──> logic unit code
//!                                (ctx.this still = front door, ctx.code = logic unit)
//! ```

pub mod call;
pub mod code;
pub mod config;
pub mod context;
pub mod errors;
pub mod executor;
pub mod logs;
pub mod ownable;
pub mod proxy;
pub mod storage;

pub use call::{decode_return, encode_return, ContractCall};
pub use code::{CallFrame, CodeRegistry, ContractCode};
pub use config::ExecutorConfig;
pub use context::{CallOrigin, ExecutionContext, DEFAULT_MAX_CALL_DEPTH};
pub use errors::{ExecutionError, ExecutionResult, Revert, StorageError, StorageResult};
pub use executor::ContractExecutor;
pub use logs::ContractLog;
pub use proxy::{FrontDoor, ProxyClient};
pub use storage::{ContractStorage, MemoryStorage, PendingStorage, StateHandle};
