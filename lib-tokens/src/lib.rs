//! Locked ILM Token (LILM)
//!
//! This crate defines the replaceable logic unit of an upgradeable, capped
//! token. The unit is stateless: deployed on its own it owns nothing useful,
//! and every state change it makes lands in the storage of the front door
//! that forwards to it.
//!
//! # Key Types
//!
//! - [`LockedCappedToken`]: the logic unit (initialization guard, minting,
//!   ownership, sale lock, ERC20-style transfer and allowance engine)
//! - [`TokenCall`]: the typed call surface
//! - [`TokenState`]: typed view of the storage the unit operates on
//! - [`TokenClient`]: typed calls through an executor
//!
//! # Execution
//!
//! Deploy a [`FrontDoor`](lib_executor::FrontDoor), deploy a
//! [`LockedCappedToken`], point the front door at it, then call
//! `initialize` through the front door.

pub mod abi;
pub mod client;
pub mod controller;
pub mod errors;
pub mod events;
pub mod state;

pub use abi::TokenCall;
pub use client::TokenClient;
pub use controller::{LockedCappedToken, TOKEN_DECIMALS, TOKEN_NAME, TOKEN_SYMBOL};
pub use errors::{TokenError, TokenResult};
pub use events::TokenEvent;
pub use state::TokenState;
