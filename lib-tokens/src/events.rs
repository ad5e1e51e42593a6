//! Token events

use lib_types::{Address, Amount};
use serde::{Deserialize, Serialize};

/// Events recorded in the executor's contract log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenEvent {
    Initialized { owner: Address, cap: Amount },
    Mint { to: Address, amount: Amount },
    Transfer { from: Address, to: Address, amount: Amount },
    Approval { owner: Address, spender: Address, amount: Amount },
    OwnershipTransferred { previous: Address, new_owner: Address },
    UnlockChanged { unlocked: bool },
    Authorized { account: Address },
}

impl TokenEvent {
    /// Event name as stored in the log
    pub fn name(&self) -> &'static str {
        match self {
            TokenEvent::Initialized { .. } => "Initialized",
            TokenEvent::Mint { .. } => "Mint",
            TokenEvent::Transfer { .. } => "Transfer",
            TokenEvent::Approval { .. } => "Approval",
            TokenEvent::OwnershipTransferred { .. } => "OwnershipTransferred",
            TokenEvent::UnlockChanged { .. } => "UnlockChanged",
            TokenEvent::Authorized { .. } => "Authorized",
        }
    }

    pub fn decode(data: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(data)
    }
}
