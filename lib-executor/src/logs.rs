//! Contract logs emitted during execution

use lib_types::{Address, TxHash};
use serde::{Deserialize, Serialize};

/// A single event emitted by contract code
///
/// `contract` is the account whose storage the event concerns (the front
/// door for forwarded calls); `code` is the unit whose logic emitted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractLog {
    pub contract: Address,
    pub code: Address,
    pub event: String,
    pub data: Vec<u8>,
    pub tx_hash: TxHash,
}

impl ContractLog {
    pub fn new(contract: Address, code: Address, event: String, data: Vec<u8>, tx_hash: TxHash) -> Self {
        Self {
            contract,
            code,
            event,
            data,
            tx_hash,
        }
    }
}
