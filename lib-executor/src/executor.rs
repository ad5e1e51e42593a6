//! Contract executor
//!
//! Runs every call as one atomic transaction: all guards run against a
//! [`PendingStorage`] overlay, and the overlay (plus the logs it produced) is
//! committed only when the whole call, including nested delegate calls,
//! succeeds. A failure anywhere leaves storage exactly as it was.

use lib_types::{Address, TxHash};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::call::ContractCall;
use crate::code::{CallFrame, CodeRegistry, ContractCode};
use crate::config::ExecutorConfig;
use crate::context::ExecutionContext;
use crate::errors::{ExecutionError, ExecutionResult};
use crate::logs::ContractLog;
use crate::storage::{ContractStorage, PendingStorage};

/// Domain separator for derived contract addresses
const CONTRACT_ADDRESS_DOMAIN: &[u8] = b"contract:address:v1";

/// Main contract executor
pub struct ContractExecutor<S: ContractStorage> {
    storage: S,
    registry: CodeRegistry,
    /// Per-deployer deployment counters, used to derive fresh addresses
    nonces: HashMap<Address, u64>,
    logs: Vec<ContractLog>,
    config: ExecutorConfig,
    tx_counter: u64,
}

impl<S: ContractStorage> ContractExecutor<S> {
    pub fn new(storage: S) -> Self {
        Self::with_config(storage, ExecutorConfig::default())
    }

    pub fn with_config(storage: S, config: ExecutorConfig) -> Self {
        Self {
            storage,
            registry: HashMap::new(),
            nonces: HashMap::new(),
            logs: Vec::new(),
            config,
            tx_counter: 0,
        }
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Deploy a code unit
    ///
    /// `build` receives the freshly derived address, so the unit can record
    /// where it lives. The unit's `construct` hook then runs as its own
    /// transaction with `caller = deployer` and `this = code = address`.
    pub fn deploy<C, F>(&mut self, deployer: Address, build: F) -> ExecutionResult<Address>
    where
        C: ContractCode + 'static,
        F: FnOnce(Address) -> C,
    {
        let address = self.next_contract_address(&deployer);
        let code: Arc<dyn ContractCode> = Arc::new(build(address));
        let tx_hash = self.next_tx_hash(&deployer, &address, "construct", &[]);

        let pending = PendingStorage::new(&self.storage);
        let mut staged_logs = Vec::new();
        let ctx = ExecutionContext::new(deployer, address, tx_hash)
            .with_max_call_depth(self.config.max_call_depth);
        {
            let mut frame = CallFrame::new(ctx, &pending, &self.registry, &mut staged_logs);
            code.construct(&mut frame)?;
        }
        pending.commit()?;

        info!(
            address = %address,
            deployer = %deployer,
            code = code.name(),
            "Contract deployed"
        );
        if self.config.record_logs {
            self.logs.extend(staged_logs);
        }
        self.registry.insert(address, code);
        Ok(address)
    }

    /// True when code is registered at `address`
    pub fn has_code(&self, address: &Address) -> bool {
        self.registry.contains_key(address)
    }

    /// Name of the code registered at `address`
    pub fn code_name(&self, address: &Address) -> Option<&str> {
        self.registry.get(address).map(|code| code.name())
    }

    /// Execute a state-changing call as one atomic transaction
    pub fn execute(
        &mut self,
        caller: Address,
        target: Address,
        call: ContractCall,
    ) -> ExecutionResult<Vec<u8>> {
        call.validate_structure(self.config.max_method_len)?;
        let code = self
            .registry
            .get(&target)
            .cloned()
            .ok_or(ExecutionError::NoCode(target))?;
        let tx_hash = self.next_tx_hash(&caller, &target, &call.method, &call.params);

        let pending = PendingStorage::new(&self.storage);
        let mut staged_logs = Vec::new();
        let ctx = ExecutionContext::new(caller, target, tx_hash)
            .with_max_call_depth(self.config.max_call_depth);

        let result = {
            let mut frame = CallFrame::new(ctx, &pending, &self.registry, &mut staged_logs);
            code.call(&mut frame, &call)
        };

        match result {
            Ok(data) => {
                let writes = pending.commit()?;
                debug!(
                    tx = %tx_hash,
                    caller = %caller,
                    target = %target,
                    method = %call.method,
                    writes,
                    "Transaction committed"
                );
                if self.config.record_logs {
                    self.logs.extend(staged_logs);
                }
                Ok(data)
            }
            Err(err) => {
                pending.discard();
                warn!(
                    tx = %tx_hash,
                    caller = %caller,
                    target = %target,
                    method = %call.method,
                    error = %err,
                    "Transaction aborted"
                );
                Err(err)
            }
        }
    }

    /// Run a call without committing anything
    ///
    /// The caller is the zero address; writes and logs are discarded.
    pub fn query(&self, target: Address, call: ContractCall) -> ExecutionResult<Vec<u8>> {
        call.validate_structure(self.config.max_method_len)?;
        let code = self
            .registry
            .get(&target)
            .cloned()
            .ok_or(ExecutionError::NoCode(target))?;

        let pending = PendingStorage::new(&self.storage);
        let mut scratch_logs = Vec::new();
        let ctx = ExecutionContext::new(Address::zero(), target, TxHash::zero())
            .with_max_call_depth(self.config.max_call_depth);
        let mut frame = CallFrame::new(ctx, &pending, &self.registry, &mut scratch_logs);
        code.call(&mut frame, &call)
    }

    /// Logs of committed transactions, oldest first
    pub fn logs(&self) -> &[ContractLog] {
        &self.logs
    }

    fn next_contract_address(&mut self, deployer: &Address) -> Address {
        let nonce = self.nonces.entry(*deployer).or_insert(0);
        let mut hasher = blake3::Hasher::new();
        hasher.update(CONTRACT_ADDRESS_DOMAIN);
        hasher.update(deployer.as_bytes());
        hasher.update(&nonce.to_le_bytes());
        *nonce += 1;
        Address::new(*hasher.finalize().as_bytes())
    }

    fn next_tx_hash(&mut self, caller: &Address, target: &Address, method: &str, params: &[u8]) -> TxHash {
        self.tx_counter += 1;
        let mut hasher = blake3::Hasher::new();
        hasher.update(caller.as_bytes());
        hasher.update(target.as_bytes());
        hasher.update(method.as_bytes());
        hasher.update(params);
        hasher.update(&self.tx_counter.to_le_bytes());
        TxHash::new(*hasher.finalize().as_bytes())
    }
}
