//! Call payloads
//!
//! A call is a method name plus pre-serialized arguments. The executor and
//! the front door never interpret `params`; only the code that finally
//! handles the method decodes them.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::{ExecutionError, ExecutionResult};

/// A single method invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractCall {
    /// Method name in the callee
    pub method: String,
    /// Bincode-encoded arguments
    pub params: Vec<u8>,
}

impl ContractCall {
    /// Build a call, encoding `params` with bincode
    pub fn new<P: Serialize>(method: impl Into<String>, params: &P) -> ExecutionResult<Self> {
        Ok(Self {
            method: method.into(),
            params: bincode::serialize(params)?,
        })
    }

    /// Build a call that takes no arguments
    pub fn without_params(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            params: Vec::new(),
        }
    }

    /// Decode the arguments as `P`
    pub fn decode_params<P: DeserializeOwned>(&self) -> ExecutionResult<P> {
        bincode::deserialize(&self.params).map_err(|e| {
            ExecutionError::Codec(format!("bad params for '{}': {}", self.method, e))
        })
    }

    /// Decode a whole serialized call (as carried by tooling)
    pub fn from_bytes(bytes: &[u8]) -> ExecutionResult<Self> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// Basic sanity checks before execution
    ///
    /// - Method name is not empty and at most `max_method_len` bytes
    /// - Method name is an identifier (alphanumeric + underscore)
    pub fn validate_structure(&self, max_method_len: usize) -> ExecutionResult<()> {
        if self.method.is_empty() {
            return Err(ExecutionError::InvalidCall(
                "Method name cannot be empty".to_string(),
            ));
        }

        if self.method.len() > max_method_len {
            return Err(ExecutionError::InvalidCall(format!(
                "Method name must be {} characters or less",
                max_method_len
            )));
        }

        if !self
            .method
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(ExecutionError::InvalidCall(format!(
                "Method name '{}' contains invalid characters",
                self.method
            )));
        }

        Ok(())
    }
}

/// Encode a method's return value
pub fn encode_return<T: Serialize>(value: &T) -> ExecutionResult<Vec<u8>> {
    Ok(bincode::serialize(value)?)
}

/// Decode a method's return value
pub fn decode_return<T: DeserializeOwned>(data: &[u8]) -> ExecutionResult<T> {
    Ok(bincode::deserialize(data)?)
}
