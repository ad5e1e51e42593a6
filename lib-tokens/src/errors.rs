//! Token Contract Errors

use lib_executor::ownable::OwnableError;
use lib_executor::{ExecutionError, StorageError};
use lib_types::Amount;
use thiserror::Error;

/// Error during token operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Token already initialized")]
    AlreadyInitialized,

    #[error("Direct call forbidden: logic must be reached through the front door")]
    DirectCallForbidden,

    #[error("Token not initialized")]
    NotInitialized,

    #[error("Supply cap exceeded: cap {cap}, would have {would_have}")]
    CapExceeded { cap: Amount, would_have: Amount },

    #[error("Invalid owner: the zero address, the logic unit and the front door can never act as owner")]
    InvalidOwner,

    #[error("Unlock flag is already {0}")]
    UnlockUnchanged(bool),

    #[error("Address is already authorized")]
    AlreadyAuthorized,

    #[error("Authorization cannot be revoked")]
    AuthorizationIrrevocable,

    #[error("Sale is locked for this caller")]
    SaleLocked,

    #[error("Invalid recipient: the zero address cannot receive tokens")]
    InvalidRecipient,

    #[error("Insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: Amount, need: Amount },

    #[error("Insufficient allowance: have {have}, need {need}")]
    InsufficientAllowance { have: Amount, need: Amount },

    #[error("Invalid allowance: cannot decrease {have} by {decrease}")]
    InvalidAllowance { have: Amount, decrease: Amount },

    #[error("Arithmetic overflow")]
    Overflow,

    #[error("Unknown method: {0}")]
    UnknownMethod(String),

    #[error("Codec error: {0}")]
    Codec(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl TokenError {
    /// Stable reason code carried by the revert
    pub fn reason(&self) -> &'static str {
        match self {
            TokenError::Unauthorized(_) => "Unauthorized",
            TokenError::AlreadyInitialized => "AlreadyInitialized",
            TokenError::DirectCallForbidden => "DirectCallForbidden",
            TokenError::NotInitialized => "NotInitialized",
            TokenError::CapExceeded { .. } => "CapExceeded",
            TokenError::InvalidOwner => "InvalidOwner",
            TokenError::UnlockUnchanged(_) => "UnlockUnchanged",
            TokenError::AlreadyAuthorized => "AlreadyAuthorized",
            TokenError::AuthorizationIrrevocable => "AuthorizationIrrevocable",
            TokenError::SaleLocked => "SaleLocked",
            TokenError::InvalidRecipient => "InvalidRecipient",
            TokenError::InsufficientBalance { .. } => "InsufficientBalance",
            TokenError::InsufficientAllowance { .. } => "InsufficientAllowance",
            TokenError::InvalidAllowance { .. } => "InvalidAllowance",
            TokenError::Overflow => "Overflow",
            TokenError::UnknownMethod(_) => "UnknownMethod",
            TokenError::Codec(_) => "Codec",
            TokenError::Storage(_) => "Storage",
        }
    }
}

impl From<bincode::Error> for TokenError {
    fn from(err: bincode::Error) -> Self {
        TokenError::Codec(err.to_string())
    }
}

impl From<OwnableError> for TokenError {
    fn from(err: OwnableError) -> Self {
        match err {
            OwnableError::Storage(e) => TokenError::Storage(e),
            other => TokenError::Unauthorized(other.to_string()),
        }
    }
}

impl From<TokenError> for ExecutionError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Storage(e) => ExecutionError::Storage(e),
            other => ExecutionError::revert(other.reason(), other.to_string()),
        }
    }
}

/// Result type for token operations
pub type TokenResult<T> = Result<T, TokenError>;
