use thiserror::Error;

use lib_tokens::TokenError;
use lib_types::{Address, Amount};

use crate::contracts::coin_manager::ManagerError;
use crate::contracts::token_registry::RegistryError;

/// Hard failure of a transaction; all staged changes are discarded
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Manager error: {0}")]
    Manager(#[from] ManagerError),

    #[error("Insufficient funds in {account}: have {have}, need {need}")]
    InsufficientFunds {
        account: Address,
        have: Amount,
        need: Amount,
    },

    #[error("No contract at {0}")]
    UnknownContract(Address),

    #[error("Call depth limit exceeded: {depth} > {max}")]
    CallDepthExceeded { depth: u32, max: u32 },

    #[error("Arithmetic overflow")]
    Overflow,

    #[error("State snapshot error: {0}")]
    Snapshot(String),
}

/// Result type for executor operations
pub type ExecutionResult<T> = Result<T, ExecutionError>;
