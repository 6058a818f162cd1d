//! Token Contract Errors

use lib_types::{Address, Amount};
use thiserror::Error;

use crate::authority::Unauthorized;

/// Error during ledger operations
///
/// Every variant aborts the invocation; the executor discards the staged
/// state of the surrounding transaction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Total supply must be greater than zero")]
    ZeroSupply,

    #[error("Insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: Amount, need: Amount },

    #[error("Insufficient allowance for spender {spender}: have {have}, need {need}")]
    InsufficientAllowance {
        spender: Address,
        have: Amount,
        need: Amount,
    },

    #[error(transparent)]
    Unauthorized(#[from] Unauthorized),

    #[error("Arithmetic overflow")]
    Overflow,
}

/// Result type for token operations
pub type TokenResult<T> = Result<T, TokenError>;
