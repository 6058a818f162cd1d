use serde::{Deserialize, Serialize};

use lib_types::{Address, Amount, BlockHeight};

use super::errors::ExecutionError;

/// Maximum allowed call depth to prevent runaway recursion between contracts
pub const DEFAULT_MAX_CALL_DEPTH: u32 = 10;

/// Discriminates the origin of a contract call for authorization purposes
///
/// - User: an external account invoked the contract directly
/// - Contract: another contract invoked it inside the same transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallOrigin {
    User,
    Contract,
}

/// Contract execution environment
///
/// Immutable context passed to every contract call. Authorization is derived
/// from `caller`, which the host sets and contracts never supply themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionContext {
    /// Identity invoking the call
    pub caller: Address,
    /// Contract being executed
    pub contract: Address,
    /// Native value attached to the call
    pub value: Amount,
    pub call_origin: CallOrigin,
    /// Height the enclosing transaction will commit at
    pub block_height: BlockHeight,
    /// Current call depth (0 = top-level user call)
    pub call_depth: u32,
    pub max_call_depth: u32,
}

impl ExecutionContext {
    /// Context for a user-initiated call
    pub fn new(caller: Address, contract: Address, value: Amount, block_height: BlockHeight) -> Self {
        Self {
            caller,
            contract,
            value,
            call_origin: CallOrigin::User,
            block_height,
            call_depth: 0,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }

    pub fn with_max_call_depth(mut self, max_call_depth: u32) -> Self {
        self.max_call_depth = max_call_depth;
        self
    }

    /// Context for a call made by the current contract into `callee`
    ///
    /// The current contract becomes the caller.
    ///
    /// # Errors
    /// - `ExecutionError::CallDepthExceeded` if the nested depth would pass `max_call_depth`
    pub fn nested_call(&self, callee: Address, value: Amount) -> Result<Self, ExecutionError> {
        if self.call_depth >= self.max_call_depth {
            return Err(ExecutionError::CallDepthExceeded {
                depth: self.call_depth + 1,
                max: self.max_call_depth,
            });
        }

        Ok(Self {
            caller: self.contract,
            contract: callee,
            value,
            call_origin: CallOrigin::Contract,
            block_height: self.block_height,
            call_depth: self.call_depth + 1,
            max_call_depth: self.max_call_depth,
        })
    }
}
