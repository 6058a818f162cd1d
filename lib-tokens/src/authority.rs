//! Single-owner authority
//!
//! Every contract on the platform is administered by exactly one address.
//! The capability is composed into each contract's state and checked
//! explicitly at the top of each restricted operation.

use lib_types::Address;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when a non-owner invokes an owner-only operation
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Unauthorized: {caller} is not the owner")]
pub struct Unauthorized {
    pub caller: Address,
}

/// Record of a completed ownership transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerChanged {
    pub old: Address,
    pub current: Address,
}

/// Current admin address plus the transfer-of-admin operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Administered {
    owner: Address,
}

impl Administered {
    pub fn new(owner: Address) -> Self {
        Self { owner }
    }

    /// Current admin address
    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn is_owner(&self, caller: &Address) -> bool {
        &self.owner == caller
    }

    /// Fail unless `caller` is the current owner
    pub fn ensure_owner(&self, caller: &Address) -> Result<(), Unauthorized> {
        if self.is_owner(caller) {
            Ok(())
        } else {
            Err(Unauthorized { caller: *caller })
        }
    }

    /// Hand the capability to `new_owner`; only the current owner may call
    pub fn set_owner(
        &mut self,
        caller: &Address,
        new_owner: Address,
    ) -> Result<OwnerChanged, Unauthorized> {
        self.ensure_owner(caller)?;
        let old = std::mem::replace(&mut self.owner, new_owner);
        Ok(OwnerChanged {
            old,
            current: new_owner,
        })
    }
}
