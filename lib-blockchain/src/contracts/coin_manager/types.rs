//! Factory Types

use serde::{Deserialize, Serialize};
use thiserror::Error;

use lib_tokens::{OwnerChanged, Unauthorized};
use lib_types::{Address, Amount};

use crate::contracts::token_registry::Rejection;

/// How the value attached to `deploy` is matched against the registry fee
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeePolicy {
    /// Attached value must equal the fee
    #[default]
    Exact,
    /// Attached value must cover the fee; the surplus stays with the factory
    AtLeast,
}

impl FeePolicy {
    pub fn check(&self, required: Amount, attached: Amount) -> Result<(), ManagerError> {
        match self {
            FeePolicy::Exact if attached != required => {
                Err(ManagerError::FeeMismatch { required, attached })
            }
            FeePolicy::AtLeast if attached < required => {
                Err(ManagerError::InsufficientFee { required, attached })
            }
            _ => Ok(()),
        }
    }
}

impl std::fmt::Display for FeePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeePolicy::Exact => write!(f, "exact"),
            FeePolicy::AtLeast => write!(f, "at_least"),
        }
    }
}

/// Record of one factory deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    /// Position in the global sequence
    pub index: u64,
    pub coin: Address,
    pub creator: Address,
    /// Registry the coin was registered against
    pub registry: Address,
}

/// BasicCoinManager log entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ManagerEvent {
    Created { creator: Address, coin: Address },
    NewOwner { old: Address, current: Address },
}

impl From<OwnerChanged> for ManagerEvent {
    fn from(changed: OwnerChanged) -> Self {
        ManagerEvent::NewOwner {
            old: changed.old,
            current: changed.current,
        }
    }
}

impl std::fmt::Display for ManagerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ManagerEvent::Created { creator, coin } => {
                write!(f, "Created(creator={}, coin={})", creator, coin)
            }
            ManagerEvent::NewOwner { current, .. } => write!(f, "NewOwner(current={})", current),
        }
    }
}

/// Factory failures; every variant aborts the deployment
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ManagerError {
    #[error(transparent)]
    Unauthorized(#[from] Unauthorized),

    #[error("Attached value {attached} must equal the registration fee {required}")]
    FeeMismatch { required: Amount, attached: Amount },

    #[error("Attached value {attached} does not cover the registration fee {required}")]
    InsufficientFee { required: Amount, attached: Amount },

    #[error("Registry rejected the coin: {0}")]
    RegistrationRejected(Rejection),

    #[error("Deployment {0} not found")]
    DeploymentNotFound(u64),

    #[error("Deployment {index} of owner {owner} not found")]
    OwnerDeploymentNotFound { owner: Address, index: u64 },
}

/// Result type for factory operations
pub type ManagerResult<T> = Result<T, ManagerError>;
