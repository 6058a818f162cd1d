//! # Platform Contracts
//!
//! - [`token_registry`]: TokenReg, the global ticker/metadata directory
//! - [`coin_manager`]: BasicCoinManager, the deploy-and-register factory
//! - [`executor`]: the host that runs both, plus BasicCoin ledgers, inside
//!   atomic transactions

pub mod coin_manager;
pub mod executor;
pub mod token_registry;

pub use coin_manager::{BasicCoinManager, Deployment, DeploymentHost, FeePolicy, ManagerError, ManagerEvent};
pub use executor::{
    CallOrigin, ContractExecutor, ExecutionContext, ExecutionError, ExecutionResult, WorldState,
    DEFAULT_MAX_CALL_DEPTH,
};
pub use token_registry::{
    MetaUpdate, Registration, RegistryError, RegistryEvent, Rejection, Token, TokenId, TokenRegistry,
};
