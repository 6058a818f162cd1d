//! Token Platform Host
//!
//! In-process execution environment for the token platform: the TokenReg
//! registry and BasicCoinManager factory contracts, the staged-transaction
//! executor that hosts them next to BasicCoin ledgers, the event log, and
//! platform configuration.
//!
//! Ledger logic itself lives in `lib-tokens`; shared primitives in
//! `lib-types`.

pub mod config;
pub mod contracts;
pub mod events;

// Re-export the public surface
pub use config::{ConfigError, PlatformConfig};
pub use contracts::{
    BasicCoinManager, ContractExecutor, Deployment, ExecutionContext, ExecutionError,
    ExecutionResult, FeePolicy, ManagerError, MetaUpdate, Registration, RegistryError,
    Rejection, Token, TokenId, TokenRegistry,
};
pub use events::{ContractEvent, ContractLog};

pub use lib_tokens::{BasicCoin, CoinEvent, TokenError};
pub use lib_types::{Address, Amount, BlockHeight, ETHER};
