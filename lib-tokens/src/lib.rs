//! BasicCoin Token Contracts
//!
//! This crate defines the fixed-supply ledger contract and the single-owner
//! capability shared by every contract on the platform.
//!
//! Cross-contract orchestration (registration, factory deployment) and
//! transaction atomicity are enforced in `lib-blockchain`.
//!
//! # Key Types
//!
//! - [`BasicCoin`]: fixed-supply ledger with balances and allowances
//! - [`Administered`]: current admin address plus transfer-of-admin
//! - [`CoinEvent`]: log entries emitted on the success path

pub mod authority;
pub mod contract;
pub mod errors;
pub mod events;

pub use authority::{Administered, OwnerChanged, Unauthorized};
pub use contract::{BasicCoin, DEFAULT_BASE};
pub use errors::{TokenError, TokenResult};
pub use events::CoinEvent;
