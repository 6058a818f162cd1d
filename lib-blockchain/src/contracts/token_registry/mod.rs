//! Token Registry Contract Module (TokenReg)
//!
//! Global directory binding short tickers and metadata to issued assets:
//! - Sequential ids, stable until unregistration
//! - Global uniqueness of ticker (TLA) and bound address among active records
//! - Per-record metadata writable only by the bound address
//! - Mutable registration fee, collected fees drained by the owner
//!
//! # Failure conventions
//!
//! Business-rule rejections of `register` and unauthorized `set_meta` calls
//! are soft: they return [`Registration::Rejected`] / [`MetaUpdate::Ignored`]
//! and leave state untouched. Authorization failures on owner-only
//! operations and unknown ids are hard [`RegistryError`]s.

pub mod core;
pub mod types;
pub mod validation;

#[cfg(test)]
mod tests;

pub use self::core::{TokenRegistry, DEFAULT_FEE};
pub use types::{
    MetaUpdate, Registration, RegistryError, RegistryEvent, RegistryResult, Rejection, Token,
    TokenId,
};
pub use validation::{validate_tla, TLA_LENGTH};
