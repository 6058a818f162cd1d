//! BasicCoinManager Contract Module
//!
//! Factory that deploys a new BasicCoin and registers it against a
//! caller-chosen TokenReg inside one atomic unit. A registry rejection is
//! escalated to a hard [`ManagerError::RegistrationRejected`], so the
//! surrounding transaction rolls back the freshly constructed coin.
//!
//! The factory reaches the host through [`DeploymentHost`], which the
//! executor implements over its staged world state.

pub mod core;
pub mod types;

pub use self::core::{BasicCoinManager, DeploymentHost};
pub use types::{Deployment, FeePolicy, ManagerError, ManagerEvent, ManagerResult};
