//! Ledger Events
//!
//! Emitted only when an operation succeeds.

use lib_types::{Address, Amount};
use serde::{Deserialize, Serialize};

use crate::authority::OwnerChanged;

/// BasicCoin log entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoinEvent {
    /// Value moved between holders (direct or via allowance)
    Transfer {
        from: Address,
        to: Address,
        value: Amount,
    },

    /// Allowance set for a spender
    Approval {
        owner: Address,
        spender: Address,
        value: Amount,
    },

    /// Admin handed over
    NewOwner { old: Address, current: Address },
}

impl From<OwnerChanged> for CoinEvent {
    fn from(changed: OwnerChanged) -> Self {
        CoinEvent::NewOwner {
            old: changed.old,
            current: changed.current,
        }
    }
}

impl std::fmt::Display for CoinEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoinEvent::Transfer { value, .. } => write!(f, "Transfer(value={})", value),
            CoinEvent::Approval { value, .. } => write!(f, "Approval(value={})", value),
            CoinEvent::NewOwner { current, .. } => write!(f, "NewOwner(current={})", current),
        }
    }
}
