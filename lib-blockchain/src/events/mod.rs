//! Contract Event Log
//!
//! Log entries are the only externally observable audit trail besides direct
//! state reads. The executor appends them only when a transaction commits.

use serde::{Deserialize, Serialize};

use lib_tokens::CoinEvent;
use lib_types::{Address, BlockHeight};

use crate::contracts::coin_manager::ManagerEvent;
use crate::contracts::token_registry::RegistryEvent;

// ============================================================================
// EVENT TYPES
// ============================================================================

/// Event emitted by one of the platform contracts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ContractEvent {
    /// BasicCoin ledger event
    Coin(CoinEvent),
    /// TokenReg registry event
    Registry(RegistryEvent),
    /// BasicCoinManager factory event
    Manager(ManagerEvent),
}

impl From<CoinEvent> for ContractEvent {
    fn from(event: CoinEvent) -> Self {
        ContractEvent::Coin(event)
    }
}

impl From<RegistryEvent> for ContractEvent {
    fn from(event: RegistryEvent) -> Self {
        ContractEvent::Registry(event)
    }
}

impl From<ManagerEvent> for ContractEvent {
    fn from(event: ManagerEvent) -> Self {
        ContractEvent::Manager(event)
    }
}

impl std::fmt::Display for ContractEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContractEvent::Coin(event) => write!(f, "{}", event),
            ContractEvent::Registry(event) => write!(f, "{}", event),
            ContractEvent::Manager(event) => write!(f, "{}", event),
        }
    }
}

// ============================================================================
// LOG ENTRY
// ============================================================================

/// A committed log entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContractLog {
    /// Emitting contract
    pub contract: Address,
    /// Height of the transaction that emitted it
    pub block_height: BlockHeight,
    pub event: ContractEvent,
}

impl ContractLog {
    pub fn coin_event(&self) -> Option<&CoinEvent> {
        match &self.event {
            ContractEvent::Coin(event) => Some(event),
            _ => None,
        }
    }

    pub fn registry_event(&self) -> Option<&RegistryEvent> {
        match &self.event {
            ContractEvent::Registry(event) => Some(event),
            _ => None,
        }
    }

    pub fn manager_event(&self) -> Option<&ManagerEvent> {
        match &self.event {
            ContractEvent::Manager(event) => Some(event),
            _ => None,
        }
    }
}
