//! Token Registry Types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use lib_tokens::{OwnerChanged, Unauthorized};
use lib_types::{Address, Amount};

/// Sequential registry id
pub type TokenId = u64;

// ============================================================================
// RECORD
// ============================================================================

/// Active registry record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub id: TokenId,
    /// Bound identity; the only writer of `metadata`
    pub addr: Address,
    /// Three lowercase letters, unique among active records
    pub tla: String,
    /// Decimal base / denomination hint
    pub base: u64,
    /// Display name
    pub name: String,
    pub metadata: HashMap<String, Vec<u8>>,
}

impl Token {
    pub(crate) fn registered_event(&self) -> RegistryEvent {
        RegistryEvent::Registered {
            tla: self.tla.clone(),
            id: self.id,
            addr: self.addr,
            name: self.name.clone(),
        }
    }
}

// ============================================================================
// OUTCOMES
// ============================================================================

/// Business rule that rejected a registration
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    #[error("Registration fee not paid: required {required}, attached {paid}")]
    InsufficientFee { required: Amount, paid: Amount },

    #[error("Invalid TLA '{0}': expected exactly 3 lowercase letters")]
    InvalidTla(String),

    #[error("Address {0} already has an active record")]
    AddressTaken(Address),

    #[error("TLA '{0}' is already registered")]
    TlaTaken(String),
}

/// Soft outcome of `register`
///
/// A rejection does not abort the surrounding transaction; callers decide
/// whether to escalate it.
#[must_use = "a rejected registration leaves no record; inspect the outcome"]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Registration {
    Registered(TokenId),
    Rejected(Rejection),
}

impl Registration {
    pub fn is_registered(&self) -> bool {
        matches!(self, Registration::Registered(_))
    }

    pub fn id(&self) -> Option<TokenId> {
        match self {
            Registration::Registered(id) => Some(*id),
            Registration::Rejected(_) => None,
        }
    }
}

/// Soft outcome of `set_meta`
#[must_use = "an ignored metadata update changed nothing"]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetaUpdate {
    Applied,
    /// Caller is not the record's bound address (or the id is not active)
    Ignored,
}

// ============================================================================
// EVENTS
// ============================================================================

/// TokenReg log entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryEvent {
    Registered {
        tla: String,
        id: TokenId,
        addr: Address,
        name: String,
    },

    Unregistered { tla: String, id: TokenId },

    MetaChanged {
        id: TokenId,
        key: String,
        value: Vec<u8>,
    },

    NewOwner { old: Address, current: Address },
}

impl From<OwnerChanged> for RegistryEvent {
    fn from(changed: OwnerChanged) -> Self {
        RegistryEvent::NewOwner {
            old: changed.old,
            current: changed.current,
        }
    }
}

impl std::fmt::Display for RegistryEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryEvent::Registered { tla, id, .. } => write!(f, "Registered(id={}, tla={})", id, tla),
            RegistryEvent::Unregistered { tla, id } => write!(f, "Unregistered(id={}, tla={})", id, tla),
            RegistryEvent::MetaChanged { id, key, .. } => write!(f, "MetaChanged(id={}, key={})", id, key),
            RegistryEvent::NewOwner { current, .. } => write!(f, "NewOwner(current={})", current),
        }
    }
}

// ============================================================================
// ERRORS
// ============================================================================

/// Hard registry failures; the invocation aborts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error(transparent)]
    Unauthorized(#[from] Unauthorized),

    #[error("Token {0} not found")]
    TokenNotFound(TokenId),
}

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;
