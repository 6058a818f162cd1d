use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use lib_tokens::Administered;
use lib_types::{Address, Amount, ETHER};

use super::types::*;
use super::validation::validate_tla;
use crate::contracts::executor::ExecutionContext;

/// Registration fee for a freshly deployed registry
pub const DEFAULT_FEE: Amount = ETHER;

/// TokenReg contract
///
/// The registry never moves value itself. The executor credits the attached
/// value to the registry account once `register` returns
/// [`Registration::Registered`], and pays the account out on `drain`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRegistry {
    admin: Administered,
    fee: Amount,
    /// Next id to hand out; never reused
    next_id: TokenId,
    /// Active records ordered by id
    tokens: BTreeMap<TokenId, Token>,
    /// addr -> id, active records only
    by_address: HashMap<Address, TokenId>,
    /// tla -> id, active records only
    by_tla: HashMap<String, TokenId>,
}

impl TokenRegistry {
    pub fn new(owner: Address, fee: Amount) -> Self {
        Self {
            admin: Administered::new(owner),
            fee,
            next_id: 0,
            tokens: BTreeMap::new(),
            by_address: HashMap::new(),
            by_tla: HashMap::new(),
        }
    }

    pub fn owner(&self) -> Address {
        self.admin.owner()
    }

    /// Current registration fee
    pub fn fee(&self) -> Amount {
        self.fee
    }

    /// Number of active records
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Register `addr` under `tla`
    ///
    /// Rules are checked in order: fee, ticker shape, address uniqueness,
    /// ticker uniqueness. The first failing rule rejects the call without
    /// touching state.
    pub fn register(
        &mut self,
        ctx: &ExecutionContext,
        addr: Address,
        tla: &str,
        base: u64,
        name: &str,
    ) -> Registration {
        if let Err(rejection) = self.check_registration(ctx.value, &addr, tla) {
            tracing::warn!("TokenReg: registration of '{}' rejected: {}", tla, rejection);
            return Registration::Rejected(rejection);
        }

        let id = self.next_id;
        self.next_id += 1;

        self.tokens.insert(
            id,
            Token {
                id,
                addr,
                tla: tla.to_string(),
                base,
                name: name.to_string(),
                metadata: HashMap::new(),
            },
        );
        self.by_address.insert(addr, id);
        self.by_tla.insert(tla.to_string(), id);

        tracing::info!("TokenReg: registered '{}' as id {} for {}", tla, id, addr);
        Registration::Registered(id)
    }

    fn check_registration(&self, paid: Amount, addr: &Address, tla: &str) -> Result<(), Rejection> {
        if paid < self.fee {
            return Err(Rejection::InsufficientFee {
                required: self.fee,
                paid,
            });
        }
        validate_tla(tla)?;
        if self.by_address.contains_key(addr) {
            return Err(Rejection::AddressTaken(*addr));
        }
        if self.by_tla.contains_key(tla) {
            return Err(Rejection::TlaTaken(tla.to_string()));
        }
        Ok(())
    }

    /// Remove an active record (owner only)
    ///
    /// The record's ticker and address become available again; metadata is
    /// dropped with the record.
    pub fn unregister(&mut self, ctx: &ExecutionContext, id: TokenId) -> RegistryResult<RegistryEvent> {
        self.admin.ensure_owner(&ctx.caller)?;

        let token = self.tokens.remove(&id).ok_or(RegistryError::TokenNotFound(id))?;
        self.by_address.remove(&token.addr);
        self.by_tla.remove(&token.tla);

        tracing::info!("TokenReg: unregistered '{}' (id {})", token.tla, id);
        Ok(RegistryEvent::Unregistered { tla: token.tla, id })
    }

    /// Read an active record
    pub fn token(&self, id: TokenId) -> RegistryResult<&Token> {
        self.tokens.get(&id).ok_or(RegistryError::TokenNotFound(id))
    }

    pub fn from_address(&self, addr: &Address) -> Option<(TokenId, &Token)> {
        let id = *self.by_address.get(addr)?;
        self.tokens.get(&id).map(|token| (id, token))
    }

    pub fn from_tla(&self, tla: &str) -> Option<(TokenId, &Token)> {
        let id = *self.by_tla.get(tla)?;
        self.tokens.get(&id).map(|token| (id, token))
    }

    /// Active records in id order
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens.values()
    }

    /// Write a metadata entry; only the record's bound address may do so
    pub fn set_meta(&mut self, ctx: &ExecutionContext, id: TokenId, key: &str, value: &[u8]) -> MetaUpdate {
        match self.tokens.get_mut(&id) {
            Some(token) if token.addr == ctx.caller => {
                token.metadata.insert(key.to_string(), value.to_vec());
                tracing::debug!("TokenReg: meta '{}' set on id {}", key, id);
                MetaUpdate::Applied
            }
            _ => {
                tracing::debug!("TokenReg: meta write on id {} by {} ignored", id, ctx.caller);
                MetaUpdate::Ignored
            }
        }
    }

    /// Metadata value, empty when the id or key is unknown
    pub fn meta(&self, id: TokenId, key: &str) -> &[u8] {
        self.tokens
            .get(&id)
            .and_then(|token| token.metadata.get(key))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Change the registration fee (owner only)
    pub fn set_fee(&mut self, ctx: &ExecutionContext, fee: Amount) -> RegistryResult<()> {
        self.admin.ensure_owner(&ctx.caller)?;
        tracing::info!("TokenReg: fee changed from {} to {}", self.fee, fee);
        self.fee = fee;
        Ok(())
    }

    /// Authorize a payout of collected fees (owner only)
    pub fn drain(&self, ctx: &ExecutionContext) -> RegistryResult<()> {
        self.admin.ensure_owner(&ctx.caller)?;
        Ok(())
    }

    pub fn set_owner(&mut self, ctx: &ExecutionContext, new_owner: Address) -> RegistryResult<RegistryEvent> {
        let changed = self.admin.set_owner(&ctx.caller, new_owner)?;
        Ok(changed.into())
    }
}
