//! World State
//!
//! Everything a transaction can touch: native value accounts, live contract
//! instances, and per-deployer creation nonces. Transactions mutate a clone
//! and swap it in on commit.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use lib_tokens::BasicCoin;
use lib_types::{Address, Amount, BlockHeight};

use super::errors::{ExecutionError, ExecutionResult};
use crate::contracts::coin_manager::BasicCoinManager;
use crate::contracts::token_registry::TokenRegistry;

/// Contract families hosted by the executor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractKind {
    Coin,
    Registry,
    Manager,
}

impl ContractKind {
    fn tag(&self) -> &'static [u8] {
        match self {
            ContractKind::Coin => b"basic_coin",
            ContractKind::Registry => b"token_reg",
            ContractKind::Manager => b"basic_coin_manager",
        }
    }
}

impl std::fmt::Display for ContractKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContractKind::Coin => write!(f, "BasicCoin"),
            ContractKind::Registry => write!(f, "TokenReg"),
            ContractKind::Manager => write!(f, "BasicCoinManager"),
        }
    }
}

/// Derive the address of the `nonce`-th contract created by `deployer`
pub fn derive_contract_address(kind: ContractKind, deployer: &Address, nonce: u64) -> Address {
    let mut hasher = blake3::Hasher::new();
    hasher.update(b"contract_addr_v1");
    hasher.update(kind.tag());
    hasher.update(deployer.as_bytes());
    hasher.update(&nonce.to_le_bytes());
    Address::new(hasher.finalize().into())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldState {
    /// Native value per address (absent = 0)
    pub(crate) accounts: HashMap<Address, Amount>,
    pub(crate) coins: HashMap<Address, BasicCoin>,
    pub(crate) registries: HashMap<Address, TokenRegistry>,
    pub(crate) managers: HashMap<Address, BasicCoinManager>,
    /// Contracts created so far per deployer
    pub(crate) nonces: HashMap<Address, u64>,
    /// Height of the last committed transaction
    pub(crate) height: BlockHeight,
}

impl WorldState {
    pub fn height(&self) -> BlockHeight {
        self.height
    }

    pub fn balance(&self, account: &Address) -> Amount {
        self.accounts.get(account).copied().unwrap_or(0)
    }

    pub fn credit(&mut self, account: &Address, amount: Amount) -> ExecutionResult<()> {
        let balance = self
            .balance(account)
            .checked_add(amount)
            .ok_or(ExecutionError::Overflow)?;
        self.accounts.insert(*account, balance);
        Ok(())
    }

    pub fn debit(&mut self, account: &Address, amount: Amount) -> ExecutionResult<()> {
        let have = self.balance(account);
        if have < amount {
            return Err(ExecutionError::InsufficientFunds {
                account: *account,
                have,
                need: amount,
            });
        }
        self.accounts.insert(*account, have - amount);
        Ok(())
    }

    pub fn move_value(&mut self, from: &Address, to: &Address, amount: Amount) -> ExecutionResult<()> {
        if amount == 0 {
            return Ok(());
        }
        self.debit(from, amount)?;
        self.credit(to, amount)
    }

    /// Zero `account` and return what it held
    pub fn take_all(&mut self, account: &Address) -> Amount {
        self.accounts.remove(account).unwrap_or(0)
    }

    /// Allocate the next contract address for `deployer`
    pub fn next_contract_address(&mut self, kind: ContractKind, deployer: &Address) -> Address {
        let nonce = self.nonces.entry(*deployer).or_insert(0);
        let address = derive_contract_address(kind, deployer, *nonce);
        *nonce += 1;
        address
    }

    pub fn nonce(&self, deployer: &Address) -> u64 {
        self.nonces.get(deployer).copied().unwrap_or(0)
    }

    pub fn contract_kind(&self, address: &Address) -> Option<ContractKind> {
        if self.coins.contains_key(address) {
            Some(ContractKind::Coin)
        } else if self.registries.contains_key(address) {
            Some(ContractKind::Registry)
        } else if self.managers.contains_key(address) {
            Some(ContractKind::Manager)
        } else {
            None
        }
    }

    pub fn coin(&self, address: &Address) -> ExecutionResult<&BasicCoin> {
        self.coins.get(address).ok_or(ExecutionError::UnknownContract(*address))
    }

    pub fn coin_mut(&mut self, address: &Address) -> ExecutionResult<&mut BasicCoin> {
        self.coins.get_mut(address).ok_or(ExecutionError::UnknownContract(*address))
    }

    pub fn registry(&self, address: &Address) -> ExecutionResult<&TokenRegistry> {
        self.registries.get(address).ok_or(ExecutionError::UnknownContract(*address))
    }

    pub fn registry_mut(&mut self, address: &Address) -> ExecutionResult<&mut TokenRegistry> {
        self.registries.get_mut(address).ok_or(ExecutionError::UnknownContract(*address))
    }

    pub fn manager(&self, address: &Address) -> ExecutionResult<&BasicCoinManager> {
        self.managers.get(address).ok_or(ExecutionError::UnknownContract(*address))
    }

    pub fn manager_mut(&mut self, address: &Address) -> ExecutionResult<&mut BasicCoinManager> {
        self.managers.get_mut(address).ok_or(ExecutionError::UnknownContract(*address))
    }

    /// Sum of every native balance
    pub fn total_value(&self) -> Amount {
        self.accounts.values().sum()
    }
}
