//! BasicCoin
//!
//! Fixed-supply fungible ledger. The whole supply is credited to the initial
//! owner at construction and never changes afterwards, so the sum of all
//! balances always equals `total_supply`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use lib_types::{Address, Amount};

use crate::authority::Administered;
use crate::errors::{TokenError, TokenResult};
use crate::events::CoinEvent;

/// Denomination hint registered alongside factory-deployed coins
pub const DEFAULT_BASE: u64 = 1_000_000;

/// Fixed-supply fungible ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicCoin {
    /// Single admin
    admin: Administered,
    /// Fixed at construction
    total_supply: Amount,
    /// Denomination hint
    base: u64,
    /// Per-holder balances (absent = 0)
    balances: HashMap<Address, Amount>,
    /// owner -> spender -> remaining allowance
    allowances: HashMap<Address, HashMap<Address, Amount>>,
}

impl BasicCoin {
    /// Create a ledger with `total_supply` credited to `owner`
    ///
    /// # Errors
    /// - `TokenError::ZeroSupply` if `total_supply` is zero
    pub fn new(total_supply: Amount, owner: Address) -> TokenResult<Self> {
        Self::with_base(total_supply, owner, DEFAULT_BASE)
    }

    /// Create a ledger with an explicit denomination hint
    pub fn with_base(total_supply: Amount, owner: Address, base: u64) -> TokenResult<Self> {
        if total_supply == 0 {
            return Err(TokenError::ZeroSupply);
        }

        let mut balances = HashMap::new();
        balances.insert(owner, total_supply);

        Ok(Self {
            admin: Administered::new(owner),
            total_supply,
            base,
            balances,
            allowances: HashMap::new(),
        })
    }

    pub fn owner(&self) -> Address {
        self.admin.owner()
    }

    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    pub fn base(&self) -> u64 {
        self.base
    }

    /// Get balance of an account
    pub fn balance_of(&self, account: &Address) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Get allowance granted by `owner` to `spender`
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(owner)
            .and_then(|spenders| spenders.get(spender))
            .copied()
            .unwrap_or(0)
    }

    /// Sum of every balance; equals `total_supply` in every reachable state
    pub fn circulating(&self) -> Amount {
        self.balances.values().sum()
    }

    /// Transfer `amount` from the caller to `to`
    ///
    /// # Errors
    /// - `TokenError::InsufficientBalance` if the caller holds less than `amount`
    pub fn transfer(&mut self, caller: &Address, to: &Address, amount: Amount) -> TokenResult<CoinEvent> {
        self.move_balance(caller, to, amount)?;

        tracing::debug!("BasicCoin: transfer {} from {} to {}", amount, caller, to);

        Ok(CoinEvent::Transfer {
            from: *caller,
            to: *to,
            value: amount,
        })
    }

    /// Set the caller's allowance for `spender` (overwrites, never adds)
    pub fn approve(&mut self, caller: &Address, spender: &Address, amount: Amount) -> CoinEvent {
        self.allowances
            .entry(*caller)
            .or_default()
            .insert(*spender, amount);

        CoinEvent::Approval {
            owner: *caller,
            spender: *spender,
            value: amount,
        }
    }

    /// Spend the caller's allowance from `from`, crediting `to`
    ///
    /// Both the allowance and the balance are checked before anything is
    /// written.
    ///
    /// # Errors
    /// - `TokenError::InsufficientAllowance` if `allowance(from, caller) < amount`
    /// - `TokenError::InsufficientBalance` if `from` holds less than `amount`
    pub fn transfer_from(
        &mut self,
        caller: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> TokenResult<CoinEvent> {
        let allowance = self.allowance(from, caller);
        if allowance < amount {
            return Err(TokenError::InsufficientAllowance {
                spender: *caller,
                have: allowance,
                need: amount,
            });
        }

        self.move_balance(from, to, amount)?;

        self.allowances
            .entry(*from)
            .or_default()
            .insert(*caller, allowance - amount);

        tracing::debug!(
            "BasicCoin: {} spent {} of allowance from {} to {}",
            caller,
            amount,
            from,
            to
        );

        Ok(CoinEvent::Transfer {
            from: *from,
            to: *to,
            value: amount,
        })
    }

    /// Hand the admin capability to `new_owner`
    ///
    /// Balances are untouched; only the admin address changes.
    pub fn set_owner(&mut self, caller: &Address, new_owner: Address) -> TokenResult<CoinEvent> {
        let changed = self.admin.set_owner(caller, new_owner)?;
        Ok(changed.into())
    }

    fn move_balance(&mut self, from: &Address, to: &Address, amount: Amount) -> TokenResult<()> {
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            return Err(TokenError::InsufficientBalance {
                have: from_balance,
                need: amount,
            });
        }

        if from == to {
            return Ok(());
        }

        let to_balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;

        self.balances.insert(*from, from_balance - amount);
        self.balances.insert(*to, to_balance);
        Ok(())
    }
}
