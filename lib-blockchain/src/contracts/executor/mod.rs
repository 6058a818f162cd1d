//! Contract Executor
//!
//! Hosts every BasicCoin, TokenReg and BasicCoinManager instance together
//! with native value accounts. Each state-changing call is one all-or-nothing
//! transaction: it runs against a staged copy of the world state, and only a
//! successful call replaces live state, appends its logs and advances the
//! height. Queries read live state directly.

pub mod context;
pub mod errors;
pub mod state;
pub mod transaction;

pub use context::{CallOrigin, ExecutionContext, DEFAULT_MAX_CALL_DEPTH};
pub use errors::{ExecutionError, ExecutionResult};
pub use state::{derive_contract_address, ContractKind, WorldState};
pub use transaction::Transaction;

use serde::{Deserialize, Serialize};

use lib_tokens::BasicCoin;
use lib_types::{Address, Amount, BlockHeight};

use crate::config::PlatformConfig;
use crate::contracts::coin_manager::{BasicCoinManager, Deployment};
use crate::contracts::token_registry::{MetaUpdate, Registration, RegistryEvent, TokenId, TokenRegistry};
use crate::events::ContractLog;

/// Serialized form of the executor's live state
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StateSnapshot {
    state: WorldState,
    logs: Vec<ContractLog>,
}

/// In-process host for the token platform
#[derive(Debug, Clone)]
pub struct ContractExecutor {
    config: PlatformConfig,
    state: WorldState,
    /// Committed log entries in commit order
    logs: Vec<ContractLog>,
}

impl Default for ContractExecutor {
    fn default() -> Self {
        Self::new(PlatformConfig::default())
    }
}

impl ContractExecutor {
    pub fn new(config: PlatformConfig) -> Self {
        Self {
            config,
            state: WorldState::default(),
            logs: Vec::new(),
        }
    }

    pub fn config(&self) -> &PlatformConfig {
        &self.config
    }

    pub fn state(&self) -> &WorldState {
        &self.state
    }

    /// Height of the last committed transaction
    pub fn height(&self) -> BlockHeight {
        self.state.height()
    }

    /// Run `body` as one atomic transaction invoked by `caller` on `contract`
    fn transact<T>(
        &mut self,
        operation: &str,
        caller: Address,
        contract: Address,
        value: Amount,
        body: impl FnOnce(&mut Transaction, &ExecutionContext) -> ExecutionResult<T>,
    ) -> ExecutionResult<T> {
        let height = self.state.height() + 1;
        let ctx = ExecutionContext::new(caller, contract, value, height)
            .with_max_call_depth(self.config.executor.max_call_depth);

        tracing::debug!("{} by {} on {} (value {})", operation, caller, contract, value);

        let mut tx = Transaction::new(self.state.clone(), height);
        match body(&mut tx, &ctx) {
            Ok(output) => {
                let (mut state, logs) = tx.into_parts();
                state.height = height;
                tracing::debug!("{} committed at height {} with {} log(s)", operation, height, logs.len());
                self.state = state;
                self.logs.extend(logs);
                Ok(output)
            }
            Err(e) => {
                tracing::warn!("{} by {} rolled back: {}", operation, caller, e);
                Err(e)
            }
        }
    }

    // ========================================================================
    // NATIVE VALUE
    // ========================================================================

    /// Genesis credit for an external account
    pub fn fund(&mut self, account: Address, amount: Amount) -> ExecutionResult<()> {
        self.state.credit(&account, amount)?;
        tracing::debug!("Funded {} with {}", account, amount);
        Ok(())
    }

    pub fn balance(&self, account: &Address) -> Amount {
        self.state.balance(account)
    }

    // ========================================================================
    // DEPLOYMENT
    // ========================================================================

    /// Deploy a standalone coin with the whole supply credited to the caller
    pub fn deploy_coin(&mut self, caller: Address, supply: Amount) -> ExecutionResult<Address> {
        let base = self.config.manager.coin_base;
        self.transact("deploy_coin", caller, Address::zero(), 0, |tx, ctx| {
            tx.construct_coin(&ctx.caller, supply, ctx.caller, base)
        })
    }

    /// Deploy a registry owned by the caller, charging the configured fee
    pub fn deploy_registry(&mut self, caller: Address) -> ExecutionResult<Address> {
        let fee = self.config.registry.fee();
        self.transact("deploy_registry", caller, Address::zero(), 0, |tx, ctx| {
            let address = tx.state.next_contract_address(ContractKind::Registry, &ctx.caller);
            tx.state.registries.insert(address, TokenRegistry::new(ctx.caller, fee));
            tracing::info!("Deployed TokenReg {} (fee {}) for {}", address, fee, ctx.caller);
            Ok(address)
        })
    }

    /// Deploy a factory owned by the caller
    pub fn deploy_manager(&mut self, caller: Address) -> ExecutionResult<Address> {
        let policy = self.config.manager.fee_policy;
        let base = self.config.manager.coin_base;
        self.transact("deploy_manager", caller, Address::zero(), 0, |tx, ctx| {
            let address = tx.state.next_contract_address(ContractKind::Manager, &ctx.caller);
            tx.state
                .managers
                .insert(address, BasicCoinManager::new(ctx.caller, policy, base));
            tracing::info!("Deployed BasicCoinManager {} ({} fee) for {}", address, policy, ctx.caller);
            Ok(address)
        })
    }

    // ========================================================================
    // BASIC COIN
    // ========================================================================

    pub fn coin(&self, coin: &Address) -> ExecutionResult<&BasicCoin> {
        self.state.coin(coin)
    }

    pub fn balance_of(&self, coin: &Address, holder: &Address) -> ExecutionResult<Amount> {
        Ok(self.state.coin(coin)?.balance_of(holder))
    }

    pub fn allowance(&self, coin: &Address, owner: &Address, spender: &Address) -> ExecutionResult<Amount> {
        Ok(self.state.coin(coin)?.allowance(owner, spender))
    }

    pub fn transfer(&mut self, caller: Address, coin: Address, to: Address, amount: Amount) -> ExecutionResult<()> {
        self.transact("transfer", caller, coin, 0, |tx, ctx| {
            let event = tx.state.coin_mut(&coin)?.transfer(&ctx.caller, &to, amount)?;
            tx.emit(coin, event);
            Ok(())
        })
    }

    pub fn approve(&mut self, caller: Address, coin: Address, spender: Address, amount: Amount) -> ExecutionResult<()> {
        self.transact("approve", caller, coin, 0, |tx, ctx| {
            let event = tx.state.coin_mut(&coin)?.approve(&ctx.caller, &spender, amount);
            tx.emit(coin, event);
            Ok(())
        })
    }

    pub fn transfer_from(
        &mut self,
        caller: Address,
        coin: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> ExecutionResult<()> {
        self.transact("transfer_from", caller, coin, 0, |tx, ctx| {
            let event = tx
                .state
                .coin_mut(&coin)?
                .transfer_from(&ctx.caller, &from, &to, amount)?;
            tx.emit(coin, event);
            Ok(())
        })
    }

    pub fn coin_set_owner(&mut self, caller: Address, coin: Address, new_owner: Address) -> ExecutionResult<()> {
        self.transact("coin_set_owner", caller, coin, 0, |tx, ctx| {
            let event = tx.state.coin_mut(&coin)?.set_owner(&ctx.caller, new_owner)?;
            tx.emit(coin, event);
            Ok(())
        })
    }

    // ========================================================================
    // TOKEN REGISTRY
    // ========================================================================

    pub fn registry(&self, registry: &Address) -> ExecutionResult<&TokenRegistry> {
        self.state.registry(registry)
    }

    /// Register `addr` under `tla`, attaching `value` as the fee
    ///
    /// A rejected registration still commits: nothing changes and the
    /// attached value stays with the caller.
    #[allow(clippy::too_many_arguments)]
    pub fn register(
        &mut self,
        caller: Address,
        registry: Address,
        value: Amount,
        addr: Address,
        tla: &str,
        base: u64,
        name: &str,
    ) -> ExecutionResult<Registration> {
        self.transact("register", caller, registry, value, |tx, ctx| {
            tx.register(ctx, addr, tla, base, name)
        })
    }

    pub fn unregister(&mut self, caller: Address, registry: Address, id: TokenId) -> ExecutionResult<()> {
        self.transact("unregister", caller, registry, 0, |tx, ctx| {
            let event = tx.state.registry_mut(&registry)?.unregister(ctx, id)?;
            tx.emit(registry, event);
            Ok(())
        })
    }

    pub fn set_meta(
        &mut self,
        caller: Address,
        registry: Address,
        id: TokenId,
        key: &str,
        value: &[u8],
    ) -> ExecutionResult<MetaUpdate> {
        self.transact("set_meta", caller, registry, 0, |tx, ctx| {
            let update = tx.state.registry_mut(&registry)?.set_meta(ctx, id, key, value);
            if update == MetaUpdate::Applied {
                tx.emit(
                    registry,
                    RegistryEvent::MetaChanged {
                        id,
                        key: key.to_string(),
                        value: value.to_vec(),
                    },
                );
            }
            Ok(update)
        })
    }

    pub fn set_fee(&mut self, caller: Address, registry: Address, fee: Amount) -> ExecutionResult<()> {
        self.transact("set_fee", caller, registry, 0, |tx, ctx| {
            tx.state.registry_mut(&registry)?.set_fee(ctx, fee)?;
            Ok(())
        })
    }

    /// Pay the registry's collected fees to its owner; returns the amount paid
    pub fn registry_drain(&mut self, caller: Address, registry: Address) -> ExecutionResult<Amount> {
        self.transact("registry_drain", caller, registry, 0, |tx, ctx| {
            tx.state.registry(&registry)?.drain(ctx)?;
            Self::pay_out(tx, &registry, &ctx.caller)
        })
    }

    pub fn registry_set_owner(&mut self, caller: Address, registry: Address, new_owner: Address) -> ExecutionResult<()> {
        self.transact("registry_set_owner", caller, registry, 0, |tx, ctx| {
            let event = tx.state.registry_mut(&registry)?.set_owner(ctx, new_owner)?;
            tx.emit(registry, event);
            Ok(())
        })
    }

    // ========================================================================
    // COIN MANAGER
    // ========================================================================

    pub fn manager(&self, manager: &Address) -> ExecutionResult<&BasicCoinManager> {
        self.state.manager(manager)
    }

    /// Deploy a coin through `manager` and register it on `registry`
    ///
    /// `value` moves from the caller to the factory on entry; the factory
    /// forwards the registry fee. Any failure, including a rejected
    /// registration, rolls the whole call back.
    #[allow(clippy::too_many_arguments)]
    pub fn deploy(
        &mut self,
        caller: Address,
        manager: Address,
        value: Amount,
        supply: Amount,
        tla: &str,
        name: &str,
        registry: Address,
    ) -> ExecutionResult<Deployment> {
        self.transact("deploy", caller, manager, value, |tx, ctx| {
            tx.state.move_value(&ctx.caller, &ctx.contract, ctx.value)?;

            let mut factory = tx
                .state
                .managers
                .remove(&manager)
                .ok_or(ExecutionError::UnknownContract(manager))?;
            let result = factory.deploy(tx, ctx, supply, tla, name, registry);
            tx.state.managers.insert(manager, factory);

            let (deployment, event) = result?;
            tx.emit(manager, event);
            Ok(deployment)
        })
    }

    /// Pay the factory's balance to its owner; returns the amount paid
    pub fn manager_drain(&mut self, caller: Address, manager: Address) -> ExecutionResult<Amount> {
        self.transact("manager_drain", caller, manager, 0, |tx, ctx| {
            tx.state.manager(&manager)?.drain(ctx)?;
            Self::pay_out(tx, &manager, &ctx.caller)
        })
    }

    pub fn manager_set_owner(&mut self, caller: Address, manager: Address, new_owner: Address) -> ExecutionResult<()> {
        self.transact("manager_set_owner", caller, manager, 0, |tx, ctx| {
            let event = tx.state.manager_mut(&manager)?.set_owner(ctx, new_owner)?;
            tx.emit(manager, event);
            Ok(())
        })
    }

    /// Zero `contract`'s balance, then credit it to `recipient`
    fn pay_out(tx: &mut Transaction, contract: &Address, recipient: &Address) -> ExecutionResult<Amount> {
        let amount = tx.state.take_all(contract);
        tx.state.credit(recipient, amount)?;
        tracing::info!("Drained {} from {} to {}", amount, contract, recipient);
        Ok(amount)
    }

    // ========================================================================
    // LOGS
    // ========================================================================

    /// Every committed log entry
    pub fn logs(&self) -> &[ContractLog] {
        &self.logs
    }

    pub fn logs_for(&self, contract: &Address) -> Vec<&ContractLog> {
        self.logs.iter().filter(|log| log.contract == *contract).collect()
    }

    /// Entries committed after the first `cursor` entries
    pub fn logs_since(&self, cursor: usize) -> &[ContractLog] {
        self.logs.get(cursor..).unwrap_or(&[])
    }

    // ========================================================================
    // SNAPSHOTS
    // ========================================================================

    /// Serialize live state and logs as JSON
    pub fn export_state(&self) -> ExecutionResult<String> {
        let snapshot = StateSnapshot {
            state: self.state.clone(),
            logs: self.logs.clone(),
        };
        serde_json::to_string(&snapshot).map_err(|e| ExecutionError::Snapshot(e.to_string()))
    }

    /// Rebuild an executor from an exported snapshot
    pub fn import_state(config: PlatformConfig, json: &str) -> ExecutionResult<Self> {
        let snapshot: StateSnapshot =
            serde_json::from_str(json).map_err(|e| ExecutionError::Snapshot(e.to_string()))?;
        tracing::info!(
            "Imported state at height {} with {} log(s)",
            snapshot.state.height(),
            snapshot.logs.len()
        );
        Ok(Self {
            config,
            state: snapshot.state,
            logs: snapshot.logs,
        })
    }
}
