//! Staged Transactions
//!
//! A [`Transaction`] owns a private clone of the world state and a private
//! log buffer. The executor swaps both in when the transaction body returns
//! `Ok` and drops them otherwise, so a failure anywhere in a nested call
//! chain leaves no trace.

use lib_tokens::BasicCoin;
use lib_types::{Address, Amount, BlockHeight};

use super::context::ExecutionContext;
use super::errors::{ExecutionError, ExecutionResult};
use super::state::{ContractKind, WorldState};
use crate::contracts::coin_manager::DeploymentHost;
use crate::contracts::token_registry::Registration;
use crate::events::{ContractEvent, ContractLog};

pub struct Transaction {
    pub(crate) state: WorldState,
    logs: Vec<ContractLog>,
    height: BlockHeight,
}

impl Transaction {
    pub(crate) fn new(state: WorldState, height: BlockHeight) -> Self {
        Self {
            state,
            logs: Vec::new(),
            height,
        }
    }

    pub(crate) fn into_parts(self) -> (WorldState, Vec<ContractLog>) {
        (self.state, self.logs)
    }

    /// Stage a log entry for `contract`
    pub fn emit(&mut self, contract: Address, event: impl Into<ContractEvent>) {
        self.logs.push(ContractLog {
            contract,
            block_height: self.height,
            event: event.into(),
        });
    }

    /// Construct a coin on behalf of `deployer`
    pub(crate) fn construct_coin(
        &mut self,
        deployer: &Address,
        supply: Amount,
        owner: Address,
        base: u64,
    ) -> ExecutionResult<Address> {
        let coin = BasicCoin::with_base(supply, owner, base)?;
        let address = self.state.next_contract_address(ContractKind::Coin, deployer);
        self.state.coins.insert(address, coin);

        tracing::info!("Deployed BasicCoin {} (supply {}) for {}", address, supply, owner);
        Ok(address)
    }

    /// Run `register` on the registry in `ctx.contract`
    ///
    /// The attached value moves from the caller to the registry only when
    /// the registration is accepted.
    pub(crate) fn register(
        &mut self,
        ctx: &ExecutionContext,
        addr: Address,
        tla: &str,
        base: u64,
        name: &str,
    ) -> ExecutionResult<Registration> {
        let have = self.state.balance(&ctx.caller);
        if have < ctx.value {
            return Err(ExecutionError::InsufficientFunds {
                account: ctx.caller,
                have,
                need: ctx.value,
            });
        }

        let registry = self.state.registry_mut(&ctx.contract)?;
        let outcome = registry.register(ctx, addr, tla, base, name);

        if let Registration::Registered(id) = outcome {
            let event = registry.token(id)?.registered_event();
            self.state.move_value(&ctx.caller, &ctx.contract, ctx.value)?;
            self.emit(ctx.contract, event);
        }
        Ok(outcome)
    }
}

impl DeploymentHost for Transaction {
    type Error = ExecutionError;

    fn registry_fee(&self, registry: &Address) -> ExecutionResult<Amount> {
        Ok(self.state.registry(registry)?.fee())
    }

    fn create_coin(
        &mut self,
        ctx: &ExecutionContext,
        supply: Amount,
        owner: Address,
        base: u64,
    ) -> ExecutionResult<Address> {
        // Construction counts as a nested call for depth accounting
        ctx.nested_call(ctx.contract, 0)?;
        self.construct_coin(&ctx.contract, supply, owner, base)
    }

    fn register_coin(
        &mut self,
        ctx: &ExecutionContext,
        registry: Address,
        fee: Amount,
        coin: Address,
        tla: &str,
        base: u64,
        name: &str,
    ) -> ExecutionResult<Registration> {
        let nested = ctx.nested_call(registry, fee)?;
        self.register(&nested, coin, tla, base, name)
    }
}
