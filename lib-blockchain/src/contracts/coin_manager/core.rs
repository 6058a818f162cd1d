use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use lib_tokens::Administered;
use lib_types::{Address, Amount};

use super::types::*;
use crate::contracts::executor::ExecutionContext;
use crate::contracts::token_registry::Registration;

/// Host services the factory needs during `deploy`
///
/// Implementations run inside the caller's transaction, so anything they
/// create is discarded if `deploy` returns an error.
pub trait DeploymentHost {
    type Error: From<ManagerError>;

    /// Current fee of the registry at `registry`
    fn registry_fee(&self, registry: &Address) -> Result<Amount, Self::Error>;

    /// Construct a coin with `supply` credited to `owner`
    fn create_coin(
        &mut self,
        ctx: &ExecutionContext,
        supply: Amount,
        owner: Address,
        base: u64,
    ) -> Result<Address, Self::Error>;

    /// Call `register` on `registry`, forwarding `fee` from the factory
    #[allow(clippy::too_many_arguments)]
    fn register_coin(
        &mut self,
        ctx: &ExecutionContext,
        registry: Address,
        fee: Amount,
        coin: Address,
        tla: &str,
        base: u64,
        name: &str,
    ) -> Result<Registration, Self::Error>;
}

/// BasicCoinManager contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicCoinManager {
    admin: Administered,
    fee_policy: FeePolicy,
    /// Base hint registered for every coin
    coin_base: u64,
    /// Global deployment sequence
    records: Vec<Deployment>,
    /// creator -> indices into `records`
    by_owner: HashMap<Address, Vec<u64>>,
    /// Coins deployed here
    deployed: HashSet<Address>,
}

impl BasicCoinManager {
    pub fn new(owner: Address, fee_policy: FeePolicy, coin_base: u64) -> Self {
        Self {
            admin: Administered::new(owner),
            fee_policy,
            coin_base,
            records: Vec::new(),
            by_owner: HashMap::new(),
            deployed: HashSet::new(),
        }
    }

    pub fn owner(&self) -> Address {
        self.admin.owner()
    }

    pub fn fee_policy(&self) -> FeePolicy {
        self.fee_policy
    }

    pub fn coin_base(&self) -> u64 {
        self.coin_base
    }

    /// Deploy a coin owned by the caller and register it under `tla`
    ///
    /// The record is written only after the registry accepted the coin.
    ///
    /// # Errors
    /// - `FeeMismatch` / `InsufficientFee` if the attached value fails the fee policy
    /// - `RegistrationRejected` if the registry soft-fails the registration
    /// - any host error raised while constructing or registering the coin
    pub fn deploy<H: DeploymentHost>(
        &mut self,
        host: &mut H,
        ctx: &ExecutionContext,
        supply: Amount,
        tla: &str,
        name: &str,
        registry: Address,
    ) -> Result<(Deployment, ManagerEvent), H::Error> {
        let fee = host.registry_fee(&registry)?;
        self.fee_policy.check(fee, ctx.value)?;

        let creator = ctx.caller;
        let coin = host.create_coin(ctx, supply, creator, self.coin_base)?;

        match host.register_coin(ctx, registry, fee, coin, tla, self.coin_base, name)? {
            Registration::Registered(id) => {
                tracing::debug!("BasicCoinManager: coin {} registered as id {}", coin, id);
            }
            Registration::Rejected(rejection) => {
                tracing::warn!("BasicCoinManager: deployment of '{}' aborted: {}", tla, rejection);
                return Err(ManagerError::RegistrationRejected(rejection).into());
            }
        }

        let deployment = Deployment {
            index: self.records.len() as u64,
            coin,
            creator,
            registry,
        };
        self.by_owner.entry(creator).or_default().push(deployment.index);
        self.deployed.insert(coin);
        self.records.push(deployment.clone());

        tracing::info!(
            "BasicCoinManager: deployment {} created coin {} for {}",
            deployment.index,
            coin,
            creator
        );
        Ok((deployment, ManagerEvent::Created { creator, coin }))
    }

    /// Deployment at `index` in the global sequence
    pub fn get(&self, index: u64) -> ManagerResult<&Deployment> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.records.get(i))
            .ok_or(ManagerError::DeploymentNotFound(index))
    }

    /// The `index`-th deployment made by `owner`
    pub fn get_by_owner(&self, owner: &Address, index: u64) -> ManagerResult<&Deployment> {
        let not_found = ManagerError::OwnerDeploymentNotFound { owner: *owner, index };
        let global = self
            .by_owner
            .get(owner)
            .and_then(|indices| indices.get(usize::try_from(index).ok()?))
            .ok_or_else(|| not_found.clone())?;
        self.get(*global).map_err(|_| not_found)
    }

    pub fn count(&self) -> u64 {
        self.records.len() as u64
    }

    pub fn count_by_owner(&self, owner: &Address) -> u64 {
        self.by_owner.get(owner).map_or(0, |indices| indices.len() as u64)
    }

    /// Whether `coin` was deployed by this factory
    pub fn is_coin(&self, coin: &Address) -> bool {
        self.deployed.contains(coin)
    }

    pub fn deployments(&self) -> &[Deployment] {
        &self.records
    }

    /// Authorize a payout of the factory's balance (owner only)
    pub fn drain(&self, ctx: &ExecutionContext) -> ManagerResult<()> {
        self.admin.ensure_owner(&ctx.caller)?;
        Ok(())
    }

    pub fn set_owner(&mut self, ctx: &ExecutionContext, new_owner: Address) -> ManagerResult<ManagerEvent> {
        let changed = self.admin.set_owner(&ctx.caller, new_owner)?;
        Ok(changed.into())
    }
}
