//! BasicCoinManager tests driven through the executor
//!
//! The factory composes coin construction and registration into one
//! transaction; these tests check both the happy path and that a failed
//! registration leaves no trace at all.

use lib_blockchain::contracts::{ManagerEvent, RegistryEvent};
use lib_blockchain::{
    Address, ContractExecutor, ExecutionError, FeePolicy, ManagerError, PlatformConfig, Rejection,
    ETHER,
};
use lib_tokens::DEFAULT_BASE;

fn account(id: u8) -> Address {
    Address::new([id; 32])
}

struct Platform {
    executor: ContractExecutor,
    registry: Address,
    manager: Address,
}

fn setup_with(config: PlatformConfig) -> Platform {
    let mut executor = ContractExecutor::new(config);
    for id in 0..10 {
        executor.fund(account(id), 10 * ETHER).unwrap();
    }
    let registry = executor.deploy_registry(account(0)).unwrap();
    let manager = executor.deploy_manager(account(0)).unwrap();
    Platform { executor, registry, manager }
}

fn setup() -> Platform {
    setup_with(PlatformConfig::default())
}

#[test]
fn test_manager_deploys_new_coin() {
    let Platform { mut executor, registry, manager } = setup();
    let creator = account(1);

    assert_eq!(executor.manager(&manager).unwrap().count(), 0);
    let cursor = executor.logs().len();

    let deployment = executor
        .deploy(creator, manager, ETHER, 10, "zzz", "coin1", registry)
        .unwrap();

    let factory = executor.manager(&manager).unwrap();
    assert_eq!(factory.count(), 1);
    assert_eq!(factory.count_by_owner(&creator), 1);
    assert_eq!(factory.count_by_owner(&account(9)), 0);
    assert!(factory.is_coin(&deployment.coin));

    // Registration log from the registry, then the creation log
    let logs = executor.logs_since(cursor);
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0].contract, registry);
    assert!(matches!(logs[0].registry_event(), Some(RegistryEvent::Registered { .. })));
    assert_eq!(logs[1].contract, manager);
    assert_eq!(
        logs[1].manager_event(),
        Some(&ManagerEvent::Created { creator, coin: deployment.coin })
    );

    // The coin belongs to the creator
    let coin = executor.coin(&deployment.coin).unwrap();
    assert_eq!(coin.owner(), creator);
    assert_eq!(coin.balance_of(&creator), 10);

    // And is registered under the ticker with the factory's base
    let reg = executor.registry(&registry).unwrap();
    let (_, token) = reg.from_address(&deployment.coin).unwrap();
    assert_eq!(token.tla, "zzz");
    assert_eq!(token.name, "coin1");
    assert_eq!(token.base, DEFAULT_BASE);

    // Lookup by index and by owner
    let by_index = factory.get(0).unwrap();
    assert_eq!(by_index.coin, deployment.coin);
    assert_eq!(by_index.creator, creator);
    assert_eq!(by_index.registry, registry);
    assert_eq!(factory.get_by_owner(&creator, 0).unwrap(), by_index);
    assert!(factory.get(1).is_err());

    // Fee accounting: the whole fee reached the registry
    assert_eq!(executor.balance(&creator), 9 * ETHER);
    assert_eq!(executor.balance(&registry), ETHER);
    assert_eq!(executor.balance(&manager), 0);
}

#[test]
fn test_failed_registration_rolls_back_everything() {
    let Platform { mut executor, registry, manager } = setup();

    executor
        .deploy(account(1), manager, ETHER, 10, "zzz", "coin1", registry)
        .unwrap();

    let height = executor.height();
    let logs = executor.logs().len();
    let nonce = executor.state().nonce(&manager);
    let coins_before = executor.state().clone();

    let result = executor.deploy(account(2), manager, ETHER, 10, "zzz", "coin2", registry);
    assert_eq!(
        result,
        Err(ExecutionError::Manager(ManagerError::RegistrationRejected(
            Rejection::TlaTaken("zzz".into())
        )))
    );

    assert_eq!(executor.height(), height);
    assert_eq!(executor.logs().len(), logs);
    assert_eq!(executor.state().nonce(&manager), nonce, "no coin address consumed");
    assert_eq!(executor.balance(&account(2)), 10 * ETHER, "attached value returned");
    assert_eq!(executor.manager(&manager).unwrap().count_by_owner(&account(2)), 0);
    assert_eq!(executor.state(), &coins_before);
}

#[test]
fn test_invalid_tla_rolls_back() {
    let Platform { mut executor, registry, manager } = setup();

    let result = executor.deploy(account(1), manager, ETHER, 10, "TOO-LONG", "coin", registry);
    assert!(matches!(
        result,
        Err(ExecutionError::Manager(ManagerError::RegistrationRejected(Rejection::InvalidTla(_))))
    ));
    assert_eq!(executor.manager(&manager).unwrap().count(), 0);
    assert_eq!(executor.balance(&account(1)), 10 * ETHER);
}

#[test]
fn test_exact_fee_required_by_default() {
    let Platform { mut executor, registry, manager } = setup();

    let result = executor.deploy(account(1), manager, 2 * ETHER, 10, "zzz", "coin", registry);
    assert_eq!(
        result,
        Err(ExecutionError::Manager(ManagerError::FeeMismatch {
            required: ETHER,
            attached: 2 * ETHER
        }))
    );

    let result = executor.deploy(account(1), manager, 0, 10, "zzz", "coin", registry);
    assert!(result.is_err());
    assert_eq!(executor.balance(&account(1)), 10 * ETHER);
}

#[test]
fn test_unfunded_deploy_aborts() {
    let Platform { mut executor, registry, manager } = setup();
    let broke = account(42);

    let result = executor.deploy(broke, manager, ETHER, 10, "zzz", "coin", registry);
    assert!(matches!(result, Err(ExecutionError::InsufficientFunds { .. })));
}

#[test]
fn test_unknown_registry_aborts() {
    let Platform { mut executor, manager, .. } = setup();
    let bogus = account(77);

    let result = executor.deploy(account(1), manager, ETHER, 10, "zzz", "coin", bogus);
    assert_eq!(result, Err(ExecutionError::UnknownContract(bogus)));
    assert_eq!(executor.balance(&account(1)), 10 * ETHER);
}

#[test]
fn test_zero_supply_aborts() {
    let Platform { mut executor, registry, manager } = setup();

    let result = executor.deploy(account(1), manager, ETHER, 0, "zzz", "coin", registry);
    assert!(matches!(result, Err(ExecutionError::Token(_))));
    assert_eq!(executor.registry(&registry).unwrap().token_count(), 0);
}

#[test]
fn test_surplus_stays_with_factory_under_at_least() {
    let mut config = PlatformConfig::default();
    config.manager.fee_policy = FeePolicy::AtLeast;
    let Platform { mut executor, registry, manager } = setup_with(config);

    executor
        .deploy(account(1), manager, 3 * ETHER, 10, "hdl", "coin1", registry)
        .unwrap();
    assert_eq!(executor.balance(&registry), ETHER);
    assert_eq!(executor.balance(&manager), 2 * ETHER);

    // Non-owner can not drain
    let result = executor.manager_drain(account(9), manager);
    assert!(matches!(result, Err(ExecutionError::Manager(ManagerError::Unauthorized(_)))));

    let before = executor.balance(&account(0));
    assert_eq!(executor.manager_drain(account(0), manager).unwrap(), 2 * ETHER);
    assert_eq!(executor.balance(&account(0)), before + 2 * ETHER);
    assert_eq!(executor.balance(&manager), 0);
}

#[test]
fn test_owner_drains_registry_after_deploys() {
    let Platform { mut executor, registry, manager } = setup();

    executor
        .deploy(account(1), manager, ETHER, 10, "hdl", "coin1", registry)
        .unwrap();
    executor
        .deploy(account(1), manager, ETHER, 20, "xyz", "coin2", registry)
        .unwrap();
    assert_eq!(executor.manager(&manager).unwrap().count_by_owner(&account(1)), 2);

    assert!(executor.registry_drain(account(9), registry).is_err());
    let before = executor.balance(&account(0));
    executor.registry_drain(account(0), registry).unwrap();
    assert!(executor.balance(&account(0)) >= before + 2 * ETHER - ETHER / 100);
}

#[test]
fn test_manager_owner_transfer() {
    let Platform { mut executor, manager, .. } = setup();

    assert!(executor.manager_set_owner(account(3), manager, account(3)).is_err());
    executor.manager_set_owner(account(0), manager, account(3)).unwrap();
    assert_eq!(executor.manager(&manager).unwrap().owner(), account(3));
    assert_eq!(
        executor.logs().last().and_then(|log| log.manager_event()),
        Some(&ManagerEvent::NewOwner { old: account(0), current: account(3) })
    );
}

#[test]
fn test_call_depth_limit_aborts_deploy() {
    let mut config = PlatformConfig::default();
    config.executor.max_call_depth = 0;
    let Platform { mut executor, registry, manager } = setup_with(config);

    let result = executor.deploy(account(1), manager, ETHER, 10, "zzz", "coin", registry);
    assert_eq!(result, Err(ExecutionError::CallDepthExceeded { depth: 1, max: 0 }));
    assert_eq!(executor.balance(&account(1)), 10 * ETHER);
}
