//! Token Platform Simulator
//!
//! Runs a short scripted session against an in-process executor and prints
//! the committed log as JSON.
//!
//! Usage: `platform_sim [--config <path.toml>]`

use std::env;
use std::path::PathBuf;

use anyhow::Context;
use lib_blockchain::{Address, ContractExecutor, PlatformConfig, Registration, ETHER};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    let filter = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match parse_config_path() {
        Some(path) => PlatformConfig::load(&path)?,
        None => PlatformConfig::default(),
    };

    let mut executor = ContractExecutor::new(config);
    run_session(&mut executor)?;

    let logs = serde_json::to_string_pretty(executor.logs()).context("Failed to encode logs")?;
    println!("{}", logs);
    Ok(())
}

fn parse_config_path() -> Option<PathBuf> {
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" if i + 1 < args.len() => return Some(PathBuf::from(&args[i + 1])),
            other => {
                tracing::warn!("Ignoring unknown argument '{}'", other);
                i += 1;
            }
        }
    }
    None
}

fn run_session(executor: &mut ContractExecutor) -> anyhow::Result<()> {
    let admin = Address::new([1u8; 32]);
    let alice = Address::new([2u8; 32]);
    let bob = Address::new([3u8; 32]);

    for account in [admin, alice, bob] {
        executor.fund(account, 10 * ETHER)?;
    }

    let registry = executor.deploy_registry(admin)?;
    let manager = executor.deploy_manager(admin)?;
    let fee = executor.registry(&registry)?.fee();

    let deployment = executor.deploy(alice, manager, fee, 1_000, "abc", "Alice Coin", registry)?;
    tracing::info!("Alice deployed {} at index {}", deployment.coin, deployment.index);

    executor.transfer(alice, deployment.coin, bob, 250)?;
    executor.approve(bob, deployment.coin, alice, 100)?;
    executor.transfer_from(alice, deployment.coin, bob, admin, 40)?;

    // Same ticker again: the whole deployment rolls back
    if let Err(e) = executor.deploy(bob, manager, fee, 500, "abc", "Copycat", registry) {
        tracing::info!("Second 'abc' deployment refused: {}", e);
    }

    // Direct registration without the fee is a soft rejection
    if let Registration::Rejected(rejection) = executor.register(bob, registry, 0, bob, "bob", 0, "Bob")? {
        tracing::info!("Unpaid registration rejected: {}", rejection);
    }

    let drained = executor.registry_drain(admin, registry)?;
    tracing::info!(
        "Registry drained {} to admin; {} token(s) registered, admin balance {}",
        drained,
        executor.registry(&registry)?.token_count(),
        executor.balance(&admin)
    );
    Ok(())
}
