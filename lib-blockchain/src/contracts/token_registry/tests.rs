use super::*;
use crate::contracts::executor::ExecutionContext;
use lib_tokens::Unauthorized;
use lib_types::{Address, Amount, ETHER};

fn account(id: u8) -> Address {
    Address::new([id; 32])
}

fn registry_address() -> Address {
    Address::new([0xee; 32])
}

fn ctx(caller: Address, value: Amount) -> ExecutionContext {
    ExecutionContext::new(caller, registry_address(), value, 1)
}

fn paid(caller: Address) -> ExecutionContext {
    ctx(caller, ETHER)
}

fn create_test_registry() -> TokenRegistry {
    TokenRegistry::new(account(0), DEFAULT_FEE)
}

#[test]
fn test_initial_state() {
    let reg = create_test_registry();
    assert_eq!(reg.token_count(), 0);
    assert_eq!(reg.fee(), ETHER);
    assert_eq!(reg.owner(), account(0));
}

#[test]
fn test_register_without_fee_rejected() {
    let mut reg = create_test_registry();

    let outcome = reg.register(&ctx(account(0), 0), account(0), "abc", 10, "name");
    assert_eq!(
        outcome,
        Registration::Rejected(Rejection::InsufficientFee { required: ETHER, paid: 0 })
    );

    let outcome = reg.register(&ctx(account(0), ETHER - 1), account(0), "abc", 10, "name");
    assert!(!outcome.is_registered());
    assert_eq!(reg.token_count(), 0);
}

#[test]
fn test_register_lookup_unregister() {
    let mut reg = create_test_registry();

    let id = reg
        .register(&paid(account(0)), account(0), "def", 10, "name")
        .id()
        .unwrap();
    assert_eq!(id, 0);
    assert_eq!(reg.token_count(), 1);

    let token = reg.token(id).unwrap();
    assert_eq!(token.addr, account(0));
    assert_eq!(token.tla, "def");
    assert_eq!(token.base, 10);
    assert_eq!(token.name, "name");
    assert_eq!(
        token.registered_event(),
        RegistryEvent::Registered { tla: "def".into(), id, addr: account(0), name: "name".into() }
    );

    assert_eq!(reg.from_address(&account(0)).map(|(found, _)| found), Some(id));
    assert_eq!(reg.from_tla("def").map(|(found, _)| found), Some(id));

    assert_eq!(reg.set_meta(&paid(account(0)), id, "k", b"v"), MetaUpdate::Applied);
    assert_eq!(reg.meta(id, "k"), b"v");

    // Only the owner can unregister
    let result = reg.unregister(&ctx(account(7), 0), id);
    assert_eq!(
        result,
        Err(RegistryError::Unauthorized(Unauthorized { caller: account(7) }))
    );
    assert_eq!(reg.token_count(), 1);

    let event = reg.unregister(&ctx(account(0), 0), id).unwrap();
    assert_eq!(event, RegistryEvent::Unregistered { tla: "def".into(), id });
    assert_eq!(reg.token_count(), 0);

    assert_eq!(reg.token(id), Err(RegistryError::TokenNotFound(id)));
    assert!(reg.from_address(&account(0)).is_none());
    assert!(reg.from_tla("def").is_none());
    assert!(reg.meta(id, "k").is_empty());
}

#[test]
fn test_unregister_unknown_id() {
    let mut reg = create_test_registry();
    assert_eq!(
        reg.unregister(&ctx(account(0), 0), 42),
        Err(RegistryError::TokenNotFound(42))
    );
}

#[test]
fn test_one_record_per_address() {
    let mut reg = create_test_registry();

    assert!(reg.register(&paid(account(1)), account(1), "ghi", 10, "name").is_registered());

    let outcome = reg.register(&paid(account(1)), account(1), "jkl", 10, "name");
    assert_eq!(outcome, Registration::Rejected(Rejection::AddressTaken(account(1))));
    assert_eq!(reg.token_count(), 1);
    assert!(reg.from_tla("jkl").is_none());
}

#[test]
fn test_one_record_per_tla() {
    let mut reg = create_test_registry();

    assert!(reg.register(&paid(account(2)), account(2), "mno", 10, "name").is_registered());
    assert!(reg.register(&paid(account(3)), account(3), "pqr", 10, "name").is_registered());

    let outcome = reg.register(&paid(account(4)), account(4), "mno", 10, "name");
    assert_eq!(outcome, Registration::Rejected(Rejection::TlaTaken("mno".into())));
    assert_eq!(reg.token_count(), 2);
}

#[test]
fn test_invalid_tla_rejected() {
    let mut reg = create_test_registry();

    let outcome = reg.register(&paid(account(5)), account(5), "sdfsdfsdf", 10, "name");
    assert_eq!(outcome, Registration::Rejected(Rejection::InvalidTla("sdfsdfsdf".into())));
    assert_eq!(reg.token_count(), 0);
}

#[test]
fn test_fee_checked_before_tla() {
    let mut reg = create_test_registry();
    let outcome = reg.register(&ctx(account(5), 0), account(5), "TOOLONG", 10, "name");
    assert!(matches!(outcome, Registration::Rejected(Rejection::InsufficientFee { .. })));
}

#[test]
fn test_set_meta_requires_bound_address() {
    let mut reg = create_test_registry();
    let id = reg
        .register(&paid(account(0)), account(6), "stu", 10, "name")
        .id()
        .unwrap();

    // The registrant is not the bound address
    assert_eq!(reg.set_meta(&ctx(account(0), 0), id, "k", b"v"), MetaUpdate::Ignored);
    assert_eq!(reg.set_meta(&ctx(account(7), 0), id, "k", b"v"), MetaUpdate::Ignored);
    assert!(reg.meta(id, "k").is_empty());

    assert_eq!(reg.set_meta(&ctx(account(6), 0), id, "k", b"v"), MetaUpdate::Applied);
    assert_eq!(reg.set_meta(&ctx(account(6), 0), 99, "k", b"v"), MetaUpdate::Ignored);
}

#[test]
fn test_ids_not_reused_but_names_are() {
    let mut reg = create_test_registry();

    let first = reg.register(&paid(account(1)), account(1), "abc", 10, "one").id().unwrap();
    reg.unregister(&ctx(account(0), 0), first).unwrap();

    let second = reg.register(&paid(account(1)), account(1), "abc", 10, "two").id().unwrap();
    assert_ne!(first, second);
    assert_eq!(reg.token(second).unwrap().name, "two");
}

#[test]
fn test_set_fee() {
    let mut reg = create_test_registry();

    assert!(reg.set_fee(&ctx(account(9), 0), 2 * ETHER).is_err());
    assert_eq!(reg.fee(), ETHER);

    reg.set_fee(&ctx(account(0), 0), 2 * ETHER).unwrap();
    assert_eq!(reg.fee(), 2 * ETHER);

    let outcome = reg.register(&paid(account(1)), account(1), "abc", 10, "name");
    assert!(matches!(outcome, Registration::Rejected(Rejection::InsufficientFee { .. })));
}

#[test]
fn test_drain_authorization() {
    let reg = create_test_registry();
    assert!(reg.drain(&ctx(account(9), 0)).is_err());
    assert!(reg.drain(&ctx(account(0), 0)).is_ok());
}

#[test]
fn test_set_owner() {
    let mut reg = create_test_registry();

    let event = reg.set_owner(&ctx(account(0), 0), account(1)).unwrap();
    assert_eq!(event, RegistryEvent::NewOwner { old: account(0), current: account(1) });
    assert_eq!(reg.owner(), account(1));

    assert!(reg.set_fee(&ctx(account(0), 0), 0).is_err());
    assert!(reg.set_fee(&ctx(account(1), 0), 0).is_ok());
}

#[test]
fn test_tokens_iterate_in_id_order() {
    let mut reg = create_test_registry();
    for (i, tla) in ["aaa", "bbb", "ccc"].iter().enumerate() {
        let outcome = reg.register(&paid(account(i as u8)), account(i as u8), tla, 10, "name");
        assert!(outcome.is_registered());
    }

    let tlas: Vec<&str> = reg.tokens().map(|token| token.tla.as_str()).collect();
    assert_eq!(tlas, vec!["aaa", "bbb", "ccc"]);
}
