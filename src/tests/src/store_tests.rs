//! Account store and session scenarios.

use cli::{AccountSelector, WalletBackend};
use crate::mock::MockNode;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;
use wallet_core::{AccountStore, CoreError, ACCOUNTS_FILE_NAME};

/// Tests that a saved store loads back identically.
#[test]
fn test_store_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(ACCOUNTS_FILE_NAME);

    let mut store = AccountStore::new();
    for alias in ["alice", "bob", "carol"] {
        store.create_account(alias).unwrap();
    }
    store.save(&path).unwrap();

    let loaded = AccountStore::load(&path).unwrap();
    assert_eq!(loaded.list_aliases(), vec!["alice", "bob", "carol"]);
    for (loaded, original) in loaded.iter().zip(store.iter()) {
        assert_eq!(loaded, original);
        assert_eq!(loaded.address(), original.address());
    }
}

/// Tests that the accounts file is the documented JSON document.
#[test]
fn test_store_file_format() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(ACCOUNTS_FILE_NAME);

    let mut store = AccountStore::new();
    store.create_account("alice").unwrap();
    store.save(&path).unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let alice = &json["accounts"][0];
    let account = store.get_by_alias("alice").unwrap();
    assert_eq!(alice["alias"], "alice");
    assert_eq!(alice["public_key"], hex::encode(account.public_key()));
    assert_eq!(alice["private_key"], hex::encode(account.private_key()));
}

/// Tests positional lookups against the listed order.
#[test]
fn test_positions_follow_creation_order() {
    let mut store = AccountStore::new();
    for alias in ["zed", "amy", "mo"] {
        store.create_account(alias).unwrap();
    }

    let aliases: Vec<String> = store.list_aliases().iter().map(|a| a.to_string()).collect();
    for (k, alias) in aliases.iter().enumerate() {
        assert_eq!(store.get_by_position(k + 1).unwrap().alias(), alias);
    }
    assert!(matches!(store.get_by_position(0), Err(CoreError::IndexOutOfRange { .. })));
    assert!(matches!(store.get_by_position(4), Err(CoreError::IndexOutOfRange { .. })));
}

/// Tests that switching accounts leaves the other account's keys alone.
#[test]
fn test_select_other_account() {
    let dir = tempdir().unwrap();
    let (mut wallet, _) = WalletBackend::open(dir.path(), MockNode::new(), Duration::from_secs(1));
    wallet.create_account("alice").unwrap();
    wallet.create_account("bob").unwrap();
    let alice_before = wallet.store().get_by_alias("alice").unwrap().clone();
    assert_eq!(wallet.current_account().unwrap().alias(), "alice");

    wallet.select_account(&AccountSelector::Alias("bob".into())).unwrap();
    assert_eq!(wallet.current_account().unwrap().alias(), "bob");
    assert_eq!(wallet.store().get_by_alias("alice").unwrap(), &alice_before);
}

/// Tests that a corrupt file is surfaced and survives until an explicit save.
#[test]
fn test_corrupt_store_fallback() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(ACCOUNTS_FILE_NAME);
    fs::write(&path, "[1, 2, 3").unwrap();

    let (mut wallet, error) = WalletBackend::open(dir.path(), MockNode::new(), Duration::from_secs(1));
    assert!(matches!(error, Some(CoreError::CorruptStore { .. })));
    assert!(wallet.list_accounts().is_empty());

    wallet.create_account("alice").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "[1, 2, 3");

    wallet.persist_accounts().unwrap();
    assert_eq!(AccountStore::load(&path).unwrap().list_aliases(), vec!["alice"]);
    assert_eq!(fs::read_to_string(wallet.corrupt_path()).unwrap(), "[1, 2, 3");
}

/// Tests that a missing file is an empty store.
#[test]
fn test_missing_store_is_empty() {
    let dir = tempdir().unwrap();
    let (wallet, error) = WalletBackend::open(
        dir.path().join("not-created-yet"),
        MockNode::new(),
        Duration::from_secs(1),
    );
    assert!(error.is_none());
    assert!(wallet.list_accounts().is_empty());
}
