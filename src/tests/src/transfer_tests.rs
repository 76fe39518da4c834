//! End-to-end transfer scenarios.

use cli::WalletBackend;
use crate::mock::MockNode;
use std::time::Duration;
use tempfile::tempdir;
use wallet_core::codec::{UNSIGNED_TX_LENGTH, SIGNED_TX_LENGTH};
use wallet_core::{verify_signature, Address, Signature};
use wallet_network::AccountState;

/// Tests the full flow from an empty wallet to a submitted transfer.
#[tokio::test]
async fn test_alice_transfer() {
    let dir = tempdir().unwrap();
    let node = MockNode::new();
    let (mut wallet, error) = WalletBackend::open(dir.path(), node.clone(), Duration::from_secs(1));
    assert!(error.is_none());

    wallet.create_account("alice").unwrap();
    assert_eq!(wallet.list_accounts(), vec!["alice"]);
    assert_eq!(wallet.current_account().unwrap().alias(), "alice");

    let recipient: Address = "0x00112233445566778899aabbccddeeff00112233".parse().unwrap();
    let state = wallet
        .build_and_submit_transfer(recipient, 0, 500_000_000_000, 1, 100)
        .await
        .unwrap();
    assert_eq!(state.state, "pending");

    let submitted = node.submitted();
    assert_eq!(submitted.len(), 1);
    let bytes = &submitted[0];
    assert_eq!(bytes.len(), SIGNED_TX_LENGTH);

    // Re-sign the embedded fields independently and compare
    let alice = wallet.current_account().unwrap();
    let payload = &bytes[..UNSIGNED_TX_LENGTH];
    let resigned = alice.sign(payload).unwrap();
    assert_eq!(resigned.to_bytes()[..], bytes[UNSIGNED_TX_LENGTH..]);

    let mut embedded = [0u8; 64];
    embedded.copy_from_slice(&bytes[UNSIGNED_TX_LENGTH..]);
    assert!(verify_signature(alice.public_key(), payload, &Signature(embedded)));

    // The node can look the transaction up by the returned id
    let looked_up = wallet.transaction_state(&state.id).await.unwrap();
    assert_eq!(looked_up.id, state.id);
}

/// Tests that the nonce comes from the node on every transfer.
#[tokio::test]
async fn test_nonce_is_never_cached() {
    let dir = tempdir().unwrap();
    let node = MockNode::new();
    let (mut wallet, _) = WalletBackend::open(dir.path(), node.clone(), Duration::from_secs(1));
    let address = wallet.create_account("alice").unwrap().address();

    for nonce in [3u64, 3, 9] {
        node.set_account(
            address,
            AccountState {
                projected_nonce: nonce,
                ..AccountState::default()
            },
        );
        let state = wallet.current_account_state().await.unwrap();
        wallet
            .build_and_submit_transfer(Address::default(), state.projected_nonce, 1, 1, 1)
            .await
            .unwrap();
    }

    let nonces: Vec<u64> = node
        .submitted()
        .iter()
        .map(|bytes| u64::from_be_bytes(bytes[..8].try_into().unwrap()))
        .collect();
    assert_eq!(nonces, vec![3, 3, 9]);
}
