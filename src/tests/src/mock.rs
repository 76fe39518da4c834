//! An in-memory node used by the integration tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use wallet_core::codec::transaction_id;
use wallet_core::Address;
use wallet_network::{AccountState, NetworkError, NodeClient, TransactionState};

/// Records every submission and answers queries from a fixed table.
#[derive(Clone, Default)]
pub struct MockNode {
    submitted: Arc<Mutex<Vec<Vec<u8>>>>,
    accounts: Arc<Mutex<HashMap<Address, AccountState>>>,
}

impl MockNode {
    /// Creates a node with no submissions and no known accounts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets what the node reports for `address`.
    pub fn set_account(&self, address: Address, state: AccountState) {
        self.accounts.lock().unwrap().insert(address, state);
    }

    /// Gets every submitted transaction, oldest first.
    pub fn submitted(&self) -> Vec<Vec<u8>> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl NodeClient for MockNode {
    async fn submit_transaction(&self, signed: &[u8]) -> Result<TransactionState, NetworkError> {
        self.submitted.lock().unwrap().push(signed.to_vec());
        Ok(TransactionState {
            id: transaction_id(signed),
            state: "pending".to_string(),
        })
    }

    async fn account_state(&self, address: &Address) -> Result<AccountState, NetworkError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .get(address)
            .cloned()
            .unwrap_or_default())
    }

    async fn transaction_state(&self, id: &[u8; 32]) -> Result<TransactionState, NetworkError> {
        let known = self
            .submitted
            .lock()
            .unwrap()
            .iter()
            .any(|bytes| &transaction_id(bytes) == id);
        if known {
            Ok(TransactionState {
                id: *id,
                state: "pending".to_string(),
            })
        } else {
            Err(NetworkError::NodeRequestFailed(format!(
                "unknown transaction 0x{}",
                hex::encode(id)
            )))
        }
    }
}
