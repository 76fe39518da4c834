//! Messages exchanged with the node.

use crate::errors::NetworkError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An account as seen by the node.
///
/// The projected values include pending transactions that are not yet part of
/// the ledger.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountState {
    /// Balance in the applied ledger state
    pub current_balance: u64,
    /// Nonce in the applied ledger state
    pub current_nonce: u64,
    /// Balance including pending transactions
    pub projected_balance: u64,
    /// Nonce including pending transactions
    pub projected_nonce: u64,
}

/// The node's view of a submitted transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionState {
    /// The transaction id
    pub id: [u8; 32],
    /// The state label reported by the node, e.g. `pending` or `rejected`
    pub state: String,
}

/// Transaction state as it appears on the wire.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct TransactionStateMsg {
    pub id: String,
    pub state: String,
}

impl TryFrom<TransactionStateMsg> for TransactionState {
    type Error = NetworkError;

    fn try_from(msg: TransactionStateMsg) -> Result<Self, Self::Error> {
        let digits = msg.id.trim_start_matches("0x");
        let id = hex::decode(digits)
            .ok()
            .and_then(|bytes| <[u8; 32]>::try_from(bytes).ok())
            .ok_or_else(|| NetworkError::InvalidResponse(format!("bad transaction id: {}", msg.id)))?;

        Ok(Self {
            id,
            state: msg.state,
        })
    }
}

impl fmt::Display for TransactionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{} ({})", hex::encode(self.id), self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_state_wire_names() {
        let json = r#"{"currentBalance":10,"currentNonce":1,"projectedBalance":4,"projectedNonce":2}"#;
        let state: AccountState = serde_json::from_str(json).unwrap();
        assert_eq!(state.current_balance, 10);
        assert_eq!(state.projected_nonce, 2);
    }

    #[test]
    fn test_transaction_state_conversion() {
        let msg = TransactionStateMsg {
            id: format!("0x{}", hex::encode([9u8; 32])),
            state: "pending".to_string(),
        };
        let state = TransactionState::try_from(msg).unwrap();
        assert_eq!(state.id, [9u8; 32]);
        assert_eq!(state.state, "pending");

        let bad = TransactionStateMsg {
            id: "abcd".to_string(),
            state: "pending".to_string(),
        };
        assert!(matches!(
            TransactionState::try_from(bad),
            Err(NetworkError::InvalidResponse(_))
        ));
    }
}
