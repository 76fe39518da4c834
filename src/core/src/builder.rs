//! Builds and signs coin transfers.

use crate::account::Account;
use crate::codec::{self, SignedTransaction, UnsignedTransaction};
use crate::errors::CoreError;
use crate::types::{Address, Amount, Nonce, Signature};
use tracing::debug;

/// A signed transfer, encoded and ready for submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedTransactionBytes {
    /// The canonical signed encoding
    pub bytes: Vec<u8>,
    /// The signature embedded in `bytes`
    pub signature: Signature,
    /// SHA-256 of `bytes`
    pub id: [u8; 32],
}

/// Builds a transfer from `sender` to `recipient` and signs it.
///
/// `nonce` must come from the node's view of the sender. Nothing here keeps or
/// advances a local nonce.
pub fn build_transfer(
    sender: &Account,
    recipient: Address,
    nonce: Nonce,
    amount: Amount,
    gas_price: Amount,
    gas_limit: Amount,
) -> Result<SignedTransactionBytes, CoreError> {
    let transaction = UnsignedTransaction {
        nonce,
        amount,
        recipient,
        gas_limit,
        gas_price,
    };

    let payload = codec::encode_unsigned(&transaction)?;
    let signature = sender.sign(&payload)?;

    let signed = SignedTransaction {
        transaction,
        signature,
    };
    let bytes = codec::encode_signed(&signed)?;
    let id = codec::transaction_id(&bytes);

    debug!(
        "Signed transfer of {} from {} to {} (nonce {}, id {})",
        amount,
        sender.address(),
        recipient,
        nonce,
        hex::encode(id)
    );

    Ok(SignedTransactionBytes {
        bytes,
        signature,
        id,
    })
}

/// Signs an arbitrary message with the account's private key.
pub fn sign_message(account: &Account, message: &[u8]) -> Result<Signature, CoreError> {
    account.sign(message)
}
