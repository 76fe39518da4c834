//! Canonical transaction encoding.
//!
//! The same bytes serve as the signing payload and as the wire payload
//! submitted to the node, so the layout below is frozen for
//! [`TX_FORMAT_VERSION`]:
//!
//! | field      | width | encoding            |
//! |------------|-------|---------------------|
//! | nonce      | 8     | big-endian `u64`    |
//! | amount     | 8     | big-endian `u64`    |
//! | recipient  | 20    | raw address bytes   |
//! | gas limit  | 8     | big-endian `u64`    |
//! | gas price  | 8     | big-endian `u64`    |
//! | signature  | 64    | raw, signed form only |
//!
//! Encoding goes through `bincode` with fixed-width big-endian integers, which
//! writes struct fields and fixed arrays back to back with no length prefixes.

use crate::errors::CoreError;
use crate::types::{Address, Amount, Nonce, Signature, ADDRESS_LENGTH, SIGNATURE_LENGTH};
use bincode::Options;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Version of the transaction layout. Any change to field order or widths
/// requires a new version.
pub const TX_FORMAT_VERSION: u8 = 1;

/// Length of an encoded unsigned transaction.
pub const UNSIGNED_TX_LENGTH: usize = 8 + 8 + ADDRESS_LENGTH + 8 + 8;

/// Length of an encoded signed transaction.
pub const SIGNED_TX_LENGTH: usize = UNSIGNED_TX_LENGTH + SIGNATURE_LENGTH;

/// The signable fields of a coin transfer. Field order is the wire order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UnsignedTransaction {
    /// The sender's sequence number
    pub nonce: Nonce,
    /// The amount to transfer
    pub amount: Amount,
    /// The recipient's address
    pub recipient: Address,
    /// Maximum gas the transfer may consume
    pub gas_limit: Amount,
    /// Price paid per unit of gas
    pub gas_price: Amount,
}

/// A transfer together with the sender's signature over its canonical bytes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SignedTransaction {
    /// The signed fields
    pub transaction: UnsignedTransaction,
    /// Signature over `encode_unsigned(&transaction)`
    pub signature: Signature,
}

fn canonical() -> impl Options {
    bincode::DefaultOptions::new()
        .with_big_endian()
        .with_fixint_encoding()
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, CoreError> {
    canonical()
        .serialize(value)
        .map_err(|e| CoreError::Encoding(e.to_string()))
}

/// Encodes the signable fields of a transaction.
pub fn encode_unsigned(tx: &UnsignedTransaction) -> Result<Vec<u8>, CoreError> {
    encode(tx)
}

/// Encodes a signed transaction: the unsigned encoding followed by the signature.
pub fn encode_signed(tx: &SignedTransaction) -> Result<Vec<u8>, CoreError> {
    encode(tx)
}

/// Computes the identifier of a signed transaction from its encoding.
pub fn transaction_id(signed_bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(signed_bytes);
    hasher.finalize().into()
}
