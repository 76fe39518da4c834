//! Core primitives for the wallet.
//!
//! This crate provides local account management, the canonical transaction
//! encoding and transfer signing. It performs no network I/O.

pub mod account;
pub mod builder;
pub mod codec;
pub mod errors;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use account::{verify_signature, Account};
pub use builder::{build_transfer, sign_message, SignedTransactionBytes};
pub use codec::{encode_signed, encode_unsigned, SignedTransaction, UnsignedTransaction};
pub use errors::CoreError;
pub use store::{AccountStore, ACCOUNTS_FILE_NAME};
pub use types::{Address, Amount, Nonce, Signature};
