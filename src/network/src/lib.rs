//! Node access for the wallet.
//!
//! This crate defines the narrow set of node capabilities the wallet relies on
//! (transaction submission and account/transaction queries) and a JSON-RPC
//! implementation of them.

pub mod client;
pub mod errors;
pub mod types;

// Re-export commonly used types and functions
pub use client::{NodeClient, RpcNodeClient, DEFAULT_TIMEOUT};
pub use errors::NetworkError;
pub use types::{AccountState, TransactionState};
