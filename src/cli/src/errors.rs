//! Error types for the CLI wallet.

use std::error::Error as StdError;
use std::fmt;
use wallet_core::CoreError;
use wallet_network::NetworkError;

/// Errors that can occur in the CLI wallet.
#[derive(Debug)]
pub enum WalletError {
    /// Error when an account store, codec or signing operation fails.
    CoreError(CoreError),

    /// Error when the node cannot be reached or rejects a request.
    RemoteError(NetworkError),

    /// Error when an operation needs a current account and none is selected.
    NoCurrentAccount,

    /// Error when an address is invalid.
    InvalidAddress(String),

    /// Error when an amount is invalid.
    InvalidAmount(String),

    /// Error when operator input cannot be used.
    InvalidInput(String),

    /// Error when the configuration cannot be loaded.
    ConfigError(String),

    /// Error when reading operator input or writing output fails.
    FileError(std::io::Error),
}

impl fmt::Display for WalletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalletError::CoreError(e) => write!(f, "{}", e),
            WalletError::RemoteError(e) => write!(f, "Remote error: {}", e),
            WalletError::NoCurrentAccount => write!(f, "No current account selected"),
            WalletError::InvalidAddress(msg) => write!(f, "Invalid address: {}", msg),
            WalletError::InvalidAmount(msg) => write!(f, "Invalid amount: {}", msg),
            WalletError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            WalletError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            WalletError::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

impl StdError for WalletError {}

impl From<CoreError> for WalletError {
    fn from(error: CoreError) -> Self {
        WalletError::CoreError(error)
    }
}

impl From<NetworkError> for WalletError {
    fn from(error: NetworkError) -> Self {
        WalletError::RemoteError(error)
    }
}

impl From<std::io::Error> for WalletError {
    fn from(error: std::io::Error) -> Self {
        WalletError::FileError(error)
    }
}
