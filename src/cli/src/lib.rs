//! Interactive CLI wallet.

pub mod backend;
pub mod commands;
pub mod config;
pub mod errors;
pub mod repl;
pub mod session;
pub mod units;


// Re-export commonly used types and functions
pub use backend::WalletBackend;
pub use commands::send::TransferRequest;
pub use config::WalletConfig;
pub use errors::WalletError;
pub use repl::{dispatch, Flow, Repl, COMMANDS};
pub use session::{AccountSelector, SessionState, SessionStatus};
