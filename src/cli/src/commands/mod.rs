//! Commands for the CLI wallet.

pub mod account;
pub mod send;
pub mod state;
