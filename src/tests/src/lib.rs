//! Integration tests for the wallet.

pub mod mock;

#[cfg(test)]
mod store_tests;
#[cfg(test)]
mod transfer_tests;
