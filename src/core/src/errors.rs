//! Error types for the core crate.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in the core crate.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The accounts file exists but could not be parsed.
    #[error("Corrupt account store at {}: {}", .path.display(), .reason)]
    CorruptStore {
        /// Path of the offending file
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },

    /// An account with the same alias already exists.
    #[error("Duplicate alias: an account named `{0}` already exists")]
    DuplicateAlias(String),

    /// The alias is empty or whitespace only.
    #[error("Invalid alias: {0:?}")]
    InvalidAlias(String),

    /// No account has the given alias.
    #[error("Account not found: {0}")]
    NotFound(String),

    /// A 1-based account position outside `1..=len`.
    #[error("Account index {index} out of range (1..={len})")]
    IndexOutOfRange {
        /// The requested position
        index: usize,
        /// The number of accounts in the store
        len: usize,
    },

    /// The account key material cannot produce a valid signature.
    #[error("Signing failed: {0}")]
    Signing(String),

    /// The canonical transaction encoding could not be produced.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Error when a filesystem operation fails.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
