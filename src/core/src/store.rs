//! Ordered, file-backed collection of local accounts.

use crate::account::Account;
use crate::errors::CoreError;
use crate::types::{PRIVATE_KEY_LENGTH, PUBLIC_KEY_LENGTH};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Name of the accounts file inside the data directory.
pub const ACCOUNTS_FILE_NAME: &str = "accounts.json";

/// On-disk form of a single account.
#[derive(Debug, Serialize, Deserialize)]
struct AccountRecord {
    alias: String,
    public_key: String,
    private_key: String,
}

/// On-disk form of the whole store.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    accounts: Vec<AccountRecord>,
}

/// The local accounts, in creation order.
#[derive(Debug, Default, Clone)]
pub struct AccountStore {
    accounts: Vec<Account>,
}

impl AccountStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a store from a file. A missing file yields an empty store.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No account store at {}, starting empty", path.display());
                return Ok(Self::new());
            }
            Err(e) => return Err(CoreError::Io(e)),
        };

        let corrupt = |reason: String| CoreError::CorruptStore {
            path: path.to_path_buf(),
            reason,
        };

        let file: StoreFile = serde_json::from_str(&contents).map_err(|e| corrupt(e.to_string()))?;

        let mut seen = HashSet::new();
        let mut accounts = Vec::with_capacity(file.accounts.len());
        for record in file.accounts {
            if !seen.insert(record.alias.clone()) {
                return Err(corrupt(format!("duplicate alias `{}`", record.alias)));
            }
            let public_key: [u8; PUBLIC_KEY_LENGTH] = decode_key(&record.public_key)
                .ok_or_else(|| corrupt(format!("bad public key for `{}`", record.alias)))?;
            let private_key: [u8; PRIVATE_KEY_LENGTH] = decode_key(&record.private_key)
                .ok_or_else(|| corrupt(format!("bad private key for `{}`", record.alias)))?;
            let account = Account::from_keys(&record.alias, public_key, private_key)
                .map_err(|e| corrupt(e.to_string()))?;
            accounts.push(account);
        }

        info!("Loaded {} account(s) from {}", accounts.len(), path.display());
        Ok(Self { accounts })
    }

    /// Loads a store, falling back to an empty one when the file is corrupt.
    ///
    /// The load error is handed back so the caller can report it. The file
    /// itself is left alone until the next explicit `save`.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> (Self, Option<CoreError>) {
        match Self::load(path) {
            Ok(store) => (store, None),
            Err(e) => (Self::new(), Some(e)),
        }
    }

    /// Writes every account to `path`, replacing the previous file atomically.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), CoreError> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let file = StoreFile {
            accounts: self
                .accounts
                .iter()
                .map(|account| AccountRecord {
                    alias: account.alias().to_string(),
                    public_key: hex::encode(account.public_key()),
                    private_key: hex::encode(account.private_key()),
                })
                .collect(),
        };

        // Write next to the target so the rename stays on one filesystem
        let temp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(temp.as_file());
            serde_json::to_writer_pretty(&mut writer, &file)
                .map_err(|e| CoreError::Io(e.into()))?;
            writer.flush()?;
        }
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|e| CoreError::Io(e.error))?;

        info!("Saved {} account(s) to {}", self.accounts.len(), path.display());
        Ok(())
    }

    /// Creates a new account and appends it. Nothing is written to disk.
    pub fn create_account(&mut self, alias: &str) -> Result<&Account, CoreError> {
        if alias.trim().is_empty() {
            return Err(CoreError::InvalidAlias(alias.to_string()));
        }
        if self.position_of(alias).is_some() {
            return Err(CoreError::DuplicateAlias(alias.to_string()));
        }

        let account = Account::generate(alias)?;
        debug!("Created account `{}` with address {}", alias, account.address());
        self.accounts.push(account);
        Ok(&self.accounts[self.accounts.len() - 1])
    }

    /// Lists the aliases in creation order.
    pub fn list_aliases(&self) -> Vec<&str> {
        self.accounts.iter().map(Account::alias).collect()
    }

    /// Gets an account by exact alias.
    pub fn get_by_alias(&self, alias: &str) -> Result<&Account, CoreError> {
        self.accounts
            .iter()
            .find(|account| account.alias() == alias)
            .ok_or_else(|| CoreError::NotFound(alias.to_string()))
    }

    /// Gets an account by 1-based position.
    pub fn get_by_position(&self, index: usize) -> Result<&Account, CoreError> {
        if index == 0 || index > self.accounts.len() {
            return Err(CoreError::IndexOutOfRange {
                index,
                len: self.accounts.len(),
            });
        }
        Ok(&self.accounts[index - 1])
    }

    /// Gets the 1-based position of an alias.
    pub fn position_of(&self, alias: &str) -> Option<usize> {
        self.accounts
            .iter()
            .position(|account| account.alias() == alias)
            .map(|i| i + 1)
    }

    /// Gets the number of accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Checks whether the store holds no accounts.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Iterates over the accounts in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }
}

fn decode_key<const N: usize>(text: &str) -> Option<[u8; N]> {
    let digits = text.strip_prefix("0x").unwrap_or(text);
    hex::decode(digits).ok()?.try_into().ok()
}
