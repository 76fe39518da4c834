//! Wallet backend: local accounts, session selection and a node client.

use crate::errors::WalletError;
use crate::session::{AccountSelector, SessionState, SessionStatus};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};
use wallet_core::{
    build_transfer, sign_message, Account, AccountStore, Address, Amount, CoreError, Nonce,
    Signature, ACCOUNTS_FILE_NAME,
};
use wallet_network::{AccountState, NetworkError, NodeClient, TransactionState};

/// Suffix given to an unreadable accounts file before it is replaced.
pub const CORRUPT_SUFFIX: &str = "corrupt";

/// Everything the command layer can ask of the wallet.
///
/// Submission and queries go through `C`; the backend never keeps a nonce of
/// its own and never touches the store because of a node response.
pub struct WalletBackend<C> {
    store: AccountStore,
    session: SessionState,
    accounts_path: PathBuf,
    /// Set while the file at `accounts_path` could not be loaded
    corrupt: bool,
    client: C,
    request_timeout: Duration,
}

impl<C: NodeClient> WalletBackend<C> {
    /// Creates a backend around an already loaded store.
    pub fn new(store: AccountStore, accounts_path: PathBuf, client: C, request_timeout: Duration) -> Self {
        Self {
            store,
            session: SessionState::new(),
            accounts_path,
            corrupt: false,
            client,
            request_timeout,
        }
    }

    /// Opens the accounts file in `data_dir`.
    ///
    /// A corrupt file is reported through the second value and the backend
    /// starts empty. The file stays as it is until `persist_accounts`, which
    /// first moves it aside to `accounts.json.corrupt`.
    pub fn open<P: AsRef<Path>>(
        data_dir: P,
        client: C,
        request_timeout: Duration,
    ) -> (Self, Option<CoreError>) {
        let accounts_path = data_dir.as_ref().join(ACCOUNTS_FILE_NAME);
        let (store, error) = AccountStore::load_or_default(&accounts_path);
        if let Some(e) = &error {
            warn!("Cannot load accounts from {}: {}", accounts_path.display(), e);
        }
        let mut backend = Self::new(store, accounts_path, client, request_timeout);
        backend.corrupt = matches!(error, Some(CoreError::CorruptStore { .. }));
        (backend, error)
    }

    /// Gets the local account store.
    pub fn store(&self) -> &AccountStore {
        &self.store
    }

    /// Gets the path of the accounts file.
    pub fn accounts_path(&self) -> &Path {
        &self.accounts_path
    }

    /// Gets the path an unreadable accounts file is moved to.
    pub fn corrupt_path(&self) -> PathBuf {
        let mut name = self.accounts_path.as_os_str().to_owned();
        name.push(".");
        name.push(CORRUPT_SUFFIX);
        PathBuf::from(name)
    }

    /// Gets the selection status of this session.
    pub fn status(&self) -> SessionStatus {
        self.session.status(&self.store)
    }

    /// Creates an account. The first account of an empty wallet becomes current.
    pub fn create_account(&mut self, alias: &str) -> Result<&Account, WalletError> {
        self.store.create_account(alias)?;
        let position = self.store.len();
        self.session.account_created(position);
        info!("Created account `{}`", alias);
        Ok(self.store.get_by_position(position)?)
    }

    /// Lists the aliases in creation order.
    pub fn list_accounts(&self) -> Vec<&str> {
        self.store.list_aliases()
    }

    /// Makes an account current. See [`SessionState::select`].
    pub fn select_account(&mut self, selector: &AccountSelector) -> Result<&Account, WalletError> {
        let account = self.session.select(&self.store, selector)?;
        debug!("Current account is now `{}`", account.alias());
        Ok(account)
    }

    /// Gets the current account, or `NoCurrentAccount`.
    pub fn current_account(&self) -> Result<&Account, WalletError> {
        self.session.current(&self.store)
    }

    /// Writes the accounts file.
    ///
    /// An accounts file that failed to load is renamed, never overwritten.
    pub fn persist_accounts(&mut self) -> Result<(), WalletError> {
        if self.corrupt && self.accounts_path.exists() {
            let backup = self.corrupt_path();
            std::fs::rename(&self.accounts_path, &backup)?;
            warn!(
                "Moved unreadable accounts file {} to {}",
                self.accounts_path.display(),
                backup.display()
            );
        }
        self.corrupt = false;

        self.store.save(&self.accounts_path)?;
        Ok(())
    }

    /// Signs an arbitrary message with the current account.
    pub fn sign_message(&self, message: &[u8]) -> Result<Signature, WalletError> {
        let account = self.current_account()?;
        Ok(sign_message(account, message)?)
    }

    /// Gets the node's state for any address.
    pub async fn account_state(&self, address: &Address) -> Result<AccountState, WalletError> {
        let request = self.client.account_state(address);
        self.bounded("account state", request).await
    }

    /// Gets the node's state for the current account.
    pub async fn current_account_state(&self) -> Result<AccountState, WalletError> {
        let address = self.current_account()?.address();
        self.account_state(&address).await
    }

    /// Gets the node's state for a transaction id.
    pub async fn transaction_state(&self, id: &[u8; 32]) -> Result<TransactionState, WalletError> {
        let request = self.client.transaction_state(id);
        self.bounded("transaction state", request).await
    }

    /// Signs a transfer from the current account and submits it once.
    ///
    /// `nonce` must be the node's view of the sender's nonce.
    pub async fn build_and_submit_transfer(
        &self,
        recipient: Address,
        nonce: Nonce,
        amount: Amount,
        gas_price: Amount,
        gas_limit: Amount,
    ) -> Result<TransactionState, WalletError> {
        let sender = self.current_account()?;
        let signed = build_transfer(sender, recipient, nonce, amount, gas_price, gas_limit)?;

        info!(
            "Submitting transfer 0x{} from `{}`",
            hex::encode(signed.id),
            sender.alias()
        );
        let request = self.client.submit_transaction(&signed.bytes);
        self.bounded("transaction submission", request).await
    }

    async fn bounded<T, F>(&self, what: &str, request: F) -> Result<T, WalletError>
    where
        F: std::future::Future<Output = Result<T, NetworkError>>,
    {
        match tokio::time::timeout(self.request_timeout, request).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(WalletError::RemoteError(NetworkError::Timeout(what.to_string()))),
        }
    }
}
