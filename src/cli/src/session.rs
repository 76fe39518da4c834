//! Current-account selection for one operator session.

use crate::errors::WalletError;
use wallet_core::{Account, AccountStore, CoreError};

/// Where a session stands with respect to account selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// The store holds no accounts yet.
    NoAccounts,
    /// Accounts exist but none is current.
    HasAccountsNoneSelected,
    /// The account at this 1-based position is current.
    AccountSelected(usize),
}

/// How an operator names an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountSelector {
    /// Exact alias match.
    Alias(String),
    /// 1-based position in creation order.
    Position(usize),
}

impl AccountSelector {
    /// Reads operator input as an alias.
    ///
    /// Numbers stay aliases here: an account may be named `2`, so the store
    /// decides in [`SessionState::select`] whether a position was meant.
    pub fn parse(input: &str) -> Self {
        AccountSelector::Alias(input.trim().to_string())
    }
}

/// The current account, held as a position into an [`AccountStore`].
///
/// Accounts are only ever appended, so a position stays valid for the life of
/// the store it was taken from.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    current: Option<usize>,
}

impl SessionState {
    /// Creates a session with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the selection status against `store`.
    pub fn status(&self, store: &AccountStore) -> SessionStatus {
        match self.current {
            Some(position) => SessionStatus::AccountSelected(position),
            None if store.is_empty() => SessionStatus::NoAccounts,
            None => SessionStatus::HasAccountsNoneSelected,
        }
    }

    /// Records that an account was appended at `position`. The very first
    /// account of a store becomes current; later ones leave selection alone.
    pub fn account_created(&mut self, position: usize) {
        if self.current.is_none() && position == 1 {
            self.current = Some(position);
        }
    }

    /// Makes the selected account current. On failure the selection is unchanged.
    ///
    /// An alias always wins over a position: `Alias("2")` picks the account
    /// named `2` when there is one and only then the second account.
    pub fn select<'a>(
        &mut self,
        store: &'a AccountStore,
        selector: &AccountSelector,
    ) -> Result<&'a Account, CoreError> {
        let position = match selector {
            AccountSelector::Alias(alias) => match store.position_of(alias) {
                Some(position) => position,
                None => match alias.parse::<usize>() {
                    Ok(position) => {
                        store.get_by_position(position)?;
                        position
                    }
                    Err(_) => return Err(CoreError::NotFound(alias.clone())),
                },
            },
            AccountSelector::Position(position) => {
                store.get_by_position(*position)?;
                *position
            }
        };

        self.current = Some(position);
        store.get_by_position(position)
    }

    /// Gets the current account. Never selects one implicitly.
    pub fn current<'a>(&self, store: &'a AccountStore) -> Result<&'a Account, WalletError> {
        let position = self.current.ok_or(WalletError::NoCurrentAccount)?;
        store
            .get_by_position(position)
            .map_err(|_| WalletError::NoCurrentAccount)
    }
}
