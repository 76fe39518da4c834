//! Local account commands.

use crate::errors::WalletError;
use crate::repl::{Repl, PRINT_PREFIX};
use crate::units::coin_amount;
use colored::Colorize;
use std::io::{BufRead, Write};
use tracing::info;
use wallet_network::NodeClient;

impl<C: NodeClient, R: BufRead, W: Write> Repl<C, R, W> {
    /// Creates an account and saves the accounts file right away.
    pub(crate) fn create_account(&mut self, params: &str) -> Result<(), WalletError> {
        writeln!(self.output, "{} Create a new account", PRINT_PREFIX)?;
        let alias = self.param_or_input(params, "Enter an alias for the new account")?;

        let account = self.backend.create_account(&alias)?;
        let (alias, address) = (account.alias().to_string(), account.address());
        self.backend.persist_accounts()?;
        info!("Account `{}` saved", alias);

        writeln!(
            self.output,
            "{} Created account: {}, address: {}",
            PRINT_PREFIX,
            alias.green(),
            address
        )?;
        Ok(())
    }

    pub(crate) fn list_accounts(&mut self) -> Result<(), WalletError> {
        let current = self
            .backend
            .current_account()
            .ok()
            .map(|account| account.alias().to_string());

        if self.backend.store().is_empty() {
            writeln!(self.output, "{} No accounts yet. Use `account-new`.", PRINT_PREFIX)?;
        }
        for (i, account) in self.backend.store().iter().enumerate() {
            let marker = if current.as_deref() == Some(account.alias()) { "*" } else { " " };
            writeln!(
                self.output,
                "{} {}{}) {} {}",
                PRINT_PREFIX,
                marker,
                i + 1,
                account.alias(),
                account.address()
            )?;
        }
        Ok(())
    }

    /// Prints the current account together with the node's view of it.
    pub(crate) async fn print_account_info(&mut self) -> Result<(), WalletError> {
        let account = self.current_or_choose()?;
        let address = account.address();
        let state = self.backend.account_state(&address).await?;

        let out = &mut self.output;
        writeln!(out, "{} Local alias: {}", PRINT_PREFIX, account.alias().green())?;
        writeln!(out, "{} Address: {}", PRINT_PREFIX, address)?;
        writeln!(out, "{} Balance: {}", PRINT_PREFIX, coin_amount(state.current_balance))?;
        writeln!(out, "{} Nonce: {}", PRINT_PREFIX, state.current_nonce)?;
        writeln!(out, "{} Projected Balance: {}", PRINT_PREFIX, coin_amount(state.projected_balance))?;
        writeln!(out, "{} Projected Nonce: {}", PRINT_PREFIX, state.projected_nonce)?;
        writeln!(
            out,
            "{} Projected account state includes all pending transactions that haven't been added to the ledger yet.",
            PRINT_PREFIX
        )?;
        writeln!(out, "{} Public key: 0x{}", PRINT_PREFIX, hex::encode(account.public_key()))?;
        writeln!(
            out,
            "{} Private key: 0x{}",
            PRINT_PREFIX,
            hex::encode(account.private_key()).red()
        )?;
        Ok(())
    }

    /// Signs a hex-encoded message.
    pub(crate) fn sign_hex(&mut self, params: &str) -> Result<(), WalletError> {
        self.current_or_choose()?;
        let text = self.param_or_input(params, "Enter a hex message to sign")?;
        let digits = text.strip_prefix("0x").unwrap_or(&text);
        let message = hex::decode(digits)
            .map_err(|e| WalletError::InvalidInput(format!("message is not hex: {}", e)))?;

        let signature = self.backend.sign_message(&message)?;
        writeln!(
            self.output,
            "{} signature (in hex): {}",
            PRINT_PREFIX,
            hex::encode(signature.to_bytes())
        )?;
        Ok(())
    }

    /// Signs the UTF-8 bytes of a text message.
    pub(crate) fn sign_text(&mut self, params: &str) -> Result<(), WalletError> {
        self.current_or_choose()?;
        let text = self.param_or_input(params, "Enter a text message to sign")?;

        let signature = self.backend.sign_message(text.as_bytes())?;
        writeln!(
            self.output,
            "{} signature (in hex): {}",
            PRINT_PREFIX,
            hex::encode(signature.to_bytes())
        )?;
        Ok(())
    }
}
