//! Node query commands.

use crate::errors::WalletError;
use crate::repl::{Repl, PRINT_PREFIX};
use crate::units::coin_amount;
use std::io::{BufRead, Write};
use wallet_core::Address;
use wallet_network::NodeClient;

impl<C: NodeClient, R: BufRead, W: Write> Repl<C, R, W> {
    /// Prints the node's view of any address.
    pub(crate) async fn print_account_state(&mut self, params: &str) -> Result<(), WalletError> {
        let text = self.param_or_input(params, "Enter an account address")?;
        let address = text
            .parse::<Address>()
            .map_err(|e| WalletError::InvalidAddress(e.to_string()))?;

        let state = self.backend.account_state(&address).await?;
        let out = &mut self.output;
        writeln!(out, "{} Address: {}", PRINT_PREFIX, address)?;
        writeln!(out, "{} Balance: {}", PRINT_PREFIX, coin_amount(state.current_balance))?;
        writeln!(out, "{} Nonce: {}", PRINT_PREFIX, state.current_nonce)?;
        writeln!(out, "{} Projected Balance: {}", PRINT_PREFIX, coin_amount(state.projected_balance))?;
        writeln!(out, "{} Projected Nonce: {}", PRINT_PREFIX, state.projected_nonce)?;
        Ok(())
    }

    /// Prints the state of a submitted transaction.
    pub(crate) async fn print_transaction_status(&mut self, params: &str) -> Result<(), WalletError> {
        let text = self.param_or_input(params, "Enter a transaction id")?;
        let digits = text.strip_prefix("0x").unwrap_or(&text);
        let id = hex::decode(digits)
            .ok()
            .and_then(|bytes| <[u8; 32]>::try_from(bytes).ok())
            .ok_or_else(|| WalletError::InvalidInput(format!("bad transaction id `{}`", text)))?;

        let state = self.backend.transaction_state(&id).await?;
        writeln!(self.output, "{} Transaction: 0x{}", PRINT_PREFIX, hex::encode(state.id))?;
        writeln!(self.output, "{} State: {}", PRINT_PREFIX, state.state)?;
        Ok(())
    }
}
