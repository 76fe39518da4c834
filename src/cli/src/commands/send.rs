//! Send coin command for the CLI wallet.

use crate::errors::WalletError;
use crate::repl::{Repl, PRINT_PREFIX};
use crate::units::coin_amount;
use colored::Colorize;
use std::io::{BufRead, Write};
use tracing::{debug, info};
use wallet_core::Address;
use wallet_network::NodeClient;

/// The operator's choices for a transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub recipient: Address,
    pub amount: u64,
    pub gas_price: u64,
    pub gas_limit: u64,
}

impl TransferRequest {
    /// Parses `<recipient> <amount> [gas-price] [gas-limit]`, falling back to
    /// the given defaults for the gas values.
    pub fn parse(params: &str, gas_price: u64, gas_limit: u64) -> Result<Self, WalletError> {
        let mut parts = params.split_whitespace();

        let recipient = parts
            .next()
            .ok_or_else(|| WalletError::InvalidAddress("missing recipient".to_string()))?
            .parse::<Address>()
            .map_err(|e| WalletError::InvalidAddress(e.to_string()))?;
        let amount = parse_amount(parts.next(), "amount")?
            .ok_or_else(|| WalletError::InvalidAmount("missing amount".to_string()))?;
        let gas_price = parse_amount(parts.next(), "gas price")?.unwrap_or(gas_price);
        let gas_limit = parse_amount(parts.next(), "gas limit")?.unwrap_or(gas_limit);

        if let Some(extra) = parts.next() {
            return Err(WalletError::InvalidInput(format!("unexpected `{}`", extra)));
        }
        if amount == 0 {
            return Err(WalletError::InvalidAmount("amount must be positive".to_string()));
        }

        Ok(Self {
            recipient,
            amount,
            gas_price,
            gas_limit,
        })
    }
}

fn parse_amount(value: Option<&str>, what: &str) -> Result<Option<u64>, WalletError> {
    value
        .map(|v| {
            v.parse::<u64>()
                .map_err(|e| WalletError::InvalidAmount(format!("{} `{}`: {}", what, v, e)))
        })
        .transpose()
}

impl<C: NodeClient, R: BufRead, W: Write> Repl<C, R, W> {
    /// Transfers coins from the current account.
    ///
    /// The nonce is the node's projected nonce for the sender, fetched right
    /// before signing.
    pub(crate) async fn submit_coin_transaction(&mut self, params: &str) -> Result<(), WalletError> {
        let account = self.current_or_choose()?;

        let params = if params.is_empty() {
            let recipient = self.input_not_blank("Enter recipient address")?;
            let amount = self.input_not_blank("Enter amount to transfer in Smidge")?;
            format!("{} {}", recipient, amount)
        } else {
            params.to_string()
        };
        let request = TransferRequest::parse(&params, self.config.gas_price, self.config.gas_limit)?;

        let state = self.backend.account_state(&account.address()).await?;
        let nonce = state.projected_nonce;
        debug!("Using projected nonce {} for `{}`", nonce, account.alias());

        writeln!(
            self.output,
            "{} Sending {} from `{}` to {} (nonce {}, gas price {}, gas limit {})",
            PRINT_PREFIX,
            coin_amount(request.amount),
            account.alias(),
            request.recipient,
            nonce,
            request.gas_price,
            request.gas_limit
        )?;

        let tx_state = self
            .backend
            .build_and_submit_transfer(
                request.recipient,
                nonce,
                request.amount,
                request.gas_price,
                request.gas_limit,
            )
            .await?;
        info!("Transaction {} submitted", tx_state);

        writeln!(
            self.output,
            "{} {} {}",
            PRINT_PREFIX,
            "Transaction submitted:".green(),
            tx_state
        )?;
        Ok(())
    }
}
