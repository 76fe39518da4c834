//! Line-oriented command loop.
//!
//! Commands are matched by prefix against [`COMMANDS`] in declaration order,
//! and the first match wins. Whatever follows the command name on the line is
//! handed to the command as its parameters.

use crate::backend::WalletBackend;
use crate::config::WalletConfig;
use crate::errors::WalletError;
use crate::session::{AccountSelector, SessionStatus};
use colored::Colorize;
use std::io::{BufRead, Write};
use tracing::{debug, warn};
use wallet_core::Account;
use wallet_network::NodeClient;

/// Prompt shown before each command.
pub const PROMPT: &str = "$ ";

/// Prefix of every line the wallet prints.
pub const PRINT_PREFIX: &str = ">";

/// What a command does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    AccountNew,
    AccountSet,
    AccountList,
    AccountInfo,
    AccountSign,
    AccountTextSign,
    AccountSendCoin,
    StateAccount,
    StatusTx,
    Help,
    Quit,
}

/// A command as the operator types it.
#[derive(Debug, Clone, Copy)]
pub struct Command {
    pub text: &'static str,
    pub description: &'static str,
    pub action: Action,
}

const fn command(text: &'static str, description: &'static str, action: Action) -> Command {
    Command {
        text,
        description,
        action,
    }
}

/// Every command, in matching order.
pub const COMMANDS: &[Command] = &[
    // local accounts
    command("account-new", "Create a new account (key pair)", Action::AccountNew),
    command("account-set", "Set one of the previously created accounts as current", Action::AccountSet),
    command("account-list", "List the local accounts", Action::AccountList),
    command("account-info", "Display the current account info", Action::AccountInfo),
    command("account-sign", "Sign a hex message with the current account private key", Action::AccountSign),
    command("account-text-sign", "Sign a text message with the current account private key", Action::AccountTextSign),
    command("account-send-coin", "Transfer coins from current account to another account", Action::AccountSendCoin),
    // node queries
    command("state-account", "Display an account balance and nonce", Action::StateAccount),
    command("status-tx", "Display a transaction status", Action::StatusTx),
    command("help", "Display the available commands", Action::Help),
    command("quit", "Quit this app", Action::Quit),
];

/// Finds the command for an input line and returns it with its parameters.
pub fn dispatch(input: &str) -> Option<(&'static Command, &str)> {
    let input = input.trim_start();
    COMMANDS
        .iter()
        .find(|command| input.starts_with(command.text))
        .map(|command| (command, input[command.text.len()..].trim()))
}

/// Whether the loop should keep going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The interactive wallet session.
pub struct Repl<C, R, W> {
    pub(crate) backend: WalletBackend<C>,
    pub(crate) config: WalletConfig,
    pub(crate) input: R,
    pub(crate) output: W,
}

impl<C: NodeClient, R: BufRead, W: Write> Repl<C, R, W> {
    /// Creates a session reading commands from `input`.
    pub fn new(backend: WalletBackend<C>, config: WalletConfig, input: R, output: W) -> Self {
        Self {
            backend,
            config,
            input,
            output,
        }
    }

    /// Gets the wallet backend.
    pub fn backend(&self) -> &WalletBackend<C> {
        &self.backend
    }

    /// Gets everything written so far.
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Reads and executes commands until `quit` or end of input.
    pub async fn run(&mut self) -> Result<(), WalletError> {
        writeln!(
            self.output,
            "{} Welcome. Using node {}, accounts in {}",
            PRINT_PREFIX,
            self.config.node,
            self.backend.accounts_path().display()
        )?;
        writeln!(self.output, "{} Type `help` for the list of commands.", PRINT_PREFIX)?;

        loop {
            write!(self.output, "{}", PROMPT)?;
            self.output.flush()?;

            let line = match self.read_line()? {
                Some(line) => line,
                None => break,
            };
            if line.is_empty() {
                continue;
            }

            match self.execute(&line).await {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => {
                    warn!("Command `{}` failed: {}", line, e);
                    writeln!(self.output, "{} {}", PRINT_PREFIX, e.to_string().red())?;
                }
            }
        }

        Ok(())
    }

    /// Executes a single input line.
    pub async fn execute(&mut self, line: &str) -> Result<Flow, WalletError> {
        let (command, params) = match dispatch(line) {
            Some(found) => found,
            None => {
                writeln!(self.output, "{} invalid command.", PRINT_PREFIX)?;
                return Ok(Flow::Continue);
            }
        };
        debug!("Executing `{}` with params {:?}", command.text, params);

        match command.action {
            Action::AccountNew => self.create_account(params)?,
            Action::AccountSet => self.choose_account(params)?,
            Action::AccountList => self.list_accounts()?,
            Action::AccountInfo => self.print_account_info().await?,
            Action::AccountSign => self.sign_hex(params)?,
            Action::AccountTextSign => self.sign_text(params)?,
            Action::AccountSendCoin => self.submit_coin_transaction(params).await?,
            Action::StateAccount => self.print_account_state(params).await?,
            Action::StatusTx => self.print_transaction_status(params).await?,
            Action::Help => self.print_help()?,
            Action::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn print_help(&mut self) -> Result<(), WalletError> {
        for command in COMMANDS {
            writeln!(
                self.output,
                "{} {:<20} {}",
                PRINT_PREFIX,
                command.text.bold(),
                command.description
            )?;
        }
        Ok(())
    }

    /// Reads one trimmed line, or `None` at end of input.
    pub(crate) fn read_line(&mut self) -> Result<Option<String>, WalletError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prompts until the operator enters something.
    pub(crate) fn input_not_blank(&mut self, message: &str) -> Result<String, WalletError> {
        loop {
            write!(self.output, "{} {}: ", PRINT_PREFIX, message)?;
            self.output.flush()?;
            match self.read_line()? {
                Some(line) if !line.is_empty() => return Ok(line),
                Some(_) => continue,
                None => return Err(WalletError::InvalidInput("input closed".to_string())),
            }
        }
    }

    /// Uses the command parameters when given, otherwise prompts.
    pub(crate) fn param_or_input(&mut self, params: &str, message: &str) -> Result<String, WalletError> {
        if params.is_empty() {
            self.input_not_blank(message)
        } else {
            Ok(params.to_string())
        }
    }

    /// Gets the current account, letting the operator pick or create one first
    /// when nothing is selected.
    pub(crate) fn current_or_choose(&mut self) -> Result<Account, WalletError> {
        if let Ok(account) = self.backend.current_account() {
            return Ok(account.clone());
        }

        match self.backend.status() {
            SessionStatus::NoAccounts => self.create_account("")?,
            _ => self.choose_account("")?,
        }
        Ok(self.backend.current_account()?.clone())
    }

    /// Selects the account named in `params`, or asks which one to use.
    pub(crate) fn choose_account(&mut self, params: &str) -> Result<(), WalletError> {
        if self.backend.store().is_empty() {
            return self.create_account("");
        }

        let choice = if params.is_empty() {
            writeln!(self.output, "{} Choose an account to load:", PRINT_PREFIX)?;
            for (i, alias) in self.backend.list_accounts().iter().enumerate() {
                writeln!(self.output, "{} {}) {}", PRINT_PREFIX, i + 1, alias)?;
            }
            let choice = self.input_not_blank("Enter a number or alias (0 for none)")?;
            if choice == "0" {
                writeln!(self.output, "{} none selected", PRINT_PREFIX)?;
                return Ok(());
            }
            choice
        } else {
            params.to_string()
        };

        let account = self.backend.select_account(&AccountSelector::parse(&choice))?;
        let (alias, address) = (account.alias().to_string(), account.address());
        writeln!(
            self.output,
            "{} Loaded account alias: `{}`, address: {}",
            PRINT_PREFIX,
            alias.green(),
            address
        )?;
        Ok(())
    }
}
