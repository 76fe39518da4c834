//! Interactive CLI wallet.

use anyhow::Result;
use cli::{Repl, WalletBackend, WalletConfig};
use colored::Colorize;
use std::path::PathBuf;
use structopt::StructOpt;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use wallet_network::RpcNodeClient;

/// Command line arguments for the CLI wallet.
#[derive(Debug, StructOpt)]
#[structopt(name = "wallet", about = "Local account wallet")]
struct Opt {
    /// Path to the configuration file, written with defaults when missing
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// Directory holding the accounts file
    #[structopt(short, long, parse(from_os_str))]
    data_dir: Option<PathBuf>,

    /// Node to connect to
    #[structopt(short, long)]
    node: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse command line arguments
    let opt = Opt::from_args();

    // Load configuration
    let mut config = match &opt.config {
        Some(path) => WalletConfig::load_or_init(path)?,
        None => WalletConfig::default(),
    };

    // Override node and data directory if specified
    if let Some(node) = opt.node {
        config.node = node;
    }
    if let Some(data_dir) = opt.data_dir {
        config.data_dir = data_dir;
    }
    info!("Using data directory {}", config.data_dir.display());

    let client = RpcNodeClient::new(&config.node, config.request_timeout())?;
    let (backend, load_error) =
        WalletBackend::open(&config.data_dir, client, config.request_timeout());
    if let Some(e) = load_error {
        println!("{} {}", "Cannot load accounts:".red(), e);
        println!(
            "{}",
            "Starting with no accounts. The file is moved aside when a new account is saved."
                .yellow()
        );
    }

    let stdin = std::io::stdin();
    let mut repl = Repl::new(backend, config, stdin.lock(), std::io::stdout());
    repl.run().await?;

    Ok(())
}
