//! Configuration for the CLI wallet.

use crate::errors::WalletError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Configuration for the CLI wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// The node to connect to
    pub node: String,
    /// Directory holding the accounts file
    pub data_dir: PathBuf,
    /// The gas price offered when none is given
    pub gas_price: u64,
    /// The gas limit used when none is given
    pub gas_limit: u64,
    /// Seconds to wait for any node request, submission included
    pub request_timeout_secs: u64,
}

impl Default for WalletConfig {
    fn default() -> Self {
        let mut data_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        data_dir.push("cli-wallet");

        Self {
            node: "http://localhost:9092".to_string(),
            data_dir,
            gas_price: 1,
            gas_limit: 100,
            request_timeout_secs: 10,
        }
    }
}

impl WalletConfig {
    /// Loads configuration from a file. Missing keys take their default value.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, WalletError> {
        let mut file = File::open(path.as_ref()).map_err(|e| {
            WalletError::ConfigError(format!("{}: {}", path.as_ref().display(), e))
        })?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        serde_json::from_str(&contents).map_err(|e| {
            WalletError::ConfigError(format!("{}: {}", path.as_ref().display(), e))
        })
    }

    /// Saves configuration to a file, creating its directory if needed.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), WalletError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| WalletError::ConfigError(e.to_string()))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Loads configuration from a file, writing the defaults there first when
    /// the file does not exist yet.
    pub fn load_or_init<P: AsRef<Path>>(path: P) -> Result<Self, WalletError> {
        let path = path.as_ref();
        if path.exists() {
            return Self::from_file(path);
        }

        let config = Self::default();
        config.to_file(path)?;
        info!("Wrote default configuration to {}", path.display());
        Ok(config)
    }

    /// Gets the request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
