// wallet-core/src/config.rs
//
// Runtime configuration, read from TOML.

use crate::crypto::EntropyBits;
use crate::error::{WalletError, WalletResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletConfig {
    /// Entropy of generated phrases: 128 (12 words) or 256 (24 words).
    #[serde(default = "default_entropy_bits")]
    pub entropy_bits: u32,

    /// Directory the file backend keeps the session in.
    #[serde(default = "default_storage_dir")]
    pub storage_dir: PathBuf,

    /// Default tracing filter, overridden by `RUST_LOG`.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Show private keys unmasked at startup.
    #[serde(default)]
    pub reveal_secrets: bool,
}

fn default_entropy_bits() -> u32 {
    EntropyBits::default().bits()
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from(".multichain-wallet")
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for WalletConfig {
    fn default() -> Self {
        WalletConfig {
            entropy_bits: default_entropy_bits(),
            storage_dir: default_storage_dir(),
            log_filter: default_log_filter(),
            reveal_secrets: false,
        }
    }
}

impl WalletConfig {
    /// Read `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> WalletResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            WalletError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> WalletResult<Self> {
        let config: WalletConfig = toml::from_str(content)
            .map_err(|e| WalletError::Config(format!("Failed to parse config: {}", e)))?;
        config.entropy()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> WalletResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| WalletError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            WalletError::Config(format!("Failed to write {}: {}", path.display(), e))
        })
    }

    pub fn entropy(&self) -> WalletResult<EntropyBits> {
        EntropyBits::from_bits(self.entropy_bits)
            .map_err(|e| WalletError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WalletConfig::default();
        assert_eq!(config.entropy_bits, 256);
        assert_eq!(config.storage_dir, PathBuf::from(".multichain-wallet"));
        assert_eq!(config.log_filter, "info");
        assert!(!config.reveal_secrets);
        assert_eq!(config.entropy().unwrap(), EntropyBits::Bits256);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config = WalletConfig::from_toml("entropy_bits = 128\n").unwrap();
        assert_eq!(config.entropy().unwrap(), EntropyBits::Bits128);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_rejects_unsupported_entropy() {
        assert!(matches!(
            WalletConfig::from_toml("entropy_bits = 192\n"),
            Err(WalletError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            WalletConfig::from_toml("entropy_bits = \"lots\""),
            Err(WalletError::Config(_))
        ));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = WalletConfig::load(Path::new("/nonexistent/wallet.toml")).unwrap();
        assert_eq!(config, WalletConfig::default());
    }
}
