// wallet-core/src/wallet/record.rs
//
// WalletRecord and its persisted JSON layout.

use crate::chains::ChainType;
use crate::crypto::DerivationPaths;
use crate::error::{StorageError, WalletError, WalletResult};
use serde::{Deserialize, Serialize};

/// One derived wallet: a (chain, account index) pair and its keys.
///
/// `public_id` is the base58 public key on Solana and the EIP-55 address on
/// Ethereum. `private_key` is hex (64-byte keypair on Solana, `0x`-prefixed
/// 32-byte secret on Ethereum).
#[derive(Clone, PartialEq, Eq)]
pub struct WalletRecord {
    pub chain: ChainType,
    pub path: String,
    pub public_id: String,
    pub private_key: String,
    pub index: u32,
}

impl std::fmt::Debug for WalletRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletRecord")
            .field("chain", &self.chain)
            .field("path", &self.path)
            .field("public_id", &self.public_id)
            .field("private_key", &"[REDACTED]")
            .field("index", &self.index)
            .finish()
    }
}

/// Stored form of a [`WalletRecord`].
///
/// Written as `{"type", "publicKey" | "address", "privateKey", "path", "index"}`.
/// Older sessions may say `chain` instead of `type` and omit `index`; the
/// index is then recovered from the path.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredWallet {
    #[serde(rename = "type", alias = "chain")]
    chain: ChainType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    public_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    address: Option<String>,
    private_key: String,
    path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    index: Option<u32>,
}

impl From<&WalletRecord> for StoredWallet {
    fn from(record: &WalletRecord) -> Self {
        let (public_key, address) = match record.chain {
            ChainType::Solana => (Some(record.public_id.clone()), None),
            ChainType::Ethereum => (None, Some(record.public_id.clone())),
        };
        StoredWallet {
            chain: record.chain,
            public_key,
            address,
            private_key: record.private_key.clone(),
            path: record.path.clone(),
            index: Some(record.index),
        }
    }
}

impl TryFrom<StoredWallet> for WalletRecord {
    type Error = String;

    fn try_from(stored: StoredWallet) -> Result<Self, Self::Error> {
        let public_id = stored
            .public_key
            .or(stored.address)
            .ok_or_else(|| format!("{} wallet without a public key", stored.chain))?;

        let index = match stored.index {
            Some(index) => index,
            None => DerivationPaths::account_index(stored.chain, &stored.path)
                .ok_or_else(|| format!("cannot recover index from path '{}'", stored.path))?,
        };

        Ok(WalletRecord {
            chain: stored.chain,
            path: stored.path,
            public_id,
            private_key: stored.private_key,
            index,
        })
    }
}

/// Serialize records as the JSON array kept under `key`.
pub fn encode_wallets(key: &str, wallets: &[WalletRecord]) -> WalletResult<String> {
    let stored = wallets.iter().map(StoredWallet::from).collect::<Vec<_>>();
    serde_json::to_string(&stored).map_err(|e| {
        WalletError::Storage(StorageError::Write {
            key: key.to_string(),
            reason: e.to_string(),
        })
    })
}

/// Parse the JSON array kept under `key`.
pub fn decode_wallets(key: &str, json: &str) -> WalletResult<Vec<WalletRecord>> {
    let corrupted = |reason: String| {
        WalletError::Storage(StorageError::Corrupted {
            key: key.to_string(),
            reason,
        })
    };

    let stored: Vec<StoredWallet> =
        serde_json::from_str(json).map_err(|e| corrupted(e.to_string()))?;

    stored
        .into_iter()
        .map(|s| WalletRecord::try_from(s).map_err(corrupted))
        .collect()
}
