// wallet-core/src/chains/mod.rs

//! Chain Key Derivers
//!
//! Every supported chain implements [`ChainDeriver`]: same input (the
//! session's mnemonic and seed plus an account index), same output (a
//! [`WalletRecord`]). Callers pick the implementation by [`ChainType`] tag
//! through a [`DeriverSet`] instead of branching on chain specifics.

pub mod evm;
pub mod solana;

pub use evm::EthereumDeriver;
pub use solana::SolanaDeriver;

use crate::crypto::{CurveType, DerivationPaths, Seed, WalletMnemonic};
use crate::error::WalletResult;
use crate::wallet::WalletRecord;
use serde::{Deserialize, Serialize};

/// Closed set of chains the wallet derives keys for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainType {
    Solana,
    Ethereum,
}

impl ChainType {
    /// Batch order: Solana first, then Ethereum.
    pub const ALL: [ChainType; 2] = [ChainType::Solana, ChainType::Ethereum];

    pub const fn as_str(self) -> &'static str {
        match self {
            ChainType::Solana => "solana",
            ChainType::Ethereum => "ethereum",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ChainType::Solana => "Solana",
            ChainType::Ethereum => "Ethereum",
        }
    }

    pub const fn curve(self) -> CurveType {
        match self {
            ChainType::Solana => CurveType::Ed25519,
            ChainType::Ethereum => CurveType::Secp256k1,
        }
    }
}

impl std::fmt::Display for ChainType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ChainType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solana" | "sol" => Ok(ChainType::Solana),
            "ethereum" | "eth" => Ok(ChainType::Ethereum),
            other => Err(format!("unknown chain '{}'", other)),
        }
    }
}

/// Read-only key material shared by every deriver in one request.
///
/// The seed is computed once here and dropped (zeroized) with the source.
pub struct KeySource<'a> {
    mnemonic: &'a WalletMnemonic,
    seed: Seed,
}

impl<'a> KeySource<'a> {
    pub fn new(mnemonic: &'a WalletMnemonic) -> Self {
        Self {
            mnemonic,
            seed: Seed::from_mnemonic(mnemonic),
        }
    }

    #[inline]
    pub fn mnemonic(&self) -> &WalletMnemonic {
        self.mnemonic
    }

    #[inline]
    pub fn seed(&self) -> &Seed {
        &self.seed
    }
}

/// One chain's derivation scheme.
pub trait ChainDeriver: Send + Sync {
    fn chain(&self) -> ChainType;

    /// Derivation path for account `index`.
    fn path(&self, index: u32) -> String {
        DerivationPaths::for_chain(self.chain(), index)
    }

    fn derive(&self, source: &KeySource<'_>, index: u32) -> WalletResult<WalletRecord>;
}

/// Derivers keyed by chain tag, in batch order.
pub struct DeriverSet {
    derivers: Vec<Box<dyn ChainDeriver>>,
}

impl DeriverSet {
    /// Solana (SLIP-0010) and Ethereum (BIP-32).
    pub fn standard() -> Self {
        Self {
            derivers: vec![Box::new(SolanaDeriver), Box::new(EthereumDeriver)],
        }
    }

    /// Replace the deriver registered for the same chain, or append it.
    pub fn with(mut self, deriver: Box<dyn ChainDeriver>) -> Self {
        match self
            .derivers
            .iter()
            .position(|d| d.chain() == deriver.chain())
        {
            Some(pos) => self.derivers[pos] = deriver,
            None => self.derivers.push(deriver),
        }
        self
    }

    pub fn get(&self, chain: ChainType) -> Option<&dyn ChainDeriver> {
        self.derivers
            .iter()
            .find(|d| d.chain() == chain)
            .map(|d| d.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn ChainDeriver> {
        self.derivers.iter().map(|d| d.as_ref())
    }
}

impl Default for DeriverSet {
    fn default() -> Self {
        Self::standard()
    }
}
