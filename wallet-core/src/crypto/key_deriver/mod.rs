// wallet-core/src/crypto/key_deriver/mod.rs
//
// Key Derivation Engine - Multi-Curve Support
//
// ┌─────────────────────────────────────────────────┐
// │  Seed (64 bytes from BIP-39 Mnemonic)           │
// │                    │                            │
// │     ┌──────────────┴──────────────┐             │
// │     ▼                             ▼             │
// │  secp256k1 (BIP-32)        ed25519 (SLIP-0010)  │
// │  └─ Ethereum               └─ Solana            │
// └─────────────────────────────────────────────────┘

pub mod ed25519;
pub mod secp256k1;

pub use ed25519::Ed25519Deriver;
pub use secp256k1::Secp256k1Deriver;

use crate::error::{CryptoError, WalletError, WalletResult};
use zeroize::Zeroizing;

/// Curve type for key derivation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveType {
    /// secp256k1 - Ethereum
    Secp256k1,
    /// Ed25519 - Solana
    Ed25519,
}

/// Derivation output: 32 bytes of private key material plus metadata
#[derive(Debug)]
pub struct DerivedKey {
    /// Private key bytes (auto-zeroize on drop)
    pub private_key: Zeroizing<[u8; 32]>,
    pub curve: CurveType,
    pub path: String,
}

/// Unified entry point, dispatching on the curve.
pub struct KeyDeriver;

impl KeyDeriver {
    /// Derive the key at `path` from a 64-byte BIP-39 seed.
    pub fn derive(seed: &[u8], path: &str, curve: CurveType) -> WalletResult<DerivedKey> {
        Self::validate_seed(seed)?;

        let private_key = match curve {
            CurveType::Secp256k1 => Secp256k1Deriver::derive(seed, path)?,
            CurveType::Ed25519 => Ed25519Deriver::derive(seed, path)?,
        };

        Ok(DerivedKey {
            private_key,
            curve,
            path: path.to_string(),
        })
    }

    #[inline]
    fn validate_seed(seed: &[u8]) -> WalletResult<()> {
        if seed.len() != 64 {
            return Err(WalletError::Crypto(CryptoError::DerivationFailed(format!(
                "Invalid seed length: expected 64 bytes, got {}",
                seed.len()
            ))));
        }
        Ok(())
    }
}
