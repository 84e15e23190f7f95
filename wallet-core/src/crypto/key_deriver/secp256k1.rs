// wallet-core/src/crypto/key_deriver/secp256k1.rs
//
// secp256k1 Key Derivation - BIP-32 / BIP-44
//
// Used for: Ethereum
// Algorithm: HMAC-SHA512 hierarchical deterministic derivation
// Reference: https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki

use crate::error::{CryptoError, WalletError, WalletResult};
use bip32::{DerivationPath, XPrv};
use std::str::FromStr;
use zeroize::Zeroizing;

/// secp256k1 Key Deriver - BIP-32
///
/// Private keys come back in `Zeroizing<[u8; 32]>`; intermediate extended
/// keys are dropped (and zeroized by `bip32`) as soon as the walk finishes.
pub struct Secp256k1Deriver;

impl Secp256k1Deriver {
    /// Derive the private key at `path` (e.g. `"m/44'/60'/0'/0/0"`) from `seed`.
    pub fn derive(seed: &[u8], path: &str) -> WalletResult<Zeroizing<[u8; 32]>> {
        let derivation_path = DerivationPath::from_str(path.trim()).map_err(|e| {
            WalletError::Crypto(CryptoError::DerivationFailed(format!(
                "Invalid path '{}': {}",
                path, e
            )))
        })?;

        let child = XPrv::derive_from_path(seed, &derivation_path).map_err(|e| {
            WalletError::Crypto(CryptoError::DerivationFailed(format!(
                "Child derivation failed: {}",
                e
            )))
        })?;

        let key_bytes: [u8; 32] = child.private_key().to_bytes().into();
        Ok(Zeroizing::new(key_bytes))
    }
}
