// wallet-core/src/crypto/key_deriver/ed25519.rs
//
// Ed25519 Key Derivation - SLIP-0010
//
// Used for: Solana
// Algorithm: HMAC-SHA512, hardened child derivation only
// Reference: https://github.com/satoshilabs/slips/blob/master/slip-0010.md
//
// SLIP-0010 for ed25519 ONLY supports hardened children.
// e.g. m/44'/501'/0'/0' (OK)    m/44'/501'/0'/0 (INVALID)

use crate::error::{CryptoError, WalletError, WalletResult};
use hmac::{Hmac, Mac};
use sha2::Sha512;
use zeroize::{Zeroize, Zeroizing};

type HmacSha512 = Hmac<Sha512>;

/// Ed25519 Key Deriver - SLIP-0010
///
/// # Differences from secp256k1 (BIP-32)
/// - Master key HMAC key: "ed25519 seed" (instead of "Bitcoin seed")
/// - Hardened derivation only (index >= 2^31)
/// - Any 32 bytes form a valid ed25519 secret, no range check needed
pub struct Ed25519Deriver;

impl Ed25519Deriver {
    const MASTER_SECRET: &'static [u8] = b"ed25519 seed";
    const HARDENED_OFFSET: u32 = 0x8000_0000;

    /// Derive a 32-byte ed25519 secret from `seed` along `path`.
    ///
    /// Every level of `path` must be hardened, e.g. `"m/44'/501'/0'/0'"`.
    pub fn derive(seed: &[u8], path: &str) -> WalletResult<Zeroizing<[u8; 32]>> {
        let indices = Self::parse_path(path)?;

        // I = HMAC-SHA512(Key = "ed25519 seed", Data = seed)
        let (mut key, mut chain_code) = Self::hmac_split(Self::MASTER_SECRET, &[seed])?;

        // I = HMAC-SHA512(Key = chain_code, Data = 0x00 || key || ser32(index))
        for index in indices {
            let hardened = (index | Self::HARDENED_OFFSET).to_be_bytes();
            let (child_key, child_chain) =
                Self::hmac_split(&chain_code, &[&[0x00u8][..], &key[..], &hardened[..]])?;
            key.zeroize();
            chain_code.zeroize();
            key = child_key;
            chain_code = child_chain;
        }

        chain_code.zeroize();
        Ok(Zeroizing::new(key))
    }

    /// HMAC-SHA512 over `parts`, split into (IL, IR).
    fn hmac_split(key: &[u8], parts: &[&[u8]]) -> WalletResult<([u8; 32], [u8; 32])> {
        let mut mac = HmacSha512::new_from_slice(key).map_err(|e| {
            WalletError::Crypto(CryptoError::DerivationFailed(format!(
                "HMAC init failed: {}",
                e
            )))
        })?;
        for part in parts {
            mac.update(part);
        }
        let result = mac.finalize().into_bytes();

        let mut buf = [0u8; 64];
        buf.copy_from_slice(&result);

        let mut il = [0u8; 32];
        let mut ir = [0u8; 32];
        il.copy_from_slice(&buf[..32]);
        ir.copy_from_slice(&buf[32..]);
        buf.zeroize();

        Ok((il, ir))
    }

    /// `"m/44'/501'/0'/0'"` -> `[44, 501, 0, 0]`
    ///
    /// Accepts `'` or `h` as the hardened marker; rejects anything unhardened.
    fn parse_path(path: &str) -> WalletResult<Vec<u32>> {
        let path = path.trim();

        let segments = path.strip_prefix("m/").ok_or_else(|| {
            WalletError::Crypto(CryptoError::DerivationFailed(format!(
                "Path must start with 'm/': {}",
                path
            )))
        })?;

        if segments.is_empty() {
            return Err(WalletError::Crypto(CryptoError::DerivationFailed(
                "Empty derivation path".to_string(),
            )));
        }

        let mut indices = Vec::new();
        for segment in segments.split('/') {
            let segment = segment.trim();

            let num_str = segment
                .strip_suffix('\'')
                .or_else(|| segment.strip_suffix('h'))
                .ok_or_else(|| {
                    WalletError::Crypto(CryptoError::DerivationFailed(format!(
                        "Ed25519 SLIP-0010 requires ALL levels to be hardened. Invalid segment: '{}'",
                        segment
                    )))
                })?;

            let index: u32 = num_str.parse().map_err(|e| {
                WalletError::Crypto(CryptoError::DerivationFailed(format!(
                    "Invalid index '{}': {}",
                    num_str, e
                )))
            })?;
            if index >= Self::HARDENED_OFFSET {
                return Err(WalletError::Crypto(CryptoError::DerivationFailed(format!(
                    "Index out of range: {}",
                    index
                ))));
            }

            indices.push(index);
        }

        Ok(indices)
    }
}
