// wallet-core/src/chains/evm/address.rs
//
// EVM Address Derivation
// EIP-55 (Checksum), Keccak-256, secp256k1

use crate::error::{CryptoError, WalletError, WalletResult};
use alloy_primitives::Address;
use k256::{elliptic_curve::sec1::ToEncodedPoint, SecretKey};
use tiny_keccak::{Hasher, Keccak};
use zeroize::{Zeroize, Zeroizing};

/// EVM Address Generator
///
/// # Flow:  Private Key (32B) -> Public Key (64B) -> Keccak256 -> Address (20B)
///
/// Intermediate buffers (encoded public key, hash) are zeroized after use and
/// the private key is never stored.
pub struct EvmAddress;

impl EvmAddress {
    /// Derive the 20 address bytes from a private key.
    ///
    /// 1. `priv_key` (32B) -> secp256k1 -> `pub_key` (uncompressed, 65B)
    /// 2. Drop the 0x04 prefix -> 64B
    /// 3. Keccak-256 -> 32B
    /// 4. `hash[12..32]` -> address
    pub fn derive_bytes(priv_key: &[u8]) -> WalletResult<[u8; 20]> {
        let secret_key = SecretKey::from_slice(priv_key).map_err(|e| {
            WalletError::Crypto(CryptoError::InvalidKeyFormat(format!(
                "Invalid secp256k1 private key: {}",
                e
            )))
        })?;

        let public_key = secret_key.public_key();
        let encoded = Zeroizing::new(public_key.to_encoded_point(false));
        let pub_key_raw = &encoded.as_bytes()[1..];

        let mut hasher = Keccak::v256();
        let mut hash = [0u8; 32];
        hasher.update(pub_key_raw);
        hasher.finalize(&mut hash);

        let mut address = [0u8; 20];
        address.copy_from_slice(&hash[12..]);
        hash.zeroize();

        Ok(address)
    }

    /// EIP-55 checksummed address, e.g. `"0x9858EfFD232B4033E47d90003D41EC34EcaEda94"`.
    #[inline]
    pub fn derive(priv_key: &[u8]) -> WalletResult<String> {
        let bytes = Self::derive_bytes(priv_key)?;
        Ok(Address::from_slice(&bytes).to_checksum(None))
    }
}
