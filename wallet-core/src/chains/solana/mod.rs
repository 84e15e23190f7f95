// wallet-core/src/chains/solana/mod.rs

//! Solana support
//!
//! Path `m/44'/501'/{index}'/0'`, SLIP-0010 over the BIP-39 seed,
//! ed25519 keypair from the first 32 bytes of the derived key material.

pub mod keypair;

pub use keypair::SolanaKeypair;

use crate::chains::{ChainDeriver, ChainType, KeySource};
use crate::crypto::KeyDeriver;
use crate::error::WalletResult;
use crate::wallet::WalletRecord;

#[derive(Debug, Clone, Copy, Default)]
pub struct SolanaDeriver;

impl ChainDeriver for SolanaDeriver {
    fn chain(&self) -> ChainType {
        ChainType::Solana
    }

    fn derive(&self, source: &KeySource<'_>, index: u32) -> WalletResult<WalletRecord> {
        let path = self.path(index);
        let key = KeyDeriver::derive(source.seed().as_bytes(), &path, self.chain().curve())?;
        let keypair = SolanaKeypair::from_seed(&key.private_key);

        Ok(WalletRecord {
            chain: ChainType::Solana,
            path: key.path,
            public_id: keypair.public_key_base58(),
            private_key: keypair.secret_key_hex().to_string(),
            index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::WalletMnemonic;

    const TEST_MNEMONIC: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    fn source(mnemonic: &WalletMnemonic) -> KeySource<'_> {
        KeySource::new(mnemonic)
    }

    #[test]
    fn test_reference_vector() {
        let mnemonic = WalletMnemonic::from_phrase(TEST_MNEMONIC).unwrap();
        let record = SolanaDeriver.derive(&source(&mnemonic), 0).unwrap();

        assert_eq!(record.chain, ChainType::Solana);
        assert_eq!(record.path, "m/44'/501'/0'/0'");
        assert_eq!(record.index, 0);
        assert_eq!(record.public_id, "HAgk14JpMQLgt6rVgv7cBQFJWFto5Dqxi472uT3DKpqk");
        assert_eq!(record.private_key.len(), 128);
    }

    #[test]
    fn test_private_key_embeds_public_key() {
        let mnemonic = WalletMnemonic::from_phrase(TEST_MNEMONIC).unwrap();
        let record = SolanaDeriver.derive(&source(&mnemonic), 4).unwrap();

        let secret = hex::decode(&record.private_key).unwrap();
        let public = bs58::decode(&record.public_id).into_vec().unwrap();
        assert_eq!(&secret[32..], &public[..]);

        let seed: [u8; 32] = secret[..32].try_into().unwrap();
        assert_eq!(SolanaKeypair::from_seed(&seed).public_key_base58(), record.public_id);
    }

    #[test]
    fn test_deterministic_and_unique() {
        let mnemonic = WalletMnemonic::from_phrase(TEST_MNEMONIC).unwrap();
        let src = source(&mnemonic);

        let a = SolanaDeriver.derive(&src, 0).unwrap();
        let b = SolanaDeriver.derive(&src, 0).unwrap();
        assert_eq!(a, b);

        let c = SolanaDeriver.derive(&src, 1).unwrap();
        assert_ne!(a.public_id, c.public_id);
        assert_ne!(a.private_key, c.private_key);
        assert_eq!(c.path, "m/44'/501'/1'/0'");
    }

    #[test]
    fn test_index_out_of_hardened_range_fails() {
        let mnemonic = WalletMnemonic::from_phrase(TEST_MNEMONIC).unwrap();
        assert!(SolanaDeriver.derive(&source(&mnemonic), 0x8000_0000).is_err());
    }
}
