// wallet-core/src/chains/evm/mod.rs

//! Ethereum support
//!
//! Path `m/44'/60'/0'/0/{index}`. The HD root is built from the mnemonic
//! (BIP-39 seed, empty passphrase) and walked with BIP-32; the address is
//! the EIP-55 checksummed form via [`EvmAddress`].

pub mod address;

pub use address::EvmAddress;

use crate::chains::{ChainDeriver, ChainType, KeySource};
use crate::crypto::KeyDeriver;
use crate::error::WalletResult;
use crate::wallet::WalletRecord;

#[derive(Debug, Clone, Copy, Default)]
pub struct EthereumDeriver;

impl ChainDeriver for EthereumDeriver {
    fn chain(&self) -> ChainType {
        ChainType::Ethereum
    }

    fn derive(&self, source: &KeySource<'_>, index: u32) -> WalletResult<WalletRecord> {
        let path = self.path(index);

        let key = KeyDeriver::derive(source.seed().as_bytes(), &path, self.chain().curve())?;
        let address = EvmAddress::derive(&key.private_key[..])?;

        Ok(WalletRecord {
            chain: ChainType::Ethereum,
            path: key.path,
            public_id: address,
            private_key: format!("0x{}", hex::encode(&key.private_key[..])),
            index,
        })
    }
}
