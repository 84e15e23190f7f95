// wallet-core/src/crypto/mod.rs

//! Core Cryptography Module
//!
//! - **Mnemonic**: BIP-39 phrase generation and validation via [`WalletMnemonic`].
//! - **Seed**: PBKDF2 seed derivation via [`Seed`].
//! - **Key Derivation**: secp256k1 (BIP-32) and ed25519 (SLIP-0010) via [`KeyDeriver`].
//! - **Derivation Paths**: per-chain path templates via [`DerivationPaths`].

pub mod key_deriver;
pub mod mnemonic;
pub mod paths;
pub mod seed;

pub use key_deriver::{CurveType, DerivedKey, KeyDeriver};
pub use mnemonic::{EntropyBits, WalletMnemonic};
pub use paths::DerivationPaths;
pub use seed::Seed;
