//! Multi-chain HD wallet core
//!
//! Derives Solana and Ethereum wallets from one BIP-39 recovery phrase and
//! keeps them in a persisted, ordered registry:
//! - Mnemonic generation/validation and seed derivation ([`crypto`])
//! - Per-chain key derivation behind one trait ([`chains`])
//! - Wallet registry with key/value persistence ([`wallet`])
//! - User-facing actions and notices ([`service`])

pub mod api;
pub mod chains;
pub mod config;
pub mod crypto;
pub mod error;
pub mod logging;
pub mod service;
pub mod wallet;

pub use chains::{ChainDeriver, ChainType, DeriverSet, KeySource};
pub use config::WalletConfig;
pub use crypto::{EntropyBits, Seed, WalletMnemonic};
pub use error::{WalletError, WalletResult};
pub use service::{BatchReport, Clipboard, Notice, NoticeLevel, WalletService};
pub use wallet::{SessionState, SessionStore, WalletRecord, WalletRegistry};
