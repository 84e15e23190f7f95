// wallet-core/src/wallet/mod.rs

//! Wallet Registry and session persistence
//!
//! - [`WalletRecord`]: one derived wallet and its stored JSON form.
//! - [`WalletRegistry`]: ordered records, per-chain index counters, mirrored
//!   to a [`SessionStore`] after every mutation.
//! - [`KeyValueSessionStore`] over [`MemoryBackend`] or [`FileBackend`].

pub mod record;
pub mod registry;
pub mod storage;

pub use record::WalletRecord;
pub use registry::WalletRegistry;
pub use storage::{
    FileBackend, KeyValueBackend, KeyValueSessionStore, MemoryBackend, SessionState,
    SessionStore, MNEMONIC_KEY, WALLETS_KEY,
};
