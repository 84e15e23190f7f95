// wallet-core/src/api.rs
//
// Flat entry points for bindings that prefer owned arguments over the
// service types.

use crate::chains::{ChainType, DeriverSet, KeySource};
use crate::config::WalletConfig;
use crate::crypto::{EntropyBits, Seed, WalletMnemonic};
use crate::error::{CryptoError, WalletResult};
use crate::logging;
use crate::service::WalletService;
use crate::wallet::{FileBackend, KeyValueSessionStore, WalletRecord};

pub type FileWalletService = WalletService<KeyValueSessionStore<FileBackend>>;

// Core Initialization
pub fn init_core(config: &WalletConfig) -> WalletResult<()> {
    logging::init(&config.log_filter)
}

/// Service persisting to `config.storage_dir`, with any saved session restored.
pub fn open_file_service(config: &WalletConfig) -> WalletResult<FileWalletService> {
    let store = KeyValueSessionStore::new(FileBackend::new(config.storage_dir.clone()));
    WalletService::open(store, config)
}

// --- Key Management ---

pub fn generate_mnemonic(entropy_bits: u32) -> WalletResult<String> {
    let mnemonic = WalletMnemonic::generate(EntropyBits::from_bits(entropy_bits)?)?;
    Ok(mnemonic.phrase().to_string())
}

pub fn validate_mnemonic(phrase: String) -> bool {
    WalletMnemonic::validate(&phrase)
}

pub fn derive_seed_hex(phrase: String) -> WalletResult<String> {
    let mnemonic = WalletMnemonic::from_phrase(&phrase)?;
    Ok(Seed::from_mnemonic(&mnemonic).to_hex().to_string())
}

/// One wallet for `chain` at account `index`, outside any session.
pub fn derive_wallet(phrase: String, chain: ChainType, index: u32) -> WalletResult<WalletRecord> {
    let mnemonic = WalletMnemonic::from_phrase(&phrase)?;
    let derivers = DeriverSet::standard();
    let deriver = derivers.get(chain).ok_or_else(|| {
        CryptoError::DerivationFailed(format!("no deriver registered for {}", chain))
    })?;
    deriver.derive(&KeySource::new(&mnemonic), index)
}
