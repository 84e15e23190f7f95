use crate::chains::ChainType;
use thiserror::Error;

pub type WalletResult<T> = std::result::Result<T, WalletError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WalletError {
    #[error("Mnemonic Error: {0}")]
    Mnemonic(#[from] MnemonicError),

    #[error("Cryptography Error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Storage Error: {0}")]
    Storage(#[from] StorageError),

    #[error("Error generating {chain} wallet: {source}")]
    ChainDerivation {
        chain: ChainType,
        #[source]
        source: Box<WalletError>,
    },

    #[error("Failed to generate any wallets")]
    GenerationFailed(Vec<WalletError>),

    #[error("A {chain} wallet with index {index} already exists")]
    DuplicateWallet { chain: ChainType, index: u32 },

    #[error("No wallet session: generate or import a recovery phrase first")]
    NoSession,

    #[error("No wallet at position {position} (registry holds {len})")]
    PositionOutOfRange { position: usize, len: usize },

    #[error("Clipboard Error: {0}")]
    Clipboard(String),

    #[error("Configuration Error: {0}")]
    Config(String),
}

impl WalletError {
    /// Wrap a derivation error so it names the chain that failed.
    pub fn for_chain(chain: ChainType, source: WalletError) -> Self {
        WalletError::ChainDerivation {
            chain,
            source: Box::new(source),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MnemonicError {
    #[error("Invalid word count: {0}. Expected 12, 15, 18, 21 or 24 words.")]
    InvalidWordCount(usize),

    #[error("Word '{0}' not found in the BIP39 wordlist.")]
    UnknownWord(String),

    #[error("Checksum validation failed.")]
    ChecksumFailed,

    #[error("Unsupported entropy size: {0} bits. Expected 128 or 256.")]
    UnsupportedEntropy(u32),

    #[error("BIP39 internal error: {0}")]
    Bip39Error(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Key derivation failed: {0}")]
    DerivationFailed(String),

    #[error("Invalid key format: {0}")]
    InvalidKeyFormat(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Failed to read '{key}': {reason}")]
    Read { key: String, reason: String },

    #[error("Failed to write '{key}': {reason}")]
    Write { key: String, reason: String },

    #[error("Corrupted session data under '{key}': {reason}")]
    Corrupted { key: String, reason: String },
}
