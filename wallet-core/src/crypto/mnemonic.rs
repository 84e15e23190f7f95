// wallet-core/src/crypto/mnemonic.rs
//
// Mnemonic Provider - BIP-39 generation and validation
// Standard: BIP-39 (English wordlist, SHA-256 checksum)

use crate::error::{MnemonicError, WalletError, WalletResult};
use bip39::{Language, Mnemonic};
use rand::{rngs::OsRng, RngCore};
use zeroize::{Zeroize, Zeroizing};

/// Entropy sizes the wallet can generate a phrase from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntropyBits {
    /// 128 bits, 12 words
    Bits128,
    /// 256 bits, 24 words
    #[default]
    Bits256,
}

impl EntropyBits {
    pub fn from_bits(bits: u32) -> WalletResult<Self> {
        match bits {
            128 => Ok(EntropyBits::Bits128),
            256 => Ok(EntropyBits::Bits256),
            other => Err(WalletError::Mnemonic(MnemonicError::UnsupportedEntropy(
                other,
            ))),
        }
    }

    #[inline]
    pub const fn bits(self) -> u32 {
        match self {
            EntropyBits::Bits128 => 128,
            EntropyBits::Bits256 => 256,
        }
    }

    #[inline]
    pub const fn entropy_bytes(self) -> usize {
        self.bits() as usize / 8
    }

    #[inline]
    pub const fn word_count(self) -> usize {
        match self {
            EntropyBits::Bits128 => 12,
            EntropyBits::Bits256 => 24,
        }
    }
}

/// BIP-39 recovery phrase, the single secret every wallet key is derived from.
///
/// # Security
/// - **CSPRNG**: entropy comes from `OsRng`
/// - **No Debug Leak**: `Debug` only prints the word count
/// - Entropy buffers are zeroized right after encoding
#[derive(Clone, PartialEq, Eq)]
pub struct WalletMnemonic {
    inner: Mnemonic,
}

impl std::fmt::Debug for WalletMnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletMnemonic")
            .field("word_count", &self.word_count())
            .field("phrase", &"[REDACTED]")
            .finish()
    }
}

impl WalletMnemonic {
    // =========================================================================
    // CONSTRUCTORS
    // =========================================================================

    /// Generate a fresh phrase with the requested entropy.
    pub fn generate(strength: EntropyBits) -> WalletResult<Self> {
        let size = strength.entropy_bytes();

        let mut entropy = [0u8; 32];
        OsRng.fill_bytes(&mut entropy[..size]);

        let result = Mnemonic::from_entropy_in(Language::English, &entropy[..size]);
        entropy.zeroize();

        let inner = result.map_err(Self::map_bip39_error)?;
        Ok(Self { inner })
    }

    /// Restore a phrase typed or pasted by the user.
    ///
    /// Whitespace is normalized before parsing; word count, wordlist
    /// membership and checksum are all checked.
    pub fn from_phrase(phrase: &str) -> WalletResult<Self> {
        let words = phrase.split_whitespace().collect::<Vec<_>>();
        let count = words.len();

        if !matches!(count, 12 | 15 | 18 | 21 | 24) {
            return Err(WalletError::Mnemonic(MnemonicError::InvalidWordCount(
                count,
            )));
        }

        let normalized = Zeroizing::new(words.join(" ").to_lowercase());
        let inner = Mnemonic::parse_in_normalized(Language::English, &normalized)
            .map_err(|e| match e {
                bip39::Error::UnknownWord(idx) => WalletError::Mnemonic(
                    MnemonicError::UnknownWord(words.get(idx).unwrap_or(&"").to_string()),
                ),
                other => Self::map_bip39_error(other),
            })?;

        Ok(Self { inner })
    }

    fn map_bip39_error(err: bip39::Error) -> WalletError {
        match err {
            bip39::Error::BadWordCount(n) => {
                WalletError::Mnemonic(MnemonicError::InvalidWordCount(n))
            }
            bip39::Error::InvalidChecksum => WalletError::Mnemonic(MnemonicError::ChecksumFailed),
            other => WalletError::Mnemonic(MnemonicError::Bip39Error(other.to_string())),
        }
    }

    // =========================================================================
    // VALIDATION
    // =========================================================================

    /// True iff `candidate` is a well-formed, checksum-valid phrase.
    #[inline]
    pub fn validate(candidate: &str) -> bool {
        Self::from_phrase(candidate).is_ok()
    }

    // =========================================================================
    // GETTERS
    // =========================================================================

    /// Space-separated phrase.
    ///
    /// # Warning
    /// This is the wallet secret. Never log it.
    pub fn phrase(&self) -> Zeroizing<String> {
        Zeroizing::new(self.inner.to_string())
    }

    #[inline]
    pub fn word_count(&self) -> usize {
        self.inner.word_count()
    }

    pub(crate) fn inner(&self) -> &Mnemonic {
        &self.inner
    }
}
