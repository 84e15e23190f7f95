// wallet-core/src/crypto/seed.rs
//
// Seed Deriver - BIP-39 PBKDF2-HMAC-SHA512 (2048 rounds, salt "mnemonic")

use crate::crypto::mnemonic::WalletMnemonic;
use zeroize::Zeroizing;

/// 64-byte BIP-39 seed, zeroized on drop.
///
/// Derived on demand from the mnemonic and never persisted. The wallet does
/// not expose a BIP-39 passphrase, so the seed is always computed with "".
pub struct Seed(Zeroizing<[u8; 64]>);

impl Seed {
    pub const LEN: usize = 64;

    pub fn from_mnemonic(mnemonic: &WalletMnemonic) -> Self {
        Seed(Zeroizing::new(mnemonic.inner().to_seed_normalized("")))
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0[..]
    }

    /// Lower-case hex, the form SLIP-0010 tooling usually takes the seed in.
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(&self.0[..]))
    }
}

impl std::fmt::Debug for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Seed([REDACTED])")
    }
}
