// wallet-core/src/chains/solana/keypair.rs
//
// Solana keypair: ed25519 secret (32B) -> public key (32B, base58)
// Secret export follows the Solana 64-byte layout: secret || public

use ed25519_dalek::SigningKey;
use zeroize::Zeroizing;

pub struct SolanaKeypair {
    signing_key: SigningKey,
}

impl std::fmt::Debug for SolanaKeypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolanaKeypair")
            .field("public_key", &self.public_key_base58())
            .finish_non_exhaustive()
    }
}

impl SolanaKeypair {
    /// Expand a 32-byte ed25519 seed into a keypair.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    #[inline]
    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Base58 public key, the Solana account address.
    pub fn public_key_base58(&self) -> String {
        bs58::encode(self.public_key_bytes()).into_string()
    }

    /// Hex of the 64-byte secret key (secret || public).
    pub fn secret_key_hex(&self) -> Zeroizing<String> {
        let bytes = Zeroizing::new(self.signing_key.to_keypair_bytes());
        Zeroizing::new(hex::encode(&bytes[..]))
    }
}
