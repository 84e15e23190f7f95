// wallet-core/src/crypto/paths.rs
//
// Derivation Paths - BIP-44 (purpose), SLIP-44 (coin types), SLIP-0010 (ed25519)

use crate::chains::ChainType;

/// SLIP-44 registered coin types
/// Ref: https://github.com/satoshilabs/slips/blob/master/slip-0044.md
pub mod coin_type {
    pub const ETHEREUM: u32 = 60;
    pub const SOLANA: u32 = 501;
}

/// Path templates for the supported chains.
///
/// # Conventions
/// - BIP-44: `m/44'/60'/0'/0/{index}` (secp256k1, account index is the last, non-hardened level)
/// - SLIP-0010: `m/44'/501'/{index}'/0'` (ed25519, every level hardened)
pub struct DerivationPaths;

impl DerivationPaths {
    // =========================================================================
    // EVM (secp256k1), coin_type = 60
    // =========================================================================
    pub const EVM_0: &'static str = "m/44'/60'/0'/0/0";

    #[inline]
    pub fn evm(index: u32) -> String {
        Self::bip44(44, coin_type::ETHEREUM, 0, 0, index)
    }

    // =========================================================================
    // SOLANA (ed25519), SLIP-0010, all levels hardened
    // =========================================================================
    pub const SOLANA_0: &'static str = "m/44'/501'/0'/0'";

    #[inline]
    pub fn solana(account: u32) -> String {
        Self::ed25519_path(coin_type::SOLANA, account, &[0])
    }

    /// Path for `chain` at account `index`.
    pub fn for_chain(chain: ChainType, index: u32) -> String {
        match chain {
            ChainType::Solana => Self::solana(index),
            ChainType::Ethereum => Self::evm(index),
        }
    }

    /// Recover the account index from a path produced by [`for_chain`](Self::for_chain).
    ///
    /// Returns `None` when the path does not follow the chain's template.
    pub fn account_index(chain: ChainType, path: &str) -> Option<u32> {
        let segments = path.trim().strip_prefix("m/")?.split('/').collect::<Vec<_>>();

        // (depth, position of the account level, hardened?)
        let (depth, position, hardened) = match chain {
            ChainType::Solana => (4, 2, true),
            ChainType::Ethereum => (5, 4, false),
        };
        if segments.len() != depth {
            return None;
        }
        let segment = segments[position];

        let digits = if hardened {
            segment.strip_suffix('\'')?
        } else {
            segment
        };
        let index: u32 = digits.parse().ok()?;

        (Self::for_chain(chain, index) == path.trim()).then_some(index)
    }

    // =========================================================================
    // BUILDERS
    // =========================================================================

    /// BIP-44 style path: `m/purpose'/coin'/account'/change/index`
    #[inline]
    pub fn bip44(purpose: u32, coin_type: u32, account: u32, change: u32, index: u32) -> String {
        format!(
            "m/{}'/{}'/{}'/{}/{}",
            purpose, coin_type, account, change, index
        )
    }

    /// SLIP-0010 path for ed25519: `m/44'/coin'/account'` followed by
    /// `sub_paths`, every level forced hardened.
    ///
    /// - Solana: `ed25519_path(501, 0, &[0])` -> m/44'/501'/0'/0'
    pub fn ed25519_path(coin_type: u32, account: u32, sub_paths: &[u32]) -> String {
        let mut path = format!("m/44'/{}'/{}'", coin_type, account);
        for &idx in sub_paths {
            path.push_str(&format!("/{}'", idx));
        }
        path
    }
}
