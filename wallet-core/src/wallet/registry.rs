// wallet-core/src/wallet/registry.rs
//
// Wallet Registry
//
// Ordered, in-memory list of derived wallets mirrored to a SessionStore
// after every mutation. Per-chain index counters only ever grow.

use crate::chains::ChainType;
use crate::crypto::WalletMnemonic;
use crate::error::{WalletError, WalletResult};
use crate::wallet::record::WalletRecord;
use crate::wallet::storage::{SessionState, SessionStore};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// In-memory session plus the store it is mirrored to.
///
/// Mutating calls update memory first and then persist. An `Err(Storage)`
/// from a mutating call means the change is live in memory but the store
/// still holds the previous state; memory stays authoritative.
pub struct WalletRegistry<S> {
    store: S,
    mnemonic: Option<WalletMnemonic>,
    wallets: Vec<WalletRecord>,
    next_index: BTreeMap<ChainType, u32>,
}

impl<S: SessionStore> WalletRegistry<S> {
    /// Empty registry; call [`restore`](Self::restore) to pick up a saved session.
    pub fn new(store: S) -> Self {
        Self {
            store,
            mnemonic: None,
            wallets: Vec::new(),
            next_index: BTreeMap::new(),
        }
    }

    /// Load the persisted session, if any. Returns whether one was found.
    ///
    /// Counters are rebuilt from the stored records only: each chain resumes
    /// at its highest stored index + 1. An index whose wallet was deleted
    /// before the reload, and was the highest for its chain, is handed out
    /// again.
    pub fn restore(&mut self) -> WalletResult<bool> {
        match self.store.load()? {
            Some(state) => {
                info!(wallets = state.wallets.len(), "restored wallet session");
                self.mnemonic = Some(state.mnemonic);
                self.wallets = state.wallets;
                self.rebuild_counters();
                Ok(true)
            }
            None => {
                debug!("no saved wallet session");
                Ok(false)
            }
        }
    }

    /// Start a new session with `mnemonic` and its first wallets.
    pub fn replace_session(
        &mut self,
        mnemonic: WalletMnemonic,
        wallets: Vec<WalletRecord>,
    ) -> WalletResult<()> {
        self.mnemonic = Some(mnemonic);
        self.wallets = wallets;
        self.rebuild_counters();
        info!(wallets = self.wallets.len(), "started new wallet session");
        self.persist()
    }

    /// Append a record whose index came from [`next_index`](Self::next_index).
    pub fn add_wallet(&mut self, record: WalletRecord) -> WalletResult<()> {
        if self.mnemonic.is_none() {
            return Err(WalletError::NoSession);
        }
        if self
            .wallets
            .iter()
            .any(|w| w.chain == record.chain && w.index == record.index)
        {
            return Err(WalletError::DuplicateWallet {
                chain: record.chain,
                index: record.index,
            });
        }

        let counter = self.next_index.entry(record.chain).or_insert(0);
        *counter = (*counter).max(record.index.saturating_add(1));

        info!(
            chain = %record.chain,
            index = record.index,
            public_id = %record.public_id,
            "added wallet"
        );
        self.wallets.push(record);
        self.persist()
    }

    /// Index the next wallet of `chain` should be derived at.
    pub fn next_index(&self, chain: ChainType) -> u32 {
        self.next_index.get(&chain).copied().unwrap_or(0)
    }

    /// Remove the record at `position` in display order. Other records keep
    /// their index and the chain counter is not rewound.
    pub fn remove_wallet(&mut self, position: usize) -> WalletResult<WalletRecord> {
        if position >= self.wallets.len() {
            return Err(WalletError::PositionOutOfRange {
                position,
                len: self.wallets.len(),
            });
        }

        let removed = self.wallets.remove(position);
        info!(chain = %removed.chain, index = removed.index, "removed wallet");
        self.persist()?;
        Ok(removed)
    }

    /// Drop the mnemonic and every record, in memory and in the store.
    pub fn clear(&mut self) -> WalletResult<()> {
        self.mnemonic = None;
        self.wallets.clear();
        self.next_index.clear();
        info!("cleared wallet session");
        self.store.clear()
    }

    pub fn mnemonic(&self) -> Option<&WalletMnemonic> {
        self.mnemonic.as_ref()
    }

    pub fn wallets(&self) -> &[WalletRecord] {
        &self.wallets
    }

    pub fn wallets_for(&self, chain: ChainType) -> impl Iterator<Item = &WalletRecord> {
        self.wallets.iter().filter(move |w| w.chain == chain)
    }

    pub fn len(&self) -> usize {
        self.wallets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wallets.is_empty()
    }

    pub fn has_session(&self) -> bool {
        self.mnemonic.is_some()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn rebuild_counters(&mut self) {
        self.next_index.clear();
        for w in &self.wallets {
            let counter = self.next_index.entry(w.chain).or_insert(0);
            *counter = (*counter).max(w.index.saturating_add(1));
        }
    }

    fn persist(&self) -> WalletResult<()> {
        let Some(mnemonic) = &self.mnemonic else {
            return self.store.clear();
        };
        self.store.save(&SessionState {
            mnemonic: mnemonic.clone(),
            wallets: self.wallets.clone(),
        })
    }
}

impl<S> std::fmt::Debug for WalletRegistry<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletRegistry")
            .field("has_session", &self.mnemonic.is_some())
            .field("wallets", &self.wallets)
            .field("next_index", &self.next_index)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::wallet::storage::{KeyValueSessionStore, MemoryBackend};

    const TEST_MNEMONIC: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    fn record(chain: ChainType, index: u32) -> WalletRecord {
        WalletRecord {
            chain,
            path: crate::crypto::DerivationPaths::for_chain(chain, index),
            public_id: format!("{}-{}", chain, index),
            private_key: format!("secret-{}-{}", chain, index),
            index,
        }
    }

    fn registry() -> (WalletRegistry<KeyValueSessionStore<MemoryBackend>>, MemoryBackend) {
        let backend = MemoryBackend::new();
        let mut reg = WalletRegistry::new(KeyValueSessionStore::new(backend.clone()));
        reg.replace_session(
            WalletMnemonic::from_phrase(TEST_MNEMONIC).unwrap(),
            vec![record(ChainType::Solana, 0), record(ChainType::Ethereum, 0)],
        )
        .unwrap();
        (reg, backend)
    }

    /// Store whose writes always fail.
    struct ReadOnlyStore;

    impl SessionStore for ReadOnlyStore {
        fn load(&self) -> WalletResult<Option<SessionState>> {
            Ok(None)
        }

        fn save(&self, _state: &SessionState) -> WalletResult<()> {
            Err(StorageError::Write {
                key: "wallets".into(),
                reason: "quota exceeded".into(),
            }
            .into())
        }

        fn clear(&self) -> WalletResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_add_requires_session() {
        let mut reg = WalletRegistry::new(KeyValueSessionStore::new(MemoryBackend::new()));
        assert_eq!(
            reg.add_wallet(record(ChainType::Solana, 0)),
            Err(WalletError::NoSession)
        );
        assert!(reg.is_empty());
    }

    #[test]
    fn test_counters_follow_records() {
        let (mut reg, _) = registry();
        assert_eq!(reg.next_index(ChainType::Solana), 1);
        assert_eq!(reg.next_index(ChainType::Ethereum), 1);

        reg.add_wallet(record(ChainType::Solana, 1)).unwrap();
        assert_eq!(reg.next_index(ChainType::Solana), 2);
        assert_eq!(reg.next_index(ChainType::Ethereum), 1);
    }

    #[test]
    fn test_duplicate_rejected_without_mutation() {
        let (mut reg, _) = registry();
        let err = reg.add_wallet(record(ChainType::Ethereum, 0)).unwrap_err();
        assert_eq!(
            err,
            WalletError::DuplicateWallet {
                chain: ChainType::Ethereum,
                index: 0
            }
        );
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_remove_keeps_indices_and_counter() {
        let (mut reg, _) = registry();
        reg.add_wallet(record(ChainType::Solana, 1)).unwrap();
        reg.add_wallet(record(ChainType::Solana, 2)).unwrap();

        // [sol0, eth0, sol1, sol2]
        let removed = reg.remove_wallet(2).unwrap();
        assert_eq!(removed.index, 1);

        let sol = reg.wallets_for(ChainType::Solana).map(|w| w.index).collect::<Vec<_>>();
        assert_eq!(sol, vec![0, 2]);
        assert_eq!(reg.next_index(ChainType::Solana), 3);
    }

    #[test]
    fn test_remove_out_of_range() {
        let (mut reg, _) = registry();
        assert_eq!(
            reg.remove_wallet(5),
            Err(WalletError::PositionOutOfRange { position: 5, len: 2 })
        );
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let (mut reg, backend) = registry();
        reg.add_wallet(record(ChainType::Ethereum, 1)).unwrap();
        reg.remove_wallet(0).unwrap();

        let mut reloaded = WalletRegistry::new(KeyValueSessionStore::new(backend));
        assert!(reloaded.restore().unwrap());
        assert_eq!(reloaded.wallets(), reg.wallets());
        assert_eq!(reloaded.mnemonic(), reg.mnemonic());
        assert_eq!(reloaded.next_index(ChainType::Ethereum), 2);
        // the only Solana record was removed before the reload
        assert_eq!(reloaded.next_index(ChainType::Solana), 0);
    }

    #[test]
    fn test_restore_rewinds_counters_to_stored_records() {
        let (mut reg, backend) = registry();
        reg.add_wallet(record(ChainType::Solana, 1)).unwrap();
        reg.add_wallet(record(ChainType::Solana, 2)).unwrap();

        // [sol0, eth0, sol1, sol2]; drop the highest Solana index
        reg.remove_wallet(3).unwrap();
        assert_eq!(reg.next_index(ChainType::Solana), 3);

        let mut reloaded = WalletRegistry::new(KeyValueSessionStore::new(backend));
        reloaded.restore().unwrap();
        assert_eq!(reloaded.next_index(ChainType::Solana), 2);
    }

    #[test]
    fn test_clear_resets_everything() {
        let (mut reg, backend) = registry();
        reg.clear().unwrap();

        assert!(!reg.has_session());
        assert!(reg.is_empty());
        assert_eq!(reg.next_index(ChainType::Solana), 0);
        assert!(backend.is_empty());
    }

    #[test]
    fn test_storage_failure_keeps_memory_state() {
        let mut reg = WalletRegistry::new(ReadOnlyStore);
        let result = reg.replace_session(
            WalletMnemonic::from_phrase(TEST_MNEMONIC).unwrap(),
            vec![record(ChainType::Solana, 0)],
        );

        assert!(matches!(result, Err(WalletError::Storage(_))));
        assert!(reg.has_session());
        assert_eq!(reg.len(), 1);
    }
}
