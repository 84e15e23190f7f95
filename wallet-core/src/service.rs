// wallet-core/src/service.rs
//
// Wallet Service
//
// The user-facing actions: generate the initial batch, add wallets, delete,
// clear, reveal/hide secrets and copy values. Every action reports its
// outcome as a Notice for whatever front end renders them.

use crate::chains::{ChainType, DeriverSet, KeySource};
use crate::config::WalletConfig;
use crate::crypto::{EntropyBits, WalletMnemonic};
use crate::error::{CryptoError, WalletError, WalletResult};
use crate::wallet::{SessionStore, WalletRecord, WalletRegistry};
use tracing::{error, info, warn};

/// Shown in place of a private key while secrets are hidden.
pub const MASKED_SECRET: &str = "********";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// User-visible outcome of an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

impl From<&WalletError> for Notice {
    /// Storage and clipboard problems never end the session, so they are
    /// warnings; everything else is an error.
    fn from(err: &WalletError) -> Self {
        match err {
            WalletError::Storage(_) | WalletError::Clipboard(_) => Notice::warning(err.to_string()),
            _ => Notice::error(err.to_string()),
        }
    }
}

/// Result of a multi-chain request: what was derived and which chains failed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchReport {
    pub created: Vec<WalletRecord>,
    pub failures: Vec<WalletError>,
}

impl BatchReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// System clipboard as seen by the core.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> WalletResult<()>;
}

pub struct WalletService<S> {
    registry: WalletRegistry<S>,
    derivers: DeriverSet,
    entropy: EntropyBits,
    reveal_secrets: bool,
    notices: Vec<Notice>,
}

impl<S: SessionStore> WalletService<S> {
    /// Build the service and pick up any saved session.
    ///
    /// A saved session that cannot be read is reported as a warning and the
    /// service starts empty.
    pub fn open(store: S, config: &WalletConfig) -> WalletResult<Self> {
        let mut service = Self {
            registry: WalletRegistry::new(store),
            derivers: DeriverSet::standard(),
            entropy: config.entropy()?,
            reveal_secrets: config.reveal_secrets,
            notices: Vec::new(),
        };

        if let Err(e) = service.registry.restore() {
            warn!(error = %e, "saved session could not be restored");
            service.notices.push(Notice::from(&e));
        }
        Ok(service)
    }

    /// Swap in a different deriver set.
    pub fn with_derivers(mut self, derivers: DeriverSet) -> Self {
        self.derivers = derivers;
        self
    }

    /// Start a new session from `phrase`, or from a fresh phrase when `None`,
    /// with one index-0 wallet per chain.
    ///
    /// An invalid phrase aborts before anything is derived. Each chain fails
    /// on its own; nothing is committed only when every chain failed.
    pub fn generate_initial(&mut self, phrase: Option<&str>) -> WalletResult<BatchReport> {
        let mnemonic = match phrase {
            Some(phrase) => WalletMnemonic::from_phrase(phrase),
            None => WalletMnemonic::generate(self.entropy),
        };
        let mnemonic = match mnemonic {
            Ok(mnemonic) => mnemonic,
            Err(e) => return Err(self.report_error(e)),
        };

        let report = {
            let source = KeySource::new(&mnemonic);
            let requests = ChainType::ALL.map(|chain| (chain, 0));
            self.derive_batch(&source, &requests)
        };

        if report.created.is_empty() {
            error!(failures = report.failures.len(), "initial wallet generation failed");
            return Err(self.report_error(WalletError::GenerationFailed(report.failures)));
        }

        let persisted = self
            .registry
            .replace_session(mnemonic, report.created.clone());
        self.absorb_storage_error(persisted)?;

        info!(
            created = report.created.len(),
            failed = report.failures.len(),
            "initial wallets generated"
        );
        self.notices
            .push(Notice::success("Initial wallets generated successfully!"));
        Ok(report)
    }

    /// Derive the next wallet for `chain` from the session's phrase.
    pub fn add_wallet(&mut self, chain: ChainType) -> WalletResult<WalletRecord> {
        let mut report = self.extend(&[chain])?;
        match report.created.pop() {
            Some(record) => Ok(record),
            None => Err(report
                .failures
                .pop()
                .unwrap_or(WalletError::GenerationFailed(Vec::new()))),
        }
    }

    /// Derive the next wallet for every chain.
    pub fn add_wallet_set(&mut self) -> WalletResult<BatchReport> {
        self.extend(&ChainType::ALL)
    }

    fn extend(&mut self, chains: &[ChainType]) -> WalletResult<BatchReport> {
        let Some(mnemonic) = self.registry.mnemonic().cloned() else {
            return Err(self.report_error(WalletError::NoSession));
        };

        let requests = chains
            .iter()
            .map(|&chain| (chain, self.registry.next_index(chain)))
            .collect::<Vec<_>>();
        let report = {
            let source = KeySource::new(&mnemonic);
            self.derive_batch(&source, &requests)
        };

        if report.created.is_empty() {
            let err = match <[WalletError; 1]>::try_from(report.failures) {
                Ok([single]) => single,
                Err(failures) => WalletError::GenerationFailed(failures),
            };
            return Err(self.report_error(err));
        }

        for record in &report.created {
            let added = self.registry.add_wallet(record.clone());
            self.absorb_storage_error(added)?;
        }

        self.notices
            .push(Notice::success("Additional wallet generated successfully!"));
        Ok(report)
    }

    /// Derive each `(chain, index)` request, collecting failures per chain.
    fn derive_batch(
        &mut self,
        source: &KeySource<'_>,
        requests: &[(ChainType, u32)],
    ) -> BatchReport {
        let mut report = BatchReport::default();

        for &(chain, index) in requests {
            let result = match self.derivers.get(chain) {
                Some(deriver) => deriver.derive(source, index),
                None => Err(CryptoError::DerivationFailed(format!(
                    "no deriver registered for {}",
                    chain
                ))
                .into()),
            };

            match result {
                Ok(record) => report.created.push(record),
                Err(e) => {
                    let err = WalletError::for_chain(chain, e);
                    error!(%chain, index, error = %err, "wallet derivation failed");
                    self.notices.push(Notice::from(&err));
                    report.failures.push(err);
                }
            }
        }
        report
    }

    /// Remove the wallet at `position` in display order.
    pub fn delete_wallet(&mut self, position: usize) -> WalletResult<WalletRecord> {
        let Some(record) = self.registry.wallets().get(position).cloned() else {
            let err = WalletError::PositionOutOfRange {
                position,
                len: self.registry.len(),
            };
            return Err(self.report_error(err));
        };

        let removed = self.registry.remove_wallet(position).map(|_| ());
        self.absorb_storage_error(removed)?;
        self.notices.push(Notice::success("Wallet deleted"));
        Ok(record)
    }

    /// Forget the phrase and every wallet.
    pub fn clear_all(&mut self) -> WalletResult<()> {
        let cleared = self.registry.clear();
        self.absorb_storage_error(cleared)?;
        self.notices.push(Notice::success("All wallets cleared"));
        Ok(())
    }

    /// Flip private key visibility, returning the new state.
    pub fn toggle_secrets(&mut self) -> bool {
        self.reveal_secrets = !self.reveal_secrets;
        self.reveal_secrets
    }

    pub fn secrets_visible(&self) -> bool {
        self.reveal_secrets
    }

    /// The private key as it should be displayed right now.
    pub fn displayed_private_key<'a>(&self, record: &'a WalletRecord) -> &'a str {
        if self.reveal_secrets {
            &record.private_key
        } else {
            MASKED_SECRET
        }
    }

    /// Write `value` to the clipboard. Failure only produces a warning.
    pub fn copy_to_clipboard(&mut self, clipboard: &mut dyn Clipboard, value: &str) -> Notice {
        let notice = match clipboard.write_text(value) {
            Ok(()) => Notice::success("Copied to clipboard!"),
            Err(e) => {
                warn!(error = %e, "clipboard write failed");
                Notice::warning("Failed to copy to clipboard")
            }
        };
        self.notices.push(notice.clone());
        notice
    }

    /// Drain queued notices, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn registry(&self) -> &WalletRegistry<S> {
        &self.registry
    }

    pub fn wallets(&self) -> &[WalletRecord] {
        self.registry.wallets()
    }

    pub fn mnemonic(&self) -> Option<&WalletMnemonic> {
        self.registry.mnemonic()
    }

    fn report_error(&mut self, err: WalletError) -> WalletError {
        self.notices.push(Notice::from(&err));
        err
    }

    /// The in-memory change already happened; a failed write becomes a
    /// warning instead of an error.
    fn absorb_storage_error(&mut self, result: WalletResult<()>) -> WalletResult<()> {
        match result {
            Ok(()) => Ok(()),
            Err(e @ WalletError::Storage(_)) => {
                warn!(error = %e, "session change not persisted");
                self.notices.push(Notice::from(&e));
                Ok(())
            }
            Err(e) => Err(self.report_error(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::wallet::{KeyValueSessionStore, MemoryBackend, SessionState};

    const TEST_MNEMONIC: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    type MemService = WalletService<KeyValueSessionStore<MemoryBackend>>;

    fn service() -> MemService {
        let store = KeyValueSessionStore::new(MemoryBackend::new());
        WalletService::open(store, &WalletConfig::default()).unwrap()
    }

    struct FailingDeriver(ChainType);

    impl crate::chains::ChainDeriver for FailingDeriver {
        fn chain(&self) -> ChainType {
            self.0
        }

        fn derive(&self, _source: &KeySource<'_>, _index: u32) -> WalletResult<WalletRecord> {
            Err(CryptoError::DerivationFailed("forced failure".into()).into())
        }
    }

    struct BrokenStore;

    impl SessionStore for BrokenStore {
        fn load(&self) -> WalletResult<Option<SessionState>> {
            Err(StorageError::Corrupted {
                key: "wallets".into(),
                reason: "truncated".into(),
            }
            .into())
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

    struct RecordingClipboard(Option<String>);

    impl Clipboard for RecordingClipboard {
        fn write_text(&mut self, text: &str) -> WalletResult<()> {
            self.0 = Some(text.to_string());
            Ok(())
        }
    }

    struct DeniedClipboard;

    impl Clipboard for DeniedClipboard {
        fn write_text(&mut self, _text: &str) -> WalletResult<()> {
            Err(WalletError::Clipboard("permission denied".into()))
        }
    }

    #[test]
    fn test_generate_initial_from_phrase() {
        let mut svc = service();
        let report = svc.generate_initial(Some(TEST_MNEMONIC)).unwrap();

        assert!(report.is_complete());
        assert_eq!(report.created.len(), 2);
        assert_eq!(report.created[0].chain, ChainType::Solana);
        assert_eq!(
            report.created[1].public_id,
            "0x9858EfFD232B4033E47d90003D41EC34EcaEda94"
        );
        assert_eq!(svc.wallets(), &report.created[..]);
        assert_eq!(
            svc.take_notices().last(),
            Some(&Notice::success("Initial wallets generated successfully!"))
        );
    }

    #[test]
    fn test_generate_initial_fresh_phrase() {
        let mut svc = service();
        svc.generate_initial(None).unwrap();
        assert_eq!(svc.mnemonic().unwrap().word_count(), 24);
        assert_eq!(svc.wallets().len(), 2);
    }

    #[test]
    fn test_invalid_phrase_aborts_before_derivation() {
        let mut svc = service();
        let result = svc.generate_initial(Some("abandon abandon abandon"));

        assert!(matches!(result, Err(WalletError::Mnemonic(_))));
        assert!(svc.mnemonic().is_none());
        assert!(svc.wallets().is_empty());
        assert_eq!(svc.take_notices()[0].level, NoticeLevel::Error);
    }

    #[test]
    fn test_failing_solana_does_not_block_ethereum() {
        let mut svc = service()
            .with_derivers(DeriverSet::standard().with(Box::new(FailingDeriver(ChainType::Solana))));
        let report = svc.generate_initial(Some(TEST_MNEMONIC)).unwrap();

        assert_eq!(report.created.len(), 1);
        assert_eq!(report.created[0].chain, ChainType::Ethereum);
        assert!(matches!(
            report.failures[..],
            [WalletError::ChainDerivation {
                chain: ChainType::Solana,
                ..
            }]
        ));
        assert!(svc.mnemonic().is_some());
    }

    #[test]
    fn test_failing_ethereum_does_not_block_solana() {
        let mut svc = service()
            .with_derivers(DeriverSet::standard().with(Box::new(FailingDeriver(ChainType::Ethereum))));
        let report = svc.generate_initial(Some(TEST_MNEMONIC)).unwrap();

        assert_eq!(report.created.len(), 1);
        assert_eq!(report.created[0].chain, ChainType::Solana);
        assert_eq!(report.failures.len(), 1);
    }

    #[test]
    fn test_total_failure_commits_nothing() {
        let mut svc = service().with_derivers(
            DeriverSet::standard()
                .with(Box::new(FailingDeriver(ChainType::Solana)))
                .with(Box::new(FailingDeriver(ChainType::Ethereum))),
        );
        let result = svc.generate_initial(Some(TEST_MNEMONIC));

        assert!(matches!(result, Err(WalletError::GenerationFailed(ref f)) if f.len() == 2));
        assert!(svc.mnemonic().is_none());
        assert!(svc.registry().store().backend().is_empty());
    }

    #[test]
    fn test_add_wallet_uses_next_index() {
        let mut svc = service();
        svc.generate_initial(Some(TEST_MNEMONIC)).unwrap();

        let sol = svc.add_wallet(ChainType::Solana).unwrap();
        assert_eq!(sol.index, 1);
        assert_eq!(sol.path, "m/44'/501'/1'/0'");

        let set = svc.add_wallet_set().unwrap();
        let indices = set.created.iter().map(|w| (w.chain, w.index)).collect::<Vec<_>>();
        assert_eq!(indices, vec![(ChainType::Solana, 2), (ChainType::Ethereum, 1)]);
        assert_eq!(svc.wallets().len(), 5);
    }

    #[test]
    fn test_add_without_session() {
        let mut svc = service();
        assert_eq!(svc.add_wallet(ChainType::Ethereum), Err(WalletError::NoSession));
    }

    #[test]
    fn test_add_wallet_reports_chain_failure() {
        let mut svc = service()
            .with_derivers(DeriverSet::standard().with(Box::new(FailingDeriver(ChainType::Solana))));
        svc.generate_initial(Some(TEST_MNEMONIC)).unwrap();

        let err = svc.add_wallet(ChainType::Solana).unwrap_err();
        assert!(matches!(
            err,
            WalletError::ChainDerivation {
                chain: ChainType::Solana,
                ..
            }
        ));
        assert_eq!(svc.wallets().len(), 1);
    }

    #[test]
    fn test_delete_does_not_reuse_index() {
        let mut svc = service();
        svc.generate_initial(Some(TEST_MNEMONIC)).unwrap();
        svc.add_wallet(ChainType::Ethereum).unwrap();
        svc.add_wallet(ChainType::Ethereum).unwrap();

        // [sol0, eth0, eth1, eth2]
        let removed = svc.delete_wallet(2).unwrap();
        assert_eq!(removed.index, 1);
        assert_eq!(svc.wallets()[2].index, 2);

        let next = svc.add_wallet(ChainType::Ethereum).unwrap();
        assert_eq!(next.index, 3);
    }

    #[test]
    fn test_delete_out_of_range() {
        let mut svc = service();
        assert!(matches!(
            svc.delete_wallet(0),
            Err(WalletError::PositionOutOfRange { position: 0, len: 0 })
        ));
    }

    #[test]
    fn test_clear_all() {
        let mut svc = service();
        svc.generate_initial(Some(TEST_MNEMONIC)).unwrap();
        svc.clear_all().unwrap();

        assert!(svc.mnemonic().is_none());
        assert!(svc.wallets().is_empty());
        assert!(svc.registry().store().backend().is_empty());
    }

    #[test]
    fn test_secret_visibility() {
        let mut svc = service();
        let report = svc.generate_initial(Some(TEST_MNEMONIC)).unwrap();
        let eth = &report.created[1];

        assert!(!svc.secrets_visible());
        assert_eq!(svc.displayed_private_key(eth), MASKED_SECRET);

        assert!(svc.toggle_secrets());
        assert_eq!(svc.displayed_private_key(eth), eth.private_key);
        assert!(!svc.toggle_secrets());
    }

    #[test]
    fn test_reveal_secrets_from_config() {
        let config = WalletConfig {
            reveal_secrets: true,
            ..WalletConfig::default()
        };
        let svc = WalletService::open(KeyValueSessionStore::new(MemoryBackend::new()), &config)
            .unwrap();
        assert!(svc.secrets_visible());
    }

    #[test]
    fn test_clipboard_notices() {
        let mut svc = service();

        let mut clipboard = RecordingClipboard(None);
        let ok = svc.copy_to_clipboard(&mut clipboard, "0xabc");
        assert_eq!(ok, Notice::success("Copied to clipboard!"));
        assert_eq!(clipboard.0.as_deref(), Some("0xabc"));

        let failed = svc.copy_to_clipboard(&mut DeniedClipboard, "0xabc");
        assert_eq!(failed.level, NoticeLevel::Warning);
        assert_eq!(svc.take_notices().len(), 2);
    }

    #[test]
    fn test_storage_failures_are_warnings() {
        let mut svc = WalletService::open(BrokenStore, &WalletConfig::default()).unwrap();
        let restore_notice = svc.take_notices();
        assert_eq!(restore_notice.len(), 1);
        assert_eq!(restore_notice[0].level, NoticeLevel::Warning);

        let report = svc.generate_initial(Some(TEST_MNEMONIC)).unwrap();
        assert_eq!(report.created.len(), 2);
        assert_eq!(svc.wallets().len(), 2);

        let levels = svc.take_notices().into_iter().map(|n| n.level).collect::<Vec<_>>();
        assert_eq!(levels, vec![NoticeLevel::Warning, NoticeLevel::Success]);
    }
}
