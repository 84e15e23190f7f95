// wallet-core/src/wallet/storage.rs
//
// Session persistence
//
// The session lives in a plain key/value store under two keys:
//   "mnemonic" -> recovery phrase (plaintext)
//   "wallets"  -> JSON array of stored wallet records
// A store missing either key holds no session.

use crate::crypto::WalletMnemonic;
use crate::error::{StorageError, WalletError, WalletResult};
use crate::wallet::record::{decode_wallets, encode_wallets, WalletRecord};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};
use zeroize::Zeroizing;

pub const MNEMONIC_KEY: &str = "mnemonic";
pub const WALLETS_KEY: &str = "wallets";

/// Everything a reload needs to resume without re-deriving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub mnemonic: WalletMnemonic,
    pub wallets: Vec<WalletRecord>,
}

/// Narrow persistence interface the registry is written against.
pub trait SessionStore: Send + Sync {
    /// `Ok(None)` when nothing (or only part of a session) is stored.
    fn load(&self) -> WalletResult<Option<SessionState>>;

    fn save(&self, state: &SessionState) -> WalletResult<()>;

    fn clear(&self) -> WalletResult<()>;
}

// =============================================================================
// KEY/VALUE BACKENDS
// =============================================================================

/// String key/value storage with local-storage semantics.
pub trait KeyValueBackend: Send + Sync {
    fn get(&self, key: &str) -> WalletResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> WalletResult<()>;

    /// Removing an absent key is not an error.
    fn remove(&self, key: &str) -> WalletResult<()>;
}

/// In-process backend. Clones share the same entries, so a clone handed to
/// a second registry behaves like the same storage seen after a reload.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> WalletResult<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> WalletResult<()> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> WalletResult<()> {
        self.entries.write().remove(key);
        Ok(())
    }
}

/// One file per key inside `dir`.
///
/// Writes go to a temporary file that is renamed over the target, so a
/// crash never leaves a half-written value behind. On unix the file is
/// created owner-only (0600) before any byte is written.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn file_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    fn write_err(key: &str, e: std::io::Error) -> WalletError {
        WalletError::Storage(StorageError::Write {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }
}

impl KeyValueBackend for FileBackend {
    fn get(&self, key: &str) -> WalletResult<Option<String>> {
        match fs::read_to_string(self.file_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(WalletError::Storage(StorageError::Read {
                key: key.to_string(),
                reason: e.to_string(),
            })),
        }
    }

    fn set(&self, key: &str, value: &str) -> WalletResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| Self::write_err(key, e))?;

        let target = self.file_for(key);
        let tmp = self.dir.join(format!(".{}.tmp", key));

        // a leftover from an interrupted write keeps its old mode when reopened
        match fs::remove_file(&tmp) {
            Err(e) if e.kind() != ErrorKind::NotFound => return Err(Self::write_err(key, e)),
            _ => {}
        }

        let mut options = fs::OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&tmp).map_err(|e| Self::write_err(key, e))?;
        file.write_all(value.as_bytes())
            .and_then(|()| file.sync_all())
            .map_err(|e| Self::write_err(key, e))?;
        drop(file);

        fs::rename(&tmp, &target).map_err(|e| Self::write_err(key, e))?;
        debug!(key, path = %target.display(), "stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> WalletResult<()> {
        match fs::remove_file(self.file_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::write_err(key, e)),
        }
    }
}

// =============================================================================
// SESSION STORE OVER A BACKEND
// =============================================================================

/// [`SessionStore`] laid out over the two well-known keys.
#[derive(Debug, Clone)]
pub struct KeyValueSessionStore<B> {
    backend: B,
}

impl<B: KeyValueBackend> KeyValueSessionStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn roll_back_mnemonic(&self, previous: Option<&str>) {
        let restored = match previous {
            Some(phrase) => self.backend.set(MNEMONIC_KEY, phrase),
            None => self.backend.remove(MNEMONIC_KEY),
        };
        if let Err(e) = restored {
            warn!(error = %e, "could not restore previous phrase, dropping saved session");
            // best effort: a store missing either key reads as no session
            let _ = self.backend.remove(MNEMONIC_KEY);
            let _ = self.backend.remove(WALLETS_KEY);
        }
    }
}

impl<B: KeyValueBackend> SessionStore for KeyValueSessionStore<B> {
    fn load(&self) -> WalletResult<Option<SessionState>> {
        let phrase = match self.backend.get(MNEMONIC_KEY)? {
            Some(phrase) => Zeroizing::new(phrase),
            None => return Ok(None),
        };
        let wallets_json = match self.backend.get(WALLETS_KEY)? {
            Some(json) => json,
            None => return Ok(None),
        };

        let mnemonic = WalletMnemonic::from_phrase(&phrase).map_err(|e| {
            WalletError::Storage(StorageError::Corrupted {
                key: MNEMONIC_KEY.to_string(),
                reason: e.to_string(),
            })
        })?;
        let wallets = decode_wallets(WALLETS_KEY, &wallets_json)?;

        Ok(Some(SessionState { mnemonic, wallets }))
    }

    /// Both keys change or neither does, as seen by a later `load`.
    ///
    /// When the wallet list cannot be written the previous phrase is put
    /// back. If even that fails both keys are dropped, so a reload finds no
    /// session instead of one phrase paired with another session's wallets.
    fn save(&self, state: &SessionState) -> WalletResult<()> {
        let wallets_json = encode_wallets(WALLETS_KEY, &state.wallets)?;
        let previous = self.backend.get(MNEMONIC_KEY)?.map(Zeroizing::new);

        self.backend.set(MNEMONIC_KEY, &state.mnemonic.phrase())?;
        if let Err(e) = self.backend.set(WALLETS_KEY, &wallets_json) {
            self.roll_back_mnemonic(previous.as_ref().map(|p| p.as_str()));
            return Err(e);
        }
        Ok(())
    }

    fn clear(&self) -> WalletResult<()> {
        self.backend.remove(MNEMONIC_KEY)?;
        self.backend.remove(WALLETS_KEY)
    }
}
