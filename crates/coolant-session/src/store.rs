//! Durable client-side storage for the bearer credential.
//!
//! The console persists exactly two entries, under keys that are independent
//! of the in-memory session:
//!
//! - [`TOKEN_KEY`] — the bearer token string
//! - [`USER_KEY`] — a JSON snapshot of the last-known user
//!
//! Both are written on login and removed together on logout or when the API
//! stops accepting the token. [`CredentialStore`] is the key/value seam;
//! [`Credentials`] is the typed view the session manager uses.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use coolant_protocol::{Codec, JsonCodec, User};

use crate::StoreError;

/// Key of the persisted bearer token.
pub const TOKEN_KEY: &str = "token";

/// Key of the persisted user snapshot.
pub const USER_KEY: &str = "user";

/// A synchronous string key/value store, in the spirit of browser storage.
pub trait CredentialStore: Send + Sync {
    /// Returns the value under `key`, or `None` if absent.
    ///
    /// # Errors
    /// Returns [`StoreError`] if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns [`StoreError`] if the backing storage cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    /// Returns [`StoreError`] if the backing storage cannot be written.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Stores every pair, or none of them.
    ///
    /// The provided implementation writes the pairs one at a time and, when
    /// a write fails, puts back what the earlier writes replaced. Stores
    /// that can write a batch in one step should override it.
    ///
    /// # Errors
    /// Returns the failure that stopped the batch.
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StoreError> {
        let mut replaced: Vec<(&str, Option<String>)> = Vec::with_capacity(entries.len());
        for &(key, value) in entries {
            let previous = self.get(key)?;
            if let Err(e) = self.set(key, value) {
                for (key, previous) in replaced.into_iter().rev() {
                    let restored = match previous {
                        Some(previous) => self.set(key, &previous),
                        None => self.remove(key),
                    };
                    if let Err(restore_err) = restored {
                        tracing::warn!(key, error = %restore_err, "could not restore credential entry");
                    }
                }
                return Err(e);
            }
            replaced.push((key, previous));
        }
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// Process-local store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(lock(&self.entries).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        lock(&self.entries).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        lock(&self.entries).remove(key);
        Ok(())
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StoreError> {
        let mut map = lock(&self.entries);
        for &(key, value) in entries {
            map.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// A JSON object on disk, e.g. `{"token": "...", "user": "{...}"}`.
///
/// Every write replaces the file through a sibling temp file and a rename,
/// so a crash mid-write leaves either the old or the new content. A missing
/// file reads as an empty store.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Opens (without creating) the store at `path`, creating its parent
    /// directory if needed.
    ///
    /// # Errors
    /// Returns [`StoreError::Io`] if the parent directory cannot be created.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<HashMap<String, String>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write_all(&self, entries: &HashMap<String, String>) -> Result<(), StoreError> {
        let io_err = |source: std::io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        let bytes = serde_json::to_vec_pretty(entries).map_err(|e| io_err(e.into()))?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, bytes).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)
    }

    fn update(
        &self,
        apply: impl FnOnce(&mut HashMap<String, String>),
    ) -> Result<(), StoreError> {
        let _guard = lock(&self.write_lock);
        let mut entries = self.read_all()?;
        apply(&mut entries);
        self.write_all(&entries)
    }
}

impl CredentialStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        if !self.path.exists() {
            return Ok(());
        }
        self.update(|entries| {
            entries.remove(key);
        })
    }

    fn set_many(&self, pairs: &[(&str, &str)]) -> Result<(), StoreError> {
        self.update(|entries| {
            for &(key, value) in pairs {
                entries.insert(key.to_string(), value.to_string());
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// Typed access to the two persisted entries.
pub struct Credentials<'a> {
    store: &'a dyn CredentialStore,
}

impl<'a> Credentials<'a> {
    pub fn new(store: &'a dyn CredentialStore) -> Self {
        Self { store }
    }

    /// The persisted bearer token. An empty string counts as absent.
    ///
    /// # Errors
    /// Propagates store read failures.
    pub fn load_token(&self) -> Result<Option<String>, StoreError> {
        Ok(self.store.get(TOKEN_KEY)?.filter(|t| !t.is_empty()))
    }

    /// The persisted user snapshot.
    ///
    /// # Errors
    /// Propagates store read failures; an undecodable snapshot is
    /// [`StoreError::Snapshot`].
    pub fn load_user(&self) -> Result<Option<User>, StoreError> {
        match self.store.get(USER_KEY)? {
            Some(raw) => JsonCodec
                .decode(raw.as_bytes())
                .map(Some)
                .map_err(StoreError::Snapshot),
            None => Ok(None),
        }
    }

    /// Persists a fresh login as one batch: after a failure both entries
    /// hold what they held before.
    ///
    /// # Errors
    /// Returns the store failure.
    pub fn save(&self, token: &str, user: &User) -> Result<(), StoreError> {
        let snapshot = JsonCodec.encode(user).map_err(StoreError::Snapshot)?;
        let snapshot = String::from_utf8_lossy(&snapshot).into_owned();
        self.store
            .set_many(&[(USER_KEY, snapshot.as_str()), (TOKEN_KEY, token)])
    }

    /// Removes both entries. Both removals are attempted even if the first
    /// fails.
    ///
    /// # Errors
    /// Returns the first store failure.
    pub fn clear(&self) -> Result<(), StoreError> {
        let token = self.store.remove(TOKEN_KEY);
        let user = self.store.remove(USER_KEY);
        token.and(user)
    }
}
