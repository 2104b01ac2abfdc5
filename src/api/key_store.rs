//! Persistent API key storage.
//!
//! The key lives in a single-line file under the platform data directory.
//! `PIXSEARCH_API_KEY`, when set, takes priority over the file for reads.

use crate::model::KeyStoreError;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Environment variable that overrides the stored key.
pub const API_KEY_ENV: &str = "PIXSEARCH_API_KEY";

/// Synchronous key-value access to the API credential.
pub trait KeyStore: Send {
    /// Current credential, or `None` when nothing (or only whitespace) is stored.
    fn get(&self) -> Option<String>;

    /// Persist `value` and return it.
    ///
    /// # Errors
    ///
    /// Returns `KeyStoreError` if the value cannot be written.
    fn set(&self, value: &str) -> Result<String, KeyStoreError>;
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// File-backed credential store.
#[derive(Debug, Clone)]
pub struct FileKeyStore {
    path: PathBuf,
    read_env: bool,
}

impl FileKeyStore {
    /// Store the key at `path`, honouring the `PIXSEARCH_API_KEY` override.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            read_env: true,
        }
    }

    /// Store the key at `path` and ignore the environment.
    pub fn without_env(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            read_env: false,
        }
    }

    /// Location of the key file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(&self) -> Result<Option<String>, KeyStoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(non_blank(&contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(KeyStoreError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

impl KeyStore for FileKeyStore {
    fn get(&self) -> Option<String> {
        if self.read_env {
            if let Some(key) = std::env::var(API_KEY_ENV).ok().as_deref().and_then(non_blank) {
                return Some(key);
            }
        }

        match self.read_file() {
            Ok(key) => key,
            Err(e) => {
                warn!(error = %e, "Could not read stored API key");
                None
            }
        }
    }

    fn set(&self, value: &str) -> Result<String, KeyStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| KeyStoreError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        std::fs::write(&self.path, format!("{}\n", value)).map_err(|source| {
            KeyStoreError::Write {
                path: self.path.clone(),
                source,
            }
        })?;

        debug!(path = ?self.path, "Stored API key");
        Ok(value.to_string())
    }
}

/// In-memory credential store, used for `--api-key` sessions and tests.
#[derive(Debug, Default)]
pub struct MemoryKeyStore {
    value: Mutex<Option<String>>,
}

impl MemoryKeyStore {
    /// Store with no key.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with `key`.
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(key.into())),
        }
    }
}

impl KeyStore for MemoryKeyStore {
    fn get(&self) -> Option<String> {
        self.value
            .lock()
            .ok()
            .and_then(|guard| guard.as_deref().and_then(non_blank))
    }

    fn set(&self, value: &str) -> Result<String, KeyStoreError> {
        if let Ok(mut guard) = self.value.lock() {
            *guard = Some(value.to_string());
        }
        Ok(value.to_string())
    }
}
