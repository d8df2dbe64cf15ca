//! Durable key-value persistence for theme preferences.
//!
//! Two logical values are persisted: the user's explicit choice under
//! [`THEME_KEY`] and the last-resolved effective theme under
//! [`RESOLVED_THEME_KEY`]. Both operations of [`PreferenceStore`] may fail;
//! every caller in this subsystem treats a failing store as absent and
//! continues without durability.
//!
//! [`FileStore`] keeps a single JSON document in the platform preference
//! directory and writes through on every `set`. [`MemoryStore`] backs tests
//! and sessions where persistence is disabled.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use directories::ProjectDirs;
use tracing::{debug, warn};

use crate::choice::{EffectiveTheme, ThemeChoice};
use crate::error::{StoreError, ThemeError};

/// Persisted key for the user's explicit theme choice.
pub const THEME_KEY: &str = "theme";

/// Persisted key for the cached last-resolved effective theme.
pub const RESOLVED_THEME_KEY: &str = "resolvedTheme";

/// Key-value persistence for preferences.
pub trait PreferenceStore: Send + Sync {
    /// Read the stored value for `key`, if any.
    ///
    /// # Errors
    /// Returns `StoreError` when the backing store is inaccessible.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`.
    ///
    /// # Errors
    /// Returns `StoreError` when the value could not be made durable.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Decode the persisted theme choice.
///
/// Store failures and malformed values are logged and come back as `None`,
/// leaving the caller on its default.
#[must_use]
pub fn load_choice(store: &dyn PreferenceStore) -> Option<ThemeChoice> {
    let raw = read_key(store, THEME_KEY)?;
    match ThemeChoice::from_name(&raw) {
        Some(choice) => Some(choice),
        None => {
            let err = ThemeError::MalformedPersistedValue {
                key: THEME_KEY,
                value: raw,
            };
            warn!(error = %err, "Ignoring malformed persisted choice");
            None
        }
    }
}

/// Decode the cached effective theme.
///
/// Same degradation behavior as [`load_choice`].
#[must_use]
pub fn load_resolved(store: &dyn PreferenceStore) -> Option<EffectiveTheme> {
    let raw = read_key(store, RESOLVED_THEME_KEY)?;
    match EffectiveTheme::from_name(&raw) {
        Some(theme) => Some(theme),
        None => {
            let err = ThemeError::MalformedPersistedValue {
                key: RESOLVED_THEME_KEY,
                value: raw,
            };
            warn!(error = %err, "Ignoring malformed persisted resolved theme");
            None
        }
    }
}

/// Write a value, trading durability for progress on failure.
pub(crate) fn persist(store: &dyn PreferenceStore, key: &str, value: &str) {
    if let Err(err) = store.set(key, value) {
        warn!(theme.key = key, error = %err, "Preference write failed; continuing without durability");
    }
}

fn read_key(store: &dyn PreferenceStore, key: &'static str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(err) => {
            debug!(theme.key = key, error = %err, "Preference read failed; treating as absent");
            None
        }
    }
}

/// In-memory store for tests and storage-disabled sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.read().expect("preference store lock poisoned");
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().expect("preference store lock poisoned");
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed store: one JSON document, written through on every `set`.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl FileStore {
    /// Open the store at the platform preference location.
    ///
    /// # Errors
    /// Returns `StoreError::Unavailable` when no per-user directory exists
    /// for this platform, or an I/O/serde error when an existing document
    /// cannot be read.
    pub fn open_default() -> Result<Self, StoreError> {
        let dirs = ProjectDirs::from("com", "folio-reader", "folio").ok_or(StoreError::Unavailable)?;
        Self::open(dirs.config_dir().join("preferences.json"))
    }

    /// Open a store backed by the given file, creating parent directories.
    ///
    /// A missing file is an empty store; a present but undecodable file is
    /// an error, so a corrupt document is noticed rather than overwritten.
    ///
    /// # Errors
    /// Returns `StoreError` on I/O failure or an undecodable document.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let entries = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(err.into()),
        };
        debug!(store.path = %path.display(), store.entries = entries.len(), "Preference store opened");
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Location of the backing document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &HashMap<String, String>) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.read().expect("preference store lock poisoned");
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().expect("preference store lock poisoned");
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }
}
