//! Reader preference record.
//!
//! A small key-value record (theme choice, table-of-contents visibility)
//! stored under a fixed key, written when a page is unloaded and read back
//! on the next load. A missing or unreadable record means the defaults:
//! light theme, table of contents hidden.

use crate::domain::Theme;
use crate::error::{PreferencesError, PreferencesResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Key the preference record is stored under
pub const PREFERENCES_KEY: &str = "docsite-preferences";

/// The reader's display choices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub theme: Theme,
    pub toc_visible: bool,
}

/// On-disk shape of the record.
#[derive(Debug, Serialize, Deserialize)]
struct StoredPreferences {
    #[serde(flatten)]
    preferences: Preferences,
    #[serde(default)]
    updated_at: Option<String>,
}

impl Preferences {
    /// Read the record from `store`, falling back to defaults.
    ///
    /// Store failures and malformed records are logged, never surfaced.
    pub fn load(store: &dyn PreferenceStore) -> Self {
        match Self::try_load(store) {
            Ok(Some(prefs)) => prefs,
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::warn!("Ignoring stored preferences: {}", e);
                Self::default()
            }
        }
    }

    /// Read the record from `store`; `None` when nothing is stored.
    pub fn try_load(store: &dyn PreferenceStore) -> PreferencesResult<Option<Self>> {
        let Some(raw) = store.get(PREFERENCES_KEY)? else {
            return Ok(None);
        };
        let stored: StoredPreferences = serde_json::from_str(&raw)?;
        Ok(Some(stored.preferences))
    }

    /// Write the record to `store`, stamped with the current time.
    pub fn save(&self, store: &dyn PreferenceStore) -> PreferencesResult<()> {
        let stored = StoredPreferences {
            preferences: *self,
            updated_at: Some(chrono::Utc::now().to_rfc3339()),
        };
        store.set(PREFERENCES_KEY, &serde_json::to_string(&stored)?)
    }
}

/// String key-value storage, in the manner of browser local storage.
pub trait PreferenceStore: Send + Sync {
    /// Value stored under `key`, if any.
    fn get(&self, key: &str) -> PreferencesResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> PreferencesResult<()>;
}

/// Process-lifetime store, for tests and for sessions that should not persist.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> PreferencesResult<Option<String>> {
        Ok(self
            .values
            .read()
            .ok()
            .and_then(|values| values.get(key).cloned()))
    }

    fn set(&self, key: &str, value: &str) -> PreferencesResult<()> {
        if let Ok(mut values) = self.values.write() {
            values.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }
}

/// Store backed by a JSON object file mapping keys to string values.
#[derive(Debug, Clone)]
pub struct JsonFilePreferenceStore {
    path: PathBuf,
}

impl JsonFilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> PreferencesResult<HashMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(HashMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(PreferencesError::Io(e)),
        }
    }
}

impl PreferenceStore for JsonFilePreferenceStore {
    fn get(&self, key: &str) -> PreferencesResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> PreferencesResult<()> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&values)?)?;
        Ok(())
    }
}
