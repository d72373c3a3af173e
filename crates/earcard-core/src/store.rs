//! Settings persistence over a flat key/value store.
//!
//! Settings live under a single versioned key as a JSON object. There is no
//! migration: a schema change means old data merges over the new defaults
//! field by field, or is discarded if it is not an object at all.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::Value;

use crate::error::{CoreError, CoreResult};
use crate::settings::Settings;

/// Storage key for the settings blob. The suffix is the schema version tag.
pub const SETTINGS_KEY: &str = "interval-trainer-settings-v1";

/// A flat string key/value store.
pub trait KeyValueStore {
    /// Returns the value for `key`, or `None` if absent or unreadable.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> CoreResult<()>;
}

/// In-process store backed by a map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding one entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::default();
        store
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.into(), value.into());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed store: one `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct DirStore {
    dir: PathBuf,
}

impl DirStore {
    /// Creates a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory holding the entries.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file backing `key`.
    pub fn path_for(&self, key: &str) -> CoreResult<PathBuf> {
        if key.is_empty()
            || key.starts_with('.')
            || key.contains(['/', '\\'])
        {
            return Err(CoreError::invalid_key(
                key,
                "must be a non-empty file name without path separators",
            ));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for DirStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key).ok()?;
        match fs::read_to_string(&path) {
            Ok(contents) => Some(contents),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("could not read {}: {}", path.display(), e);
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(path, value)?;
        Ok(())
    }
}

/// Loads and saves [`Settings`] through a [`KeyValueStore`].
#[derive(Debug)]
pub struct SettingsStore<S> {
    store: S,
}

impl<S: KeyValueStore> SettingsStore<S> {
    /// Wraps a key/value store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying key/value store.
    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Loads settings, merging persisted fields over the defaults.
    ///
    /// Never fails: absent or malformed data yields [`Settings::default`].
    pub fn load(&self) -> Settings {
        let Some(raw) = self.store.get(SETTINGS_KEY) else {
            return Settings::default();
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(object)) => Settings::merged_over_defaults(&object),
            Ok(_) => {
                tracing::warn!("persisted settings are not an object; using defaults");
                Settings::default()
            }
            Err(e) => {
                tracing::warn!("persisted settings are not valid JSON ({}); using defaults", e);
                Settings::default()
            }
        }
    }

    /// Persists settings verbatim.
    pub fn save(&self, settings: &Settings) -> CoreResult<()> {
        let json = serde_json::to_string(settings)?;
        self.store.set(SETTINGS_KEY, &json)
    }
}
