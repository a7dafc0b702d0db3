//! File-backed preference store
//!
//! Preferences are stored in `~/.config/editor-prefs/preferences.json` as a
//! flat JSON object of scalar values.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use crate::error::{PrefsError, Result};
use crate::store::KeyValueStore;
use crate::types::PrefValue;

const APP_DIR: &str = "editor-prefs";

/// Get the directory holding preference and config files
pub fn prefs_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Get the default path of the preference file
pub fn default_store_path() -> PathBuf {
    prefs_dir().join("preferences.json")
}

/// A `KeyValueStore` persisted to a JSON file.
///
/// Values are held in memory and the whole file is rewritten on every change.
pub struct JsonFileStore {
    path: PathBuf,
    values: RwLock<BTreeMap<String, PrefValue>>,
}

impl JsonFileStore {
    /// Open the store at `path`.
    ///
    /// A missing file is an empty store and is not created until the first
    /// write. A file that exists but can't be read or parsed is an error, so
    /// a corrupt file is never silently overwritten.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|source| PrefsError::Parse { path: path.clone(), source })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(PrefsError::io(&path, e)),
        };
        log::debug!("loaded {} preference(s) from {}", values.len(), path.display());

        Ok(Self { path, values: RwLock::new(values) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the current values to disk (atomic write)
    ///
    /// Creates the parent directory if needed, then uses
    /// write-to-temp-then-rename so a crash never leaves a truncated file.
    pub fn flush(&self) -> Result<()> {
        let json = {
            let values = self.values.read();
            serde_json::to_string_pretty(&*values)
                .map_err(|source| PrefsError::Parse { path: self.path.clone(), source })?
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| PrefsError::io(parent, e))?;
        }

        let temp = self.path.with_extension("json.tmp");
        fs::write(&temp, json).map_err(|e| PrefsError::io(&temp, e))?;
        fs::rename(&temp, &self.path).map_err(|e| PrefsError::io(&self.path, e))?;

        log::debug!("wrote preferences to {}", self.path.display());
        Ok(())
    }

    fn persist(&self) {
        if let Err(e) = self.flush() {
            log::warn!("failed to save preferences: {e}");
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<PrefValue> {
        self.values.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: PrefValue) {
        self.values.write().insert(key.to_string(), value);
        self.persist();
    }

    fn remove(&self, key: &str) {
        let removed = self.values.write().remove(key).is_some();
        if removed {
            self.persist();
        }
    }

    fn keys(&self) -> Vec<String> {
        self.values.read().keys().cloned().collect()
    }
}
