//! Persisted user preferences
//!
//! A small JSON key-value store under the user configuration directory.
//! Successful runs persist the options the user picked so later runs can use
//! them as defaults; `--reset-preferences` wipes the store.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{AppstampError, Result};

/// Environment variable overriding the preferences location (used by tests)
pub const CONFIG_DIR_ENV: &str = "APPSTAMP_CONFIG_DIR";

const STORE_FILE: &str = "preferences.json";

fn store_failed(reason: impl ToString) -> AppstampError {
    AppstampError::PreferencesFailed {
        reason: reason.to_string(),
    }
}

fn store_path() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(dir).join(STORE_FILE));
    }
    let base = dirs::config_dir().ok_or_else(|| store_failed("no user config directory"))?;
    Ok(base.join("appstamp").join(STORE_FILE))
}

/// The preference store, loaded once per invocation
#[derive(Debug)]
pub struct Preferences {
    path: PathBuf,
    values: Map<String, Value>,
}

impl Preferences {
    /// Load from the default store location
    pub fn load() -> Result<Self> {
        Self::load_from(&store_path()?)
    }

    /// Load from an explicit path; a missing or unreadable store starts empty
    pub fn load_from(path: &Path) -> Result<Self> {
        let values = match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Map::new(),
        };
        Ok(Self {
            path: path.to_path_buf(),
            values,
        })
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.get(key).and_then(Value::as_bool)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// Persist the store, creating parent directories as needed
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(store_failed)?;
        }
        let content = serde_json::to_string_pretty(&self.values).map_err(store_failed)?;
        std::fs::write(&self.path, content).map_err(store_failed)
    }

    /// Remove every stored preference
    pub fn clear(&mut self) -> Result<()> {
        self.values.clear();
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(store_failed(e)),
        }
    }
}
