//! Persisted key-value preferences
//!
//! Stands in for the browser's local storage. Values are plain strings.

use crate::utils::error::{IntoPageError, Result, WatchPageError};
use log::{debug, warn};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Key-value preference storage
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail, like a full or disabled storage
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            return Err(WatchPageError::Storage("storage is read-only".to_string()));
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store persisted as a flat JSON object on disk
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file starts empty; an unreadable one
    /// is logged and replaced on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(data) => serde_json::from_str(&data).unwrap_or_else(|e| {
                warn!("Discarding malformed preferences at {:?}: {}", path, e);
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        debug!("Loaded {} preference(s) from {:?}", values.len(), path);

        Self { path, values }
    }

    /// Open the store in the user's config directory
    pub fn open_default() -> Result<Self> {
        let path = Self::default_path()
            .ok_or_else(|| WatchPageError::Storage("Cannot determine config directory".to_string()))?;
        Ok(Self::open(path))
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("watchpage").join("preferences.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).storage_err("Creating preferences directory")?;
        }
        let data = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, data).storage_err("Writing preferences")?;
        Ok(())
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }
}
