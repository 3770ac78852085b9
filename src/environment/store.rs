//! Persistent key-value storage.
//!
//! Backs message overrides, per-check enabled/severity overrides and check
//! settings. Keys are plain dotted strings (`messages.<id>.<type>`).

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use anyhow::{anyhow, Context};

use crate::error::{AuditError, Result};

/// Minimal persistence contract.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;

    fn remove(&self, key: &str) -> anyhow::Result<()>;
}

/// Volatile store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.values.read().map(|v| v.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let values = self.values.read().map_err(|_| anyhow!("store lock poisoned"))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut values = self
            .values
            .write()
            .map_err(|_| anyhow!("store lock poisoned"))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        let mut values = self
            .values
            .write()
            .map_err(|_| anyhow!("store lock poisoned"))?;
        values.remove(key);
        Ok(())
    }
}

/// YAML-file store.
///
/// Reads are served from an in-memory copy. Writers are serialized by a
/// mutex and each write persists the whole map with write-to-temp-then-rename,
/// so a crash never leaves a partially written file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: RwLock<BTreeMap<String, String>>,
    writer: Mutex<()>,
}

impl FileStore {
    /// Open a store, loading existing contents if the file exists.
    pub fn open(path: &Path) -> Result<Self> {
        let values = if path.exists() {
            let content = fs::read_to_string(path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_yaml::from_str(&content).map_err(|e| AuditError::ConfigParseError {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            values: RwLock::new(values),
            writer: Mutex::new(()),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn update<F>(&self, change: F) -> anyhow::Result<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let _guard = self.writer.lock().map_err(|_| anyhow!("store lock poisoned"))?;

        let mut next = self
            .values
            .read()
            .map_err(|_| anyhow!("store lock poisoned"))?
            .clone();
        change(&mut next);
        self.persist(&next)?;

        // Readers only see values that reached disk.
        *self
            .values
            .write()
            .map_err(|_| anyhow!("store lock poisoned"))? = next;
        Ok(())
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> anyhow::Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("creating {}", dir.display()))?;
            }
        }

        let content = serde_yaml::to_string(values)?;
        let temp_path = self.path.with_extension("yml.tmp");
        fs::write(&temp_path, content)
            .with_context(|| format!("writing {}", temp_path.display()))?;
        fs::rename(&temp_path, &self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let values = self.values.read().map_err(|_| anyhow!("store lock poisoned"))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.update(|values| {
            values.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        self.update(|values| {
            values.remove(key);
        })
    }
}
