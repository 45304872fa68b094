//! Small string key-value store used for remembered settings.
//!
//! The file-backed store keeps one JSON object at
//! `~/.local/share/nagare/store.json` (or the platform equivalent via the
//! `directories` crate).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::CliError;

const FILE_NAME: &str = "store.json";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), CliError>;

    /// Remove every key starting with `prefix`, returning how many were removed.
    fn clear(&mut self, prefix: &str) -> Result<usize, CliError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CliError> {
        (**self).set(key, value)
    }

    fn clear(&mut self, prefix: &str) -> Result<usize, CliError> {
        (**self).clear(prefix)
    }
}

/// In-process store, nothing is written anywhere.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CliError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&mut self, prefix: &str) -> Result<usize, CliError> {
        Ok(remove_prefixed(&mut self.entries, prefix))
    }
}

/// Store persisted as a JSON object; every write rewrites the file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), "Ignoring corrupt store file: {e}");
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        Self { path, entries }
    }

    /// Open the store at its per-user location.
    pub fn open_default() -> Self {
        Self::open(default_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), CliError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, json)?;
        tracing::debug!(path = %self.path.display(), keys = self.entries.len(), "store written");
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CliError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn clear(&mut self, prefix: &str) -> Result<usize, CliError> {
        let removed = remove_prefixed(&mut self.entries, prefix);
        if removed > 0 {
            self.flush()?;
        }
        Ok(removed)
    }
}

fn remove_prefixed(entries: &mut BTreeMap<String, String>, prefix: &str) -> usize {
    let before = entries.len();
    entries.retain(|key, _| !key.starts_with(prefix));
    before - entries.len()
}

/// Path to the store file (XDG on Linux, AppData on Windows).
pub fn default_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "nagare")
        .map(|dirs| dirs.data_dir().join(FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(FILE_NAME))
}
