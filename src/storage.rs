//! High-score persistence.
//!
//! A tiny key-value store abstraction with a file-backed implementation
//! (one file per key) and an in-memory one, plus the `highScore` entry
//! handling on top.  Read failures degrade to a score of 0 and write
//! failures are logged; neither reaches the player.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// Name of the persisted entry.
pub const HIGH_SCORE_KEY: &str = "highScore";

/// Directory name used under the per-user data dir.
const APP_DIR: &str = "space_shooter";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &mut T {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

// ── File store ────────────────────────────────────────────────────────────────

/// Stores each key as `<dir>/<key>` containing the raw value.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `<data dir>/space_shooter`, falling back to `$HOME`, then the
    /// working directory.
    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;

        // Write-then-rename so a crash never leaves a half-written value
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| StoreError::Io { path, source })
    }
}

// ── Memory store ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ── High score entry ──────────────────────────────────────────────────────────

/// Reads and writes the single persisted high score.
#[derive(Debug)]
pub struct HighScoreStore<S> {
    store: S,
}

impl<S: KeyValueStore> HighScoreStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The stored high score; 0 when missing, unreadable or unparseable.
    pub fn load(&self) -> u32 {
        match self.store.get(HIGH_SCORE_KEY) {
            Ok(Some(raw)) => match raw.trim().parse() {
                Ok(score) => {
                    log::debug!("Loaded high score {}", score);
                    score
                }
                Err(_) => {
                    log::warn!("Ignoring unparseable high score {:?}", raw);
                    0
                }
            },
            Ok(None) => {
                log::info!("No high score stored, starting from 0");
                0
            }
            Err(e) => {
                log::warn!("Could not read high score: {}", e);
                0
            }
        }
    }

    pub fn save(&mut self, score: u32) {
        match self.store.set(HIGH_SCORE_KEY, &score.to_string()) {
            Ok(()) => log::debug!("High score {} saved", score),
            Err(e) => log::warn!("Could not save high score {}: {}", score, e),
        }
    }
}
