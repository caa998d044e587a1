//! JSON file store with atomic writes
//!
//! The whole store lives in one JSON object mapping keys to raw string
//! values. Every mutation rewrites the file with the temp-file-then-rename
//! pattern:
//! 1. Write to `<file>.tmp.<pid>.<timestamp>`
//! 2. Fsync to disk
//! 3. Rename over the original (atomic operation)
//!
//! On failure before the rename, the temp file is preserved as a safety copy.

use crate::error::{Result, StoreError};
use crate::LayoutStore;
use chrono::Local;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

type Entries = BTreeMap<String, String>;

/// Store persisted as a single JSON object file.
///
/// Nothing is cached: every read goes to disk, so two `FileStore`s on the
/// same path observe each other's writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store backed by `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the backing file. A missing file reads as `None`.
    fn load(&self) -> Result<Option<Entries>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Io(e)),
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| StoreError::Parse(e.to_string()))
    }

    /// Entries to start a mutation from. An unparsable file is replaced
    /// rather than blocking every future write.
    fn load_for_update(&self) -> Result<Entries> {
        match self.load() {
            Ok(entries) => Ok(entries.unwrap_or_default()),
            Err(StoreError::Parse(message)) => {
                log::warn!(
                    "Discarding unparsable store {}: {}",
                    self.path.display(),
                    message
                );
                Ok(Entries::new())
            }
            Err(e) => Err(e),
        }
    }

    /// `<file>.tmp.<pid>.<timestamp>` next to the backing file.
    fn temp_path(&self) -> PathBuf {
        let timestamp = Local::now().format("%Y%m%d-%H%M%S%.3f").to_string();
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "store.json".to_string());
        self.path.with_file_name(format!(
            "{}.tmp.{}.{}",
            file_name,
            std::process::id(),
            timestamp
        ))
    }

    fn save_atomic(&self, entries: &Entries) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(StoreError::Io)?;
        }

        let temp_path = self.temp_path();

        let json =
            serde_json::to_string_pretty(entries).map_err(|e| StoreError::Parse(e.to_string()))?;

        fs::write(&temp_path, json).map_err(StoreError::Io)?;

        let file = fs::File::open(&temp_path).map_err(StoreError::Io)?;
        file.sync_all().map_err(StoreError::Io)?;

        fs::rename(&temp_path, &self.path).map_err(|_| StoreError::WriteAtomic {
            path: self.path.clone(),
            temp_path: temp_path.clone(),
        })?;

        log::debug!("Wrote {} keys to {}", entries.len(), self.path.display());
        Ok(())
    }
}

impl LayoutStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.and_then(|mut entries| entries.remove(key)))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.load_for_update()?;
        entries.insert(key.to_string(), value.to_string());
        self.save_atomic(&entries)
    }

    /// All pairs land in one atomic rewrite of the file.
    fn write_all(&mut self, pairs: &[(&str, &str)]) -> Result<()> {
        let mut entries = self.load_for_update()?;
        for &(key, value) in pairs {
            entries.insert(key.to_string(), value.to_string());
        }
        self.save_atomic(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut entries = self.load_for_update()?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.save_atomic(&entries)
    }
}
