use std::path::{Path, PathBuf};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::sync::Mutex;
use tracing::debug;

use super::{RecordStore, StorageError};
use crate::reading::StoredRecord;

/// Keeps the latest record as a single JSON document on disk
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    // Serializes reads and writes so a read never races a rename
    guard: Mutex<()>,
}

impl FileStore {
    /// Open the store at `path`, creating parent directories and an empty
    /// `{}` record if the file does not exist yet. An existing file is left
    /// as it is.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let store = FileStore {
            path,
            guard: Mutex::new(()),
        };

        if !store.path.exists() {
            debug!(path = %store.path.display(), "initializing empty record");
            store.write(&StoredRecord::default())?;
        }

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl RecordStore for FileStore {
    fn read(&self) -> Result<StoredRecord, StorageError> {
        let _guard = self.guard.lock().map_err(|_| StorageError::Poisoned)?;

        let mut file = File::open(&self.path)?;
        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer)?;

        serde_json::from_slice(&buffer).map_err(StorageError::Corrupt)
    }

    fn write(&self, record: &StoredRecord) -> Result<(), StorageError> {
        let serialized = serde_json::to_vec(record).map_err(StorageError::Serialization)?;

        let _guard = self.guard.lock().map_err(|_| StorageError::Poisoned)?;

        // Write to a temporary file first
        let temp_path = self.temp_path();
        let mut file = File::create(&temp_path)?;
        file.write_all(&serialized)?;
        file.sync_all()?;

        // Rename over the live file so readers see either the old or the new record
        if let Err(err) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(err.into());
        }

        Ok(())
    }
}
