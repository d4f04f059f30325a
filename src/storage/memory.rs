use std::sync::RwLock;

use super::{RecordStore, StorageError};
use crate::reading::StoredRecord;

/// Non-durable store holding the record in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    record: RwLock<StoredRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl RecordStore for MemoryStore {
    fn read(&self) -> Result<StoredRecord, StorageError> {
        let record = self.record.read().map_err(|_| StorageError::Poisoned)?;
        Ok(record.clone())
    }

    fn write(&self, record: &StoredRecord) -> Result<(), StorageError> {
        let mut slot = self.record.write().map_err(|_| StorageError::Poisoned)?;
        *slot = record.clone();
        Ok(())
    }
}
