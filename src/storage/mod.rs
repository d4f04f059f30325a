//! Single-record storage
//!
//! The unit of storage is the whole record: every write replaces the previous
//! record entirely and a read returns whatever was written last.

mod memory;
mod persistence;

pub use memory::MemoryStore;
pub use persistence::FileStore;

use thiserror::Error;
use crate::reading::StoredRecord;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization failed: {0}")]
    Serialization(serde_json::Error),
    #[error("Stored record is corrupt: {0}")]
    Corrupt(serde_json::Error),
    #[error("Store lock poisoned")]
    Poisoned,
}

/// Durable slot holding the most recent record, shared by all requests
pub trait RecordStore: Send + Sync {
    /// Most recently written record, or the empty record if nothing was written
    fn read(&self) -> Result<StoredRecord, StorageError>;

    /// Replace the stored record with `record`
    fn write(&self, record: &StoredRecord) -> Result<(), StorageError>;
}
