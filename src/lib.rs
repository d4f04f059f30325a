//! Vitalsink: a single-record sensor telemetry endpoint
//!
//! Readings arrive over HTTP, are checked against fixed safe bands, and the
//! most recent one is kept together with its anomalies so it can be served
//! back with precaution advice.

pub mod api;
pub mod config;
pub mod detection;
pub mod error;
pub mod monitor;
pub mod reading;
pub mod storage;

pub use detection::{evaluate, AnomalySet, Category, Precautions};
pub use error::AppError;
pub use monitor::{Monitor, MonitorError, Snapshot};
pub use reading::{Reading, StoredRecord};
pub use storage::{FileStore, MemoryStore, RecordStore, StorageError};
