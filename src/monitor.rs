//! Ingestion and query flows over the record store

use std::sync::Arc;
use serde::Serialize;
use thiserror::Error;
use tokio::task::{self, JoinError};
use tracing::{debug, info};

use crate::detection::{self, AnomalySet, Precautions};
use crate::reading::{Reading, ReadingError, StoredRecord};
use crate::storage::{RecordStore, StorageError};

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error(transparent)]
    Reading(#[from] ReadingError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Background task failed: {0}")]
    Task(#[from] JoinError),
}

/// Latest record with its anomalies and the advice that goes with them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub data: StoredRecord,
    pub anomalies: AnomalySet,
    pub precautions: Precautions,
}

pub struct Monitor {
    store: Arc<dyn RecordStore>,
}

impl Monitor {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Monitor { store }
    }

    /// Decode a reading, evaluate it and persist it as the new latest record.
    pub fn ingest(&self, body: &[u8]) -> Result<AnomalySet, MonitorError> {
        let reading = Reading::from_slice(body)?;
        debug!(?reading, "received reading");

        let anomalies = detection::evaluate(&reading);
        if !anomalies.is_empty() {
            info!(count = anomalies.len(), categories = %anomalies, "anomalies detected");
        }

        let record = StoredRecord::new(reading, anomalies.clone());
        self.store.write(&record)?;

        Ok(anomalies)
    }

    /// Runs [`Monitor::ingest`] on the blocking pool, since the store does
    /// synchronous file I/O.
    pub async fn ingest_blocking<B>(self: Arc<Self>, body: B) -> Result<AnomalySet, MonitorError>
    where
        B: AsRef<[u8]> + Send + 'static,
    {
        task::spawn_blocking(move || self.ingest(body.as_ref())).await?
    }

    pub async fn snapshot_blocking(self: Arc<Self>) -> Result<Snapshot, MonitorError> {
        task::spawn_blocking(move || self.snapshot()).await?
    }

    /// Current record plus precautions for each of its anomalies.
    pub fn snapshot(&self) -> Result<Snapshot, MonitorError> {
        let data = self.store.read()?;
        let anomalies = data.anomalies();
        let precautions = Precautions::for_anomalies(&anomalies);

        Ok(Snapshot {
            data,
            anomalies,
            precautions,
        })
    }
}
