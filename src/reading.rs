//! Sensor readings and the persisted record built from them
//!
//! A reading keeps whatever the client sent: the five known channels are
//! pulled out and validated as numbers, every other key is carried along
//! untouched so the stored record mirrors the request body.

use serde::{Serialize, Deserialize};
use serde_json::{Map, Number, Value};
use thiserror::Error;
use crate::detection::{AnomalySet, Category};

/// Key under which the anomaly set is embedded in a stored record
pub const ANOMALIES_KEY: &str = "anomalies";

#[derive(Debug, Error)]
pub enum ReadingError {
    #[error("Invalid reading: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// One submitted set of sensor values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    #[serde(rename = "BPM", default, skip_serializing_if = "Option::is_none")]
    pub bpm: Option<Number>,
    #[serde(rename = "SpO2", default, skip_serializing_if = "Option::is_none")]
    pub spo2: Option<Number>,
    #[serde(rename = "Temperature", default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Number>,
    #[serde(rename = "Humidity", default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<Number>,
    #[serde(rename = "Steps", default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Number>,
    /// Any other keys the client supplied
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Reading {
    /// Decode a request body. Anything that is not a JSON object, or that
    /// carries a non-numeric value for a known channel, is rejected.
    ///
    /// The body goes through a `Value` first so a repeated key keeps its last
    /// occurrence instead of failing the derived field check.
    pub fn from_slice(body: &[u8]) -> Result<Self, ReadingError> {
        let value: Value = serde_json::from_slice(body)?;
        Reading::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, ReadingError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn get(&self, category: Category) -> Option<&Number> {
        match category {
            Category::Bpm => self.bpm.as_ref(),
            Category::SpO2 => self.spo2.as_ref(),
            Category::Temperature => self.temperature.as_ref(),
            Category::Humidity => self.humidity.as_ref(),
            Category::Steps => self.steps.as_ref(),
        }
    }

    /// Numeric value of a channel, with an absent channel read as 0
    pub fn value_or_zero(&self, category: Category) -> f64 {
        self.get(category)
            .and_then(Number::as_f64)
            .unwrap_or(0.0)
    }
}

/// The single most recent reading together with its anomalies
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    #[serde(flatten)]
    pub reading: Reading,
    /// Absent only on the empty record a fresh store starts with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anomalies: Option<AnomalySet>,
}

impl StoredRecord {
    /// Attach freshly computed anomalies to a reading. A client-supplied
    /// `anomalies` key is discarded in favour of the computed set.
    pub fn new(mut reading: Reading, anomalies: AnomalySet) -> Self {
        reading.extra.remove(ANOMALIES_KEY);
        StoredRecord {
            reading,
            anomalies: Some(anomalies),
        }
    }

    /// Anomalies of the record, empty if none were ever attached
    pub fn anomalies(&self) -> AnomalySet {
        self.anomalies.clone().unwrap_or_default()
    }
}
