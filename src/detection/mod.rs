//! Fixed-threshold anomaly detection
//!
//! Every channel of a reading is checked on its own against a static safe
//! band. There is no history involved: the same reading always produces the
//! same anomaly set.

mod thresholds;
mod precautions;

pub use thresholds::{Band, Category};
pub use precautions::{precaution, Precautions};

use serde::{Serialize, Deserialize};
use std::collections::BTreeMap;
use std::fmt;
use crate::reading::Reading;

/// Channels found outside their band, each with a description
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnomalySet(BTreeMap<Category, String>);

impl AnomalySet {
    pub fn new() -> Self {
        AnomalySet(BTreeMap::new())
    }

    pub fn flag(&mut self, category: Category) {
        self.0.insert(category, category.anomaly_message().to_string());
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.0.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AnomalySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, category) in self.categories().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", category)?;
        }
        Ok(())
    }
}

/// Check each channel of `reading` against its band.
///
/// Absent channels are evaluated as 0, so an omitted BPM, SpO2, Temperature
/// or Humidity is always flagged while an omitted step count never is.
pub fn evaluate(reading: &Reading) -> AnomalySet {
    let mut anomalies = AnomalySet::new();
    for category in Category::ALL {
        let value = reading.value_or_zero(category);
        if !category.band().contains(value) {
            anomalies.flag(category);
        }
    }
    anomalies
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reading(value: serde_json::Value) -> Reading {
        Reading::from_value(value).unwrap()
    }

    #[test]
    fn test_healthy_reading_has_no_anomalies() {
        let anomalies = evaluate(&reading(json!({
            "BPM": 72,
            "SpO2": 98,
            "Temperature": 36.6,
            "Humidity": 45,
            "Steps": 4200
        })));
        assert!(anomalies.is_empty());
    }

    #[test]
    fn test_boundary_values_pass() {
        let low = evaluate(&reading(json!({
            "BPM": 60, "SpO2": 92, "Temperature": 35, "Humidity": 20, "Steps": 0
        })));
        let high = evaluate(&reading(json!({
            "BPM": 120, "SpO2": 100, "Temperature": 38, "Humidity": 60, "Steps": 10000
        })));
        assert!(low.is_empty());
        assert!(high.is_empty());
    }

    #[test]
    fn test_each_channel_flags_independently() {
        let anomalies = evaluate(&reading(json!({
            "BPM": 121, "SpO2": 91.5, "Temperature": 38.2, "Humidity": 19, "Steps": 10001
        })));
        assert_eq!(anomalies.len(), 5);
        assert_eq!(
            serde_json::to_value(&anomalies).unwrap(),
            json!({
                "BPM": "Anomalous BPM detected!",
                "SpO2": "Anomalous SpO2 level detected!",
                "Temperature": "Temperature out of range!",
                "Humidity": "Humidity out of acceptable range!",
                "Steps": "Unusual step count!"
            })
        );
    }

    #[test]
    fn test_missing_channels_count_as_zero() {
        let anomalies = evaluate(&reading(json!({})));
        let flagged: Vec<Category> = anomalies.categories().collect();
        assert_eq!(
            flagged,
            vec![Category::Bpm, Category::SpO2, Category::Temperature, Category::Humidity]
        );
    }

    #[test]
    fn test_partial_reading() {
        let anomalies = evaluate(&reading(json!({"BPM": 150, "SpO2": 98})));
        let flagged: Vec<Category> = anomalies.categories().collect();
        assert_eq!(
            flagged,
            vec![Category::Bpm, Category::Temperature, Category::Humidity]
        );
    }

    #[test]
    fn test_null_channel_treated_as_missing() {
        let anomalies = evaluate(&reading(json!({
            "BPM": null, "SpO2": 95, "Temperature": 36, "Humidity": 40
        })));
        assert_eq!(anomalies.categories().collect::<Vec<_>>(), vec![Category::Bpm]);
    }

    #[test]
    fn test_anomaly_set_serializes_by_wire_name() {
        let mut anomalies = AnomalySet::new();
        anomalies.flag(Category::SpO2);
        assert_eq!(
            serde_json::to_value(&anomalies).unwrap(),
            json!({"SpO2": "Anomalous SpO2 level detected!"})
        );
    }

    #[test]
    fn test_display_lists_wire_names() {
        let anomalies = evaluate(&reading(json!({"BPM": 72, "SpO2": 97, "Steps": 20000})));
        assert_eq!(anomalies.to_string(), "Temperature, Humidity, Steps");
        assert_eq!(AnomalySet::new().to_string(), "");
    }

    #[test]
    fn test_unknown_anomaly_key_rejected() {
        let parsed = serde_json::from_value::<AnomalySet>(json!({"Pressure": "high"}));
        assert!(parsed.is_err());
    }
}
