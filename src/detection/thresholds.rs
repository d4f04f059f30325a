use serde::{Serialize, Deserialize};
use std::fmt;

/// The five sensor channels a reading can carry.
///
/// Serialized under the wire names clients send (`BPM`, `SpO2`, ...), which
/// are also the keys of the anomaly and precaution maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "BPM")]
    Bpm,
    #[serde(rename = "SpO2")]
    SpO2,
    Temperature,
    Humidity,
    Steps,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Bpm,
        Category::SpO2,
        Category::Temperature,
        Category::Humidity,
        Category::Steps,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Bpm => "BPM",
            Category::SpO2 => "SpO2",
            Category::Temperature => "Temperature",
            Category::Humidity => "Humidity",
            Category::Steps => "Steps",
        }
    }

    /// Safe operating band for this channel
    pub fn band(&self) -> Band {
        match self {
            Category::Bpm => Band::between(60.0, 120.0),
            Category::SpO2 => Band::between(92.0, 100.0),
            Category::Temperature => Band::between(35.0, 38.0),
            Category::Humidity => Band::between(20.0, 60.0),
            Category::Steps => Band::at_most(10_000.0),
        }
    }

    /// Description recorded when a value falls outside the band
    pub fn anomaly_message(&self) -> &'static str {
        match self {
            Category::Bpm => "Anomalous BPM detected!",
            Category::SpO2 => "Anomalous SpO2 level detected!",
            Category::Temperature => "Temperature out of range!",
            Category::Humidity => "Humidity out of acceptable range!",
            Category::Steps => "Unusual step count!",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Closed interval of acceptable values. A missing lower bound means the
/// channel only has a ceiling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub min: Option<f64>,
    pub max: f64,
}

impl Band {
    pub const fn between(min: f64, max: f64) -> Self {
        Band { min: Some(min), max }
    }

    pub const fn at_most(max: f64) -> Self {
        Band { min: None, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        let above_min = self.min.map_or(true, |min| value >= min);
        above_min && value <= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_inclusive() {
        let band = Category::Bpm.band();
        assert!(band.contains(60.0));
        assert!(band.contains(120.0));
        assert!(!band.contains(59.9));
        assert!(!band.contains(120.1));
    }

    #[test]
    fn test_steps_has_no_floor() {
        let band = Category::Steps.band();
        assert!(band.contains(0.0));
        assert!(band.contains(-5.0));
        assert!(band.contains(10_000.0));
        assert!(!band.contains(10_001.0));
    }

    #[test]
    fn test_wire_names() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.name()));
        }
        let parsed: Category = serde_json::from_str("\"SpO2\"").unwrap();
        assert_eq!(parsed, Category::SpO2);
        assert!(serde_json::from_str::<Category>("\"Pressure\"").is_err());
    }
}
