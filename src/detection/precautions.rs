use serde::Serialize;
use std::collections::BTreeMap;
use super::{AnomalySet, Category};

/// Advisory text shown alongside an anomaly of the given category
pub fn precaution(category: Category) -> &'static str {
    match category {
        Category::Bpm => "Consult a doctor if BPM is too high or low.",
        Category::SpO2 => "Increase oxygen intake or consult a healthcare provider.",
        Category::Temperature => "Drink water, rest, or seek medical advice if fever persists.",
        Category::Humidity => "Use a humidifier or dehumidifier as needed.",
        Category::Steps => "Reduce excessive physical activity.",
    }
}

/// Precautions keyed by category, one per anomaly present
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Precautions(BTreeMap<Category, &'static str>);

impl Precautions {
    pub fn for_anomalies(anomalies: &AnomalySet) -> Self {
        Precautions(
            anomalies
                .categories()
                .map(|category| (category, precaution(category)))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_advice() {
        for category in Category::ALL {
            assert!(!precaution(category).is_empty());
        }
    }

    #[test]
    fn test_only_flagged_categories_get_precautions() {
        let mut anomalies = AnomalySet::new();
        anomalies.flag(Category::Temperature);
        anomalies.flag(Category::Steps);

        let precautions = Precautions::for_anomalies(&anomalies);
        assert_eq!(
            serde_json::to_value(&precautions).unwrap(),
            serde_json::json!({
                "Temperature": "Drink water, rest, or seek medical advice if fever persists.",
                "Steps": "Reduce excessive physical activity."
            })
        );
    }

    #[test]
    fn test_no_anomalies_no_precautions() {
        let precautions = Precautions::for_anomalies(&AnomalySet::new());
        assert_eq!(precautions, Precautions::default());
        assert_eq!(serde_json::to_string(&precautions).unwrap(), "{}");
    }
}
