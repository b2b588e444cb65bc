use ndarray::{arr2, Array2};
use serde::{Deserialize, Serialize};

pub const N_FEATURES: usize = 4;

/// Field names in model input order.
pub const FEATURE_NAMES: [&str; N_FEATURES] = [
    "carbon_emissions",
    "energy_output",
    "renewability_index",
    "cost_efficiency",
];

/// Display labels, same order as `FEATURE_NAMES`.
pub const FEATURE_LABELS: [&str; N_FEATURES] = [
    "Carbon Emissions",
    "Energy Output",
    "Renewability Index",
    "Cost Efficiency",
];

pub const CLASS_LABELS: [(i64, &str); 2] = [(0, "No Adoption"), (1, "Adoption")];

/// The four model inputs. Missing fields deserialize to 0.0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureVector {
    pub carbon_emissions: f64,
    pub energy_output: f64,
    pub renewability_index: f64,
    pub cost_efficiency: f64,
}

impl FeatureVector {
    pub fn new(
        carbon_emissions: f64,
        energy_output: f64,
        renewability_index: f64,
        cost_efficiency: f64,
    ) -> Self {
        Self {
            carbon_emissions,
            energy_output,
            renewability_index,
            cost_efficiency,
        }
    }

    pub fn to_array(&self) -> [f64; N_FEATURES] {
        [
            self.carbon_emissions,
            self.energy_output,
            self.renewability_index,
            self.cost_efficiency,
        ]
    }

    /// Single-row model input, shape `(1, N_FEATURES)`.
    pub fn to_row(&self) -> Array2<f64> {
        arr2(&[self.to_array()])
    }
}

/// Human-readable text for a class label. Unknown labels render as their number.
pub fn label_text(label: i64) -> String {
    CLASS_LABELS
        .iter()
        .find(|(class, _)| *class == label)
        .map(|(_, text)| text.to_string())
        .unwrap_or_else(|| label.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prediction {
    pub label: i64,
    pub text: String,
}

impl Prediction {
    pub fn from_label(label: i64) -> Self {
        Self {
            label,
            text: label_text(label),
        }
    }

    /// Only label 1 gets the success card.
    pub fn is_adoption(&self) -> bool {
        self.label == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_keeps_field_order() {
        let features = FeatureVector::new(10.5, 200.0, 0.8, 0.65);
        let row = features.to_row();

        assert_eq!(row.dim(), (1, N_FEATURES));
        assert_eq!(row.row(0).to_vec(), vec![10.5, 200.0, 0.8, 0.65]);
    }

    #[test]
    fn known_labels_map_to_text() {
        assert_eq!(label_text(0), "No Adoption");
        assert_eq!(label_text(1), "Adoption");
    }

    #[test]
    fn unknown_labels_fall_back_to_decimal() {
        assert_eq!(label_text(2), "2");
        assert_eq!(label_text(-7), "-7");

        let prediction = Prediction::from_label(3);
        assert_eq!(prediction.text, "3");
        assert!(!prediction.is_adoption());
    }

    #[test]
    fn missing_json_fields_default_to_zero() {
        let parsed: FeatureVector = serde_json::from_str(r#"{"energy_output": 12.5}"#).unwrap();
        assert_eq!(parsed, FeatureVector::new(0.0, 12.5, 0.0, 0.0));
    }
}
