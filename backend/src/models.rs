use adoption_inference::{FeatureVector, FormError, FEATURE_LABELS, FEATURE_NAMES};
use serde::{Deserialize, Serialize};

/// Raw form submission. Every field is optional text so blanks can default.
#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct FormInputs {
    pub carbon_emissions: Option<String>,
    pub energy_output: Option<String>,
    pub renewability_index: Option<String>,
    pub cost_efficiency: Option<String>,
}

impl FormInputs {
    /// Coerce the four fields to a `FeatureVector`. Blank means 0.0.
    pub fn read(&self) -> Result<FeatureVector, FormError> {
        Ok(FeatureVector::new(
            coerce(FEATURE_LABELS[0], self.carbon_emissions.as_deref())?,
            coerce(FEATURE_LABELS[1], self.energy_output.as_deref())?,
            coerce(FEATURE_LABELS[2], self.renewability_index.as_deref())?,
            coerce(FEATURE_LABELS[3], self.cost_efficiency.as_deref())?,
        ))
    }

    /// Best-effort values for re-rendering the inputs after a failed read.
    pub fn lenient(&self) -> FeatureVector {
        let keep = |raw: Option<&str>| coerce("", raw).unwrap_or(0.0);
        FeatureVector::new(
            keep(self.carbon_emissions.as_deref()),
            keep(self.energy_output.as_deref()),
            keep(self.renewability_index.as_deref()),
            keep(self.cost_efficiency.as_deref()),
        )
    }
}

fn coerce(field: &'static str, raw: Option<&str>) -> Result<f64, FormError> {
    let text = raw.map(str::trim).unwrap_or("");
    if text.is_empty() {
        return Ok(0.0);
    }
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(FormError::InvalidInput {
            field,
            value: text.to_string(),
        }),
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub timestamp: String,
    pub execution_time_ms: Option<u64>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
            execution_time_ms: None,
        }
    }

    pub fn error(message: &str) -> Self {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message.to_string()),
            timestamp: chrono::Utc::now().to_rfc3339(),
            execution_time_ms: None,
        }
    }

    pub fn timed(mut self, start: std::time::Instant) -> Self {
        self.execution_time_ms = Some(start.elapsed().as_millis() as u64);
        self
    }
}

#[derive(Debug, Serialize)]
pub struct ClassLabel {
    pub label: i64,
    pub text: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub model_path: String,
    pub loaded: bool,
    pub status: String,
    pub input_shape: [usize; 2],
    pub features: Vec<&'static str>,
    pub class_labels: Vec<ClassLabel>,
}

impl ModelInfo {
    pub fn new(model_path: String, status: Result<(), &FormError>) -> Self {
        let (loaded, status) = match status {
            Ok(()) => (true, "ready".to_string()),
            Err(e) => (false, e.to_string()),
        };
        ModelInfo {
            model_path,
            loaded,
            status,
            input_shape: [1, FEATURE_NAMES.len()],
            features: FEATURE_NAMES.to_vec(),
            class_labels: adoption_inference::CLASS_LABELS
                .iter()
                .map(|(label, text)| ClassLabel {
                    label: *label,
                    text: *text,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(values: [&str; 4]) -> FormInputs {
        FormInputs {
            carbon_emissions: Some(values[0].to_string()),
            energy_output: Some(values[1].to_string()),
            renewability_index: Some(values[2].to_string()),
            cost_efficiency: Some(values[3].to_string()),
        }
    }

    #[test]
    fn reads_in_feature_order() {
        let features = inputs(["10.5", "200.0", "0.8", "0.65"]).read().unwrap();
        assert_eq!(features.to_array(), [10.5, 200.0, 0.8, 0.65]);
    }

    #[test]
    fn blanks_and_missing_fields_default_to_zero() {
        let mut form = inputs(["", " ", "1e3", "-2"]);
        form.cost_efficiency = None;

        let features = form.read().unwrap();
        assert_eq!(features.to_array(), [0.0, 0.0, 1000.0, 0.0]);
    }

    #[test]
    fn non_numbers_name_the_field() {
        let err = inputs(["1", "lots", "0", "0"]).read().unwrap_err();
        match err {
            FormError::InvalidInput { field, value } => {
                assert_eq!(field, "Energy Output");
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_finite_values_are_rejected() {
        assert!(inputs(["inf", "0", "0", "0"]).read().is_err());
        assert!(inputs(["0", "0", "NaN", "0"]).read().is_err());
    }

    #[test]
    fn lenient_keeps_what_parses() {
        let features = inputs(["3.5", "oops", "", "1"]).lenient();
        assert_eq!(features.to_array(), [3.5, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn model_info_lists_labels() {
        let info = ModelInfo::new("m.onnx".to_string(), Ok(()));
        assert!(info.loaded);
        assert_eq!(info.features[2], "renewability_index");
        assert_eq!(info.class_labels[1].text, "Adoption");
    }
}
