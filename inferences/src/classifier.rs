use std::path::Path;
use std::sync::Arc;

use anyhow::anyhow;
use log::{debug, info};
use ndarray::ArrayView2;

use crate::error::FormError;
use crate::inference::OnnxClassifier;
use crate::types::{FeatureVector, Prediction};

/// A loaded model that assigns one integer class label per input row.
pub trait Classifier: Send + Sync {
    fn predict(&self, x: ArrayView2<'_, f64>) -> anyhow::Result<Vec<i64>>;
}

/// Load the model at `path`.
///
/// The path must name an existing file; anything the deserializer rejects is
/// reported as `ModelLoad` with the underlying cause attached.
pub fn load_model<P: AsRef<Path>>(path: P) -> Result<Arc<dyn Classifier>, FormError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(FormError::ModelNotFound {
            path: path.to_path_buf(),
        });
    }

    let model = OnnxClassifier::load(path).map_err(|source| FormError::ModelLoad {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Model loaded from {}", path.display());

    Ok(Arc::new(model))
}

/// Run one prediction for `features` and map the first returned label.
pub fn predict(model: &dyn Classifier, features: &FeatureVector) -> Result<Prediction, FormError> {
    let row = features.to_row();
    debug!("Predicting for row {:?}", row.row(0).to_vec());

    let labels = model.predict(row.view()).map_err(FormError::Prediction)?;
    let label = labels
        .first()
        .copied()
        .ok_or_else(|| FormError::Prediction(anyhow!("model returned no label")))?;

    Ok(Prediction::from_label(label))
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use super::*;

    struct Recording {
        labels: Vec<i64>,
        seen: Mutex<Vec<Vec<Vec<f64>>>>,
    }

    impl Recording {
        fn returning(labels: Vec<i64>) -> Self {
            Self {
                labels,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl Classifier for Recording {
        fn predict(&self, x: ArrayView2<'_, f64>) -> anyhow::Result<Vec<i64>> {
            let rows = x.outer_iter().map(|row| row.to_vec()).collect();
            self.seen.lock().unwrap().push(rows);
            Ok(self.labels.clone())
        }
    }

    struct Failing;

    impl Classifier for Failing {
        fn predict(&self, x: ArrayView2<'_, f64>) -> anyhow::Result<Vec<i64>> {
            Err(anyhow!("expected 7 features, got {}", x.ncols()))
        }
    }

    #[test]
    fn passes_exactly_one_row_in_order() {
        let model = Recording::returning(vec![1]);
        let features = FeatureVector::new(10.5, 200.0, 0.8, 0.65);

        let prediction = predict(&model, &features).unwrap();

        assert_eq!(prediction, Prediction::from_label(1));
        assert_eq!(prediction.text, "Adoption");
        let seen = model.seen.lock().unwrap();
        assert_eq!(*seen, vec![vec![vec![10.5, 200.0, 0.8, 0.65]]]);
    }

    #[test]
    fn arbitrary_finite_values_pass_through_untouched() {
        let model = Recording::returning(vec![0]);
        let features = FeatureVector::new(-1e300, f64::MIN_POSITIVE, 0.0, 123456.789012);

        let prediction = predict(&model, &features).unwrap();

        assert_eq!(prediction.text, "No Adoption");
        assert_eq!(
            model.seen.lock().unwrap()[0],
            vec![vec![-1e300, f64::MIN_POSITIVE, 0.0, 123456.789012]]
        );
    }

    #[test]
    fn failing_model_becomes_prediction_error() {
        let err = predict(&Failing, &FeatureVector::default()).unwrap_err();

        assert!(matches!(err, FormError::Prediction(_)));
        assert!(err.detail().unwrap().contains("expected 7 features, got 4"));
    }

    #[test]
    fn empty_output_is_a_prediction_error() {
        let model = Recording::returning(vec![]);
        let err = predict(&model, &FeatureVector::default()).unwrap_err();
        assert!(matches!(err, FormError::Prediction(_)));
    }

    #[test]
    fn missing_path_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.onnx");

        let err = load_model(&path).err().unwrap();

        assert!(matches!(err, FormError::ModelNotFound { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn directory_is_not_a_model_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_model(dir.path()).err().unwrap();
        assert!(matches!(err, FormError::ModelNotFound { .. }));
    }

    #[test]
    fn garbage_file_is_load_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"definitely not a model").unwrap();

        let err = load_model(file.path()).err().unwrap();

        assert!(matches!(err, FormError::ModelLoad { .. }));
        assert_eq!(err.to_string(), "Failed to load model.");
        assert!(err.detail().is_some());
    }
}
