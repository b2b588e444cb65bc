use std::path::{Path, PathBuf};
use std::sync::Arc;

use actix_web::web;
use adoption_inference::{load_model, Classifier, FeatureVector, FormError, Prediction};
use anyhow::anyhow;

/// The model as loaded at startup, shared read-only by every handler.
pub struct ModelState {
    path: PathBuf,
    model: Result<Arc<dyn Classifier>, FormError>,
}

impl ModelState {
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let model = load_model(&path);
        Self { path, model }
    }

    pub fn with_classifier<P: AsRef<Path>>(path: P, model: Arc<dyn Classifier>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            model: Ok(model),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The load error, if the model never became available.
    pub fn unavailable(&self) -> Option<&FormError> {
        self.model.as_ref().err()
    }

    /// The loaded classifier, or the error that kept it from loading.
    pub fn classifier(&self) -> Result<Arc<dyn Classifier>, &FormError> {
        self.model.as_ref().map(Arc::clone)
    }
}

/// Run `model` on the blocking pool.
pub async fn predict(
    model: Arc<dyn Classifier>,
    features: FeatureVector,
) -> Result<Prediction, FormError> {
    web::block(move || adoption_inference::predict(model.as_ref(), &features))
        .await
        .unwrap_or_else(|e| {
            Err(FormError::Prediction(anyhow!(
                "inference worker failed: {}",
                e
            )))
        })
}
