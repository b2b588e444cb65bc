use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by the predictor form.
///
/// `ModelNotFound` and `ModelLoad` end the session: the form shows the message
/// and offers no inputs. `Prediction` and `InvalidInput` are per-attempt and
/// leave the form usable.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("Model file `{}` not found.", .path.display())]
    ModelNotFound { path: PathBuf },

    #[error("Failed to load model.")]
    ModelLoad {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Prediction failed.")]
    Prediction(#[source] anyhow::Error),

    #[error("Invalid number for {field}: {value:?}")]
    InvalidInput { field: &'static str, value: String },
}

impl FormError {
    /// True when the model never became available and no prediction can run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, FormError::ModelNotFound { .. } | FormError::ModelLoad { .. })
    }

    /// Diagnostic text shown under the headline message, if any.
    ///
    /// Load failures show the cause chain on one line; prediction failures
    /// show the full multi-line report.
    pub fn detail(&self) -> Option<String> {
        match self {
            FormError::ModelLoad { source, .. } => Some(format!("{:#}", source)),
            FormError::Prediction(source) => Some(format!("{:?}", source)),
            FormError::ModelNotFound { .. } | FormError::InvalidInput { .. } => None,
        }
    }
}
