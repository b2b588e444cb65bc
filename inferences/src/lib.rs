//! Model side of the renewable adoption predictor.
//!
//! A [`FeatureVector`] is turned into a single `1×4` row, handed to a
//! [`Classifier`], and the first returned label is mapped to its display text.

pub mod classifier;
pub mod error;
pub mod inference;
pub mod types;

pub use classifier::{load_model, predict, Classifier};
pub use error::FormError;
pub use inference::OnnxClassifier;
pub use types::{
    label_text, FeatureVector, Prediction, CLASS_LABELS, FEATURE_LABELS, FEATURE_NAMES, N_FEATURES,
};
