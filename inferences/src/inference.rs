use std::path::Path;

use anyhow::{bail, Context};
use log::debug;
use ndarray::ArrayView2;
use tract_onnx::prelude::*;

use crate::classifier::Classifier;
use crate::types::N_FEATURES;

type OnnxPlan = TypedRunnableModel<TypedModel>;

/// ONNX classifier export with a single `float[1, 4]` input.
///
/// The first graph output must be the label tensor. Integer labels are used
/// as-is; float outputs are rounded. Exports need `zipmap=False` so the
/// probability output stays a plain tensor.
pub struct OnnxClassifier {
    model: OnnxPlan,
}

impl OnnxClassifier {
    pub fn load<P: AsRef<Path>>(model_path: P) -> TractResult<Self> {
        let model_path = model_path.as_ref();
        let model = tract_onnx::onnx()
            .model_for_path(model_path)
            .with_context(|| format!("parsing {}", model_path.display()))?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(f32::datum_type(), tvec!(1, N_FEATURES)),
            )?
            .into_optimized()?;

        Self::from_model(model)
    }

    /// Wrap an already typed graph whose first input takes `float[rows, 4]`.
    pub fn from_model(model: TypedModel) -> TractResult<Self> {
        Ok(Self {
            model: model.into_runnable()?,
        })
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, x: ArrayView2<'_, f64>) -> anyhow::Result<Vec<i64>> {
        let (rows, cols) = x.dim();
        if cols != N_FEATURES {
            bail!("expected {} features per row, got {}", N_FEATURES, cols);
        }

        let values: Vec<f32> = x.iter().map(|v| *v as f32).collect();
        let input = Tensor::from_shape(&[rows, cols], &values)?;
        let outputs = self.model.run(tvec!(input.into()))?;

        let labels = outputs.first().context("model produced no outputs")?;
        debug!("Label output: {:?} {:?}", labels.datum_type(), labels.shape());

        match labels.datum_type() {
            DatumType::I64 => Ok(labels.as_slice::<i64>()?.to_vec()),
            _ => {
                let as_float = labels.cast_to::<f32>()?;
                as_float
                    .as_slice::<f32>()?
                    .iter()
                    .map(|v| {
                        if !v.is_finite() {
                            bail!("model returned non-finite label {}", v);
                        }
                        Ok(v.round() as i64)
                    })
                    .collect()
            }
        }
    }
}
