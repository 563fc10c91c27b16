//! Single-input, single-output inference over a loaded session.

use ort::session::Session;
use ort::value::TensorRef;

use crate::error::{Error, Result};
use crate::image::InputTensor;

/// Names of the graph ports used for inference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInfo {
    /// First declared input of the graph.
    pub input_name: String,
    /// First declared output of the graph.
    pub output_name: String,
}

/// Output tensor copied out of runtime-owned memory.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceOutput {
    /// Output port the data was read from.
    pub name: String,
    /// Dimensions as reported by the runtime.
    pub shape: Vec<i64>,
    /// Flattened values, `shape.iter().product()` elements long.
    pub data: Vec<f32>,
}

/// A loaded model together with its resolved port names.
///
/// Dropping it releases the underlying runtime session.
#[derive(Debug)]
pub struct InferenceSession {
    session: Session,
    info: ModelInfo,
}

impl InferenceSession {
    pub(crate) fn new(session: Session, info: ModelInfo) -> Self {
        Self { session, info }
    }

    /// Resolved input and output names.
    #[must_use]
    pub fn info(&self) -> &ModelInfo {
        &self.info
    }

    /// Run one forward pass over an NCHW tensor.
    ///
    /// The tensor is borrowed by the runtime for the duration of the call,
    /// not copied. Blocks until the pass completes.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime rejects the input, the pass fails, or
    /// the output is not an `f32` tensor of fixed shape.
    pub fn run(&mut self, input: &InputTensor) -> Result<InferenceOutput> {
        let dims: Vec<i64> = input
            .shape()
            .iter()
            .map(|&d| i64::try_from(d))
            .collect::<std::result::Result<_, _>>()
            .map_err(|_| Error::ShapeMismatch {
                expected: "dimensions within i64 range".to_string(),
                actual: format!("{:?}", input.shape()),
            })?;

        let data = input.as_slice().ok_or_else(|| Error::ShapeMismatch {
            expected: "contiguous input tensor".to_string(),
            actual: "non-standard memory layout".to_string(),
        })?;

        let input_value = TensorRef::from_array_view((dims, data))
            .map_err(|source| Error::Inference { source })?;

        let outputs = self
            .session
            .run(ort::inputs![self.info.input_name.as_str() => input_value])
            .map_err(|source| Error::Inference { source })?;

        let output = &outputs[self.info.output_name.as_str()];
        let (shape_info, values) = output
            .try_extract_tensor::<f32>()
            .map_err(|source| Error::Inference { source })?;

        let shape: Vec<i64> = shape_info.iter().copied().collect();
        let count = element_count(&shape)?;
        if values.len() != count {
            return Err(Error::ShapeMismatch {
                expected: format!("{count} elements for shape {shape:?}"),
                actual: format!("{} elements", values.len()),
            });
        }

        tracing::debug!("Output {} has {count} elements", self.info.output_name);

        Ok(InferenceOutput {
            name: self.info.output_name.clone(),
            shape,
            data: values.to_vec(),
        })
    }
}

/// Number of elements in a tensor of the given shape.
///
/// A rank-0 shape holds a single element.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] for negative (dynamic) dimensions or a
/// product that overflows `usize`.
pub fn element_count(shape: &[i64]) -> Result<usize> {
    shape.iter().try_fold(1usize, |acc, &dim| {
        usize::try_from(dim)
            .ok()
            .and_then(|dim| acc.checked_mul(dim))
            .ok_or_else(|| Error::ShapeMismatch {
                expected: "non-negative concrete dimensions".to_string(),
                actual: format!("{shape:?}"),
            })
    })
}
