//! Linear decode, transform, infer, and write pipeline.

use std::path::Path;

use crate::error::{Error, Result};
use crate::image::{self, InputTensor};
use crate::model::{self, InferenceSession, ModelInfo};
use crate::output;

/// Configuration for the inference pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Width the image is resized to before inference.
    pub width: u32,

    /// Height the image is resized to before inference.
    pub height: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 224,
            height: 224,
        }
    }
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or the input tensor
    /// would be too large to allocate.
    pub fn validate(&self) -> Result<()> {
        image::check_dimensions(self.width, self.height)
    }

    /// Decode and preprocess an image into the tensor the model consumes.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the image cannot
    /// be decoded.
    pub fn prepare<P: AsRef<Path>>(&self, image_path: P) -> Result<InputTensor> {
        let image_path = image_path.as_ref();
        tracing::info!("Processing image: {}", image_path.display());

        image::load_tensor(image_path, self.width, self.height)
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Input port the image tensor was fed to.
    pub input_name: String,
    /// Output port that was written.
    pub output_name: String,
    /// Output tensor dimensions.
    pub output_shape: Vec<i64>,
    /// Number of `f32` values written.
    pub element_count: usize,
    /// Size of the output file.
    pub bytes_written: u64,
}

/// Loaded model plus the preprocessing settings applied to every image.
pub struct Pipeline {
    config: Config,
    session: InferenceSession,
}

impl Pipeline {
    /// Create a new pipeline, loading the model at `model_path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the model cannot
    /// be loaded.
    pub fn new<P: AsRef<Path>>(model_path: P, config: Config) -> Result<Self> {
        config.validate()?;

        tracing::info!("Initializing pipeline with config: {config:?}");
        let session = model::load_session(model_path)?;

        Ok(Self { config, session })
    }

    /// Resolved input and output names of the loaded model.
    #[must_use]
    pub fn model_info(&self) -> &ModelInfo {
        self.session.info()
    }

    /// Run the model on one image and write the raw output tensor.
    ///
    /// Nothing is written unless every earlier stage succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if decoding, inference, or the write fails.
    pub fn process<P: AsRef<Path>, Q: AsRef<Path>>(
        &mut self,
        image_path: P,
        output_path: Q,
    ) -> Result<Report> {
        let tensor = self.config.prepare(image_path)?;
        self.process_tensor(&tensor, output_path)
    }

    /// Run the model on an already prepared tensor and write the raw output.
    ///
    /// # Errors
    ///
    /// Returns an error if the tensor does not match the configured
    /// dimensions, or if inference or the write fails.
    pub fn process_tensor<Q: AsRef<Path>>(
        &mut self,
        tensor: &InputTensor,
        output_path: Q,
    ) -> Result<Report> {
        let output_path = output_path.as_ref();
        let Config { width, height } = self.config;
        let expected = [1, image::RGB_CHANNELS, height as usize, width as usize];
        if tensor.shape() != expected {
            return Err(Error::ShapeMismatch {
                expected: format!("{expected:?}"),
                actual: format!("{:?}", tensor.shape()),
            });
        }

        tracing::info!("Running inference...");
        let result = self.session.run(tensor)?;

        tracing::info!("Saving output to: {}", output_path.display());
        let bytes_written = output::write_raw(output_path, &result.data)?;

        let info = self.model_info();
        Ok(Report {
            input_name: info.input_name.clone(),
            output_name: result.name,
            element_count: result.data.len(),
            output_shape: result.shape,
            bytes_written,
        })
    }
}
