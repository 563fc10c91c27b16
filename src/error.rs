//! Custom error types for rawinfer.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the rawinfer library.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to decode an image file.
    #[error("failed to load image from {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Target dimensions cannot produce a tensor.
    #[error("invalid target dimensions {width}x{height}: {reason}")]
    InvalidDimensions {
        width: u32,
        height: u32,
        reason: &'static str,
    },

    /// The inference runtime environment could not be created.
    #[error("failed to initialize ONNX Runtime: {source}")]
    Runtime {
        #[source]
        source: ort::Error,
    },

    /// Failed to load an ONNX model.
    #[error("failed to load ONNX model {path}: {source}")]
    ModelLoad {
        path: PathBuf,
        #[source]
        source: ort::Error,
    },

    /// The model graph declares no input or no output.
    #[error("model declares no {kind}")]
    MissingPort { kind: &'static str },

    /// Model inference failed.
    #[error("model inference failed: {source}")]
    Inference {
        #[source]
        source: ort::Error,
    },

    /// Shape mismatch in tensor operations.
    #[error("tensor shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },

    /// Failed to write the output tensor.
    #[error("failed to write output to {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for rawinfer operations.
pub type Result<T> = std::result::Result<T, Error>;
