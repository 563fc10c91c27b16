//! # `rawinfer`
//!
//! Run a single ONNX forward pass on an image and dump the raw output tensor.
//!
//! The image is decoded, forced to RGB, resized to the model's input size,
//! and converted from interleaved bytes into a planar `(1, 3, H, W)` float
//! tensor scaled to [0, 1]. The first output of the model is written to disk
//! as headerless native-endian `f32` values.
//!
//! ## Example
//!
//! ```no_run
//! use rawinfer::{Config, Pipeline};
//!
//! # fn main() -> rawinfer::Result<()> {
//! let config = Config { width: 224, height: 224 };
//! let mut pipeline = Pipeline::new("resnet50.onnx", config)?;
//!
//! let report = pipeline.process("cat.jpg", "logits.raw")?;
//! assert_eq!(report.bytes_written, report.element_count as u64 * 4);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod image;
pub mod model;
pub mod output;
pub mod pipeline;

pub use error::{Error, Result};
pub use pipeline::{Config, Pipeline, Report};
