//! Image decoding, resizing, and tensor conversion.

mod load;
mod tensor;

pub use load::{check_dimensions, decode_rgb, load_rgb, load_tensor, resize_rgb};
pub use tensor::{interleaved_to_planar, rgb_to_tensor};

use ndarray::Array4;

/// Image tensor in NCHW format (batch, channels, height, width).
/// Values are scaled to the [0, 1] range.
pub type InputTensor = Array4<f32>;

/// Number of channels in RGB images.
pub const RGB_CHANNELS: usize = 3;

/// Divisor mapping an 8-bit sample onto [0, 1].
pub const PIXEL_SCALE: f32 = 255.0;

/// Largest input tensor, in bytes, the pipeline will allocate (1 GiB).
pub const MAX_TENSOR_BYTES: usize = 1 << 30;
