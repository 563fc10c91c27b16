//! Conversion from interleaved RGB bytes to planar float tensors.

use image::RgbImage;
use ndarray::Array4;

use crate::error::{Error, Result};

use super::{InputTensor, PIXEL_SCALE, RGB_CHANNELS};

/// Convert an interleaved RGB byte buffer into a `(1, 3, height, width)` tensor.
///
/// Every sample is scaled by 1/255 and moved to its channel plane:
/// `tensor[c * H * W + p] = pixels[p * 3 + c] / 255.0`. No mean or variance
/// standardization is applied.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] if `pixels.len()` is not `width * height * 3`.
pub fn interleaved_to_planar(pixels: &[u8], width: usize, height: usize) -> Result<InputTensor> {
    let expected = width * height * RGB_CHANNELS;
    if pixels.len() != expected {
        return Err(Error::ShapeMismatch {
            expected: format!("{expected} bytes for {width}x{height} RGB"),
            actual: format!("{} bytes", pixels.len()),
        });
    }

    Ok(planar_from_raw(pixels, width, height))
}

/// Convert a decoded RGB image into a normalized NCHW tensor.
#[must_use]
pub fn rgb_to_tensor(img: &RgbImage) -> InputTensor {
    let (width, height) = img.dimensions();
    planar_from_raw(img.as_raw(), width as usize, height as usize)
}

/// Caller guarantees `pixels.len() == width * height * 3`.
fn planar_from_raw(pixels: &[u8], width: usize, height: usize) -> InputTensor {
    Array4::from_shape_fn((1, RGB_CHANNELS, height, width), |(_, c, y, x)| {
        f32::from(pixels[(y * width + x) * RGB_CHANNELS + c]) / PIXEL_SCALE
    })
}
