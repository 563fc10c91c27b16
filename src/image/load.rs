//! Image loading utilities.

use std::path::Path;

use image::{imageops::FilterType, RgbImage};

use crate::error::{Error, Result};

use super::{rgb_to_tensor, InputTensor, MAX_TENSOR_BYTES, RGB_CHANNELS};

/// Resampling filter used to bring images to the model's input size.
const RESIZE_FILTER: FilterType = FilterType::CatmullRom;

/// Decode an image file into an 8-bit RGB buffer at its native resolution.
///
/// Alpha is discarded and grayscale is expanded, so the result always has
/// exactly three channels.
///
/// # Errors
///
/// Returns [`Error::ImageLoad`] if the file is missing, corrupt, or in an
/// unsupported format.
pub fn decode_rgb<P: AsRef<Path>>(path: P) -> Result<RgbImage> {
    let path = path.as_ref();

    let img = image::open(path).map_err(|source| Error::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(img.into_rgb8())
}

/// Resize an RGB buffer to exactly `width` x `height`.
///
/// The source buffer is consumed; an image already at the target size is
/// returned untouched.
#[must_use]
pub fn resize_rgb(img: RgbImage, width: u32, height: u32) -> RgbImage {
    if img.dimensions() == (width, height) {
        return img;
    }

    image::imageops::resize(&img, width, height, RESIZE_FILTER)
}

/// Check that `width` x `height` yields a tensor the pipeline can allocate.
///
/// Both the RGB buffer (`W * H * 3` bytes) and the float tensor
/// (`W * H * 3 * 4` bytes) must fit in `usize`, and the tensor may not exceed
/// [`MAX_TENSOR_BYTES`].
///
/// # Errors
///
/// Returns [`Error::InvalidDimensions`] if a dimension is zero or the tensor
/// would be too large.
pub fn check_dimensions(width: u32, height: u32) -> Result<()> {
    let invalid = |reason| Error::InvalidDimensions {
        width,
        height,
        reason,
    };

    if width == 0 || height == 0 {
        return Err(invalid("both must be at least 1"));
    }

    let tensor_bytes = usize::try_from(width)
        .ok()
        .zip(usize::try_from(height).ok())
        .and_then(|(w, h)| w.checked_mul(h))
        .and_then(|pixels| pixels.checked_mul(RGB_CHANNELS))
        .and_then(|samples| samples.checked_mul(std::mem::size_of::<f32>()))
        .ok_or_else(|| invalid("tensor size overflows"))?;

    if tensor_bytes > MAX_TENSOR_BYTES {
        return Err(invalid("input tensor would exceed 1 GiB"));
    }

    Ok(())
}

/// Decode an image and resize it to the target dimensions.
///
/// Dimensions are checked before the file is touched.
///
/// # Errors
///
/// Returns an error if the dimensions are rejected by [`check_dimensions`] or
/// the image cannot be decoded.
pub fn load_rgb<P: AsRef<Path>>(path: P, width: u32, height: u32) -> Result<RgbImage> {
    check_dimensions(width, height)?;

    let img = decode_rgb(path)?;
    let (src_width, src_height) = img.dimensions();
    tracing::debug!("Decoded {src_width}x{src_height}, resizing to {width}x{height}");

    Ok(resize_rgb(img, width, height))
}

/// Decode, resize, and convert an image into a normalized NCHW tensor.
///
/// The pixel buffer is dropped as soon as the tensor exists.
///
/// # Errors
///
/// Returns an error if [`load_rgb`] fails.
pub fn load_tensor<P: AsRef<Path>>(path: P, width: u32, height: u32) -> Result<InputTensor> {
    let rgb = load_rgb(path, width, height)?;
    Ok(rgb_to_tensor(&rgb))
}
