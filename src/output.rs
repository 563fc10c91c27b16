//! Raw tensor persistence.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};

/// Write `data` as headerless native-endian `f32` values.
///
/// The file is created or truncated. Consumers need to know the tensor shape
/// to read it back; none is stored.
///
/// # Errors
///
/// Returns [`Error::OutputWrite`] if the file cannot be opened or written.
pub fn write_raw<P: AsRef<Path>>(path: P, data: &[f32]) -> Result<u64> {
    let path = path.as_ref();
    let to_error = |source| Error::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(to_error)?;
    let mut writer = BufWriter::new(file);

    for value in data {
        writer.write_all(&value.to_ne_bytes()).map_err(to_error)?;
    }
    writer.flush().map_err(to_error)?;

    let bytes = std::mem::size_of_val(data) as u64;
    tracing::debug!("Wrote {bytes} bytes to {}", path.display());

    Ok(bytes)
}

/// Render a shape as `[d0, d1, ...]`.
#[must_use]
pub fn format_shape(shape: &[i64]) -> String {
    let mut out = String::from("[");
    for (i, dim) in shape.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{dim}");
    }
    out.push(']');
    out
}
