//! BMP encoding from a [`Raster`].
//!
//! Output is always 24-bit uncompressed, whatever depth the source file had.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use super::{BmpHeader, EncodeError};
use crate::raster::Raster;

/// Encode `image` to `path`, returning `false` if the file could not be
/// written.
pub fn encode(path: impl AsRef<Path>, image: &Raster) -> bool {
    let path = path.as_ref();
    match try_encode(path, image) {
        Ok(()) => true,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "BMP encode failed");
            false
        }
    }
}

/// Encode `image` to `path`.
///
/// The file is assembled in memory first, so the destination is only
/// touched once the bytes are complete.
pub fn try_encode(path: impl AsRef<Path>, image: &Raster) -> Result<(), EncodeError> {
    let bytes = encode_to_vec(image)?;
    fs::write(path.as_ref(), &bytes)?;
    debug!(
        path = %path.as_ref().display(),
        bytes = bytes.len(),
        "Wrote BMP"
    );
    Ok(())
}

/// Encode `image` to BMP bytes.
///
/// An empty raster encodes as a header with no pixel rows.
///
/// # Errors
///
/// Returns `EncodeError::TooLarge` if the file would exceed the format's
/// 32-bit size field.
pub fn encode_to_vec(image: &Raster) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = image.dimensions();
    let header =
        BmpHeader::for_output(width, height).ok_or(EncodeError::TooLarge { width, height })?;
    let padding = header.row_padding() as usize;

    let mut out = Vec::with_capacity(header.file_size as usize);
    header.write_to(&mut out);

    for row in image.rows().rev() {
        for pixel in row {
            out.extend_from_slice(&[pixel.blue, pixel.green, pixel.red]);
        }
        out.resize(out.len() + padding, 0);
    }

    debug_assert_eq!(out.len(), header.file_size as usize);
    Ok(out)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
