//! BMP decoding into a [`Raster`].

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use super::{BmpHeader, DecodeError};
use crate::raster::{Raster, Rgb};

/// Decode a BMP file, returning the empty raster on any failure.
///
/// Unreadable paths, malformed containers and zero-sized images all
/// collapse into [`Raster::empty`]. Use [`try_decode`] to tell them apart.
pub fn decode(path: impl AsRef<Path>) -> Raster {
    let path = path.as_ref();
    match try_decode(path) {
        Ok(image) => image,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "BMP decode failed");
            Raster::empty()
        }
    }
}

/// Decode a BMP file from disk.
///
/// # Errors
///
/// Returns `DecodeError::Io` if the file cannot be read, or any of the
/// structural errors from [`decode_bytes`].
pub fn try_decode(path: impl AsRef<Path>) -> Result<Raster, DecodeError> {
    let bytes = fs::read(path.as_ref())?;
    decode_bytes(&bytes)
}

/// Decode a BMP file already held in memory.
///
/// Rows are stored bottom to top and pixels as blue, green, red. The
/// fourth byte of 32-bit pixels is ignored, as is the padding that rounds
/// each row up to a multiple of 4 bytes.
pub fn decode_bytes(bytes: &[u8]) -> Result<Raster, DecodeError> {
    let header = BmpHeader::parse(bytes)?;
    header.validate(bytes.len())?;

    debug!(
        width = header.width,
        height = header.height,
        bits_per_pixel = header.bits_per_pixel,
        padding = header.row_padding(),
        "Parsed BMP header"
    );

    // validate() guarantees the pixel array fits inside `bytes`, so these
    // conversions cannot truncate.
    let width = header.width as usize;
    let height = header.height as usize;
    let bytes_per_pixel = header.bytes_per_pixel() as usize;
    let row_len = header.padded_row_len() as usize;
    let start = header.pixel_offset as usize;
    let pixel_data = &bytes[start..start + row_len * height];

    let mut pixels = vec![Rgb::BLACK; width * height];
    for (stored, src_row) in pixel_data.chunks_exact(row_len).enumerate() {
        let row = height - 1 - stored;
        let dst_row = &mut pixels[row * width..(row + 1) * width];
        for (dst, bgr) in dst_row.iter_mut().zip(src_row.chunks_exact(bytes_per_pixel)) {
            *dst = Rgb::new(bgr[2], bgr[1], bgr[0]);
        }
    }

    Ok(Raster::from_pixels(header.width, header.height, pixels))
}
