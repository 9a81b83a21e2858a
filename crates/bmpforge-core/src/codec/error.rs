//! Error types for the BMP codec.

use thiserror::Error;

/// Error types for BMP decoding.
///
/// [`super::decode`] collapses every variant into the empty raster; use
/// [`super::try_decode`] or [`super::decode_bytes`] to see which one occurred.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Fewer bytes than the fixed headers occupy.
    #[error("File too short for BMP headers: {len} bytes")]
    TooShort { len: usize },

    /// The first two bytes are not `BM`.
    #[error("Invalid BMP signature: {0:02X?}")]
    InvalidSignature([u8; 2]),

    /// Bit depth other than 24 or 32 (indexed and packed formats).
    #[error("Unsupported bit depth: {0} bits per pixel")]
    UnsupportedBitDepth(u16),

    /// Run-length or other compressed pixel data.
    #[error("Unsupported compression method: {0}")]
    UnsupportedCompression(u32),

    /// The declared file size disagrees with the header-derived layout.
    #[error("Declared file size {declared} does not match layout size {expected}")]
    SizeMismatch { declared: u64, expected: u64 },

    /// The header describes a zero-width or zero-height image.
    #[error("Image has zero width or height ({width}x{height})")]
    ZeroDimensions { width: u32, height: u32 },

    /// The pixel array runs past the end of the data.
    #[error("Truncated pixel data: need {expected} bytes, got {actual}")]
    Truncated { expected: u64, actual: u64 },
}

/// Error types for BMP encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The destination could not be created or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file size would not fit the 32-bit size field.
    #[error("Image too large for BMP: {width}x{height}")]
    TooLarge { width: u32, height: u32 },
}
