//! BMP codec for bmpforge.
//!
//! This module provides functionality for:
//! - Decoding uncompressed 24-bit and 32-bit BMP files into a [`Raster`]
//! - Encoding a [`Raster`] as a 24-bit BMP file
//!
//! # Error reporting
//!
//! Each direction has two entry points. [`decode`] and [`encode`] keep the
//! sentinel contract: an empty raster or `false` on failure. [`try_decode`]
//! and [`try_encode`] return tagged errors instead, which separate
//! unreadable files, malformed containers and zero-sized images.
//!
//! # Examples
//!
//! ```ignore
//! use bmpforge_core::codec::{decode, encode};
//!
//! let image = decode("photo.bmp");
//! if !image.is_empty() {
//!     encode("copy.bmp", &image);
//! }
//! ```
//!
//! [`Raster`]: crate::raster::Raster

mod decode;
mod encode;
mod error;
mod header;

pub use decode::{decode, decode_bytes, try_decode};
pub use encode::{encode, encode_to_vec, try_encode};
pub use error::{DecodeError, EncodeError};
pub use header::{row_padding, BmpHeader, PIXEL_ARRAY_OFFSET};
