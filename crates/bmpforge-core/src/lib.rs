//! bmpforge Core - BMP codec and raster transform library
//!
//! This crate provides the core functionality for bmpforge: decoding and
//! encoding uncompressed BMP files, and a catalog of pixel and geometric
//! transforms over an in-memory RGB raster.
//!
//! # Data flow
//!
//! ```ignore
//! use bmpforge_core::{codec, Transform};
//!
//! let image = codec::decode("input.bmp");
//! let rotated = Transform::RotateDegrees { degrees: 30 }.apply(&image);
//! codec::encode("output.bmp", &rotated);
//! ```
//!
//! The library keeps no global state and never installs a tracing
//! subscriber; every call is independent.

pub mod codec;
pub mod raster;
pub mod transform;

pub use codec::{decode, encode, try_decode, try_encode, DecodeError, EncodeError};
pub use raster::{Raster, RasterError, Rgb};
pub use transform::{
    apply_pipeline, compute_rotated_bounds, rotate_degrees, rotate_quarter_turns, Transform,
    TransformError,
};
