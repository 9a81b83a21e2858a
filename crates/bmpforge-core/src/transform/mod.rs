//! Image transformation operations.
//!
//! Every transform is a pure function from a [`Raster`] (plus scalar
//! parameters) to a new [`Raster`]; the input is never modified.
//!
//! - Per-pixel filters run through [`map_pixels`]
//! - Rotations and enlargement run through [`remap`], which asks a
//!   coordinate-mapping closure for each output pixel
//!
//! # Coordinate System
//!
//! - Rows count down from the top, columns right from the left
//! - Rotation angles are in degrees, positive = clockwise
//! - Empty input always yields empty output
//!
//! [`Raster`]: crate::raster::Raster

mod catalog;
mod engine;
mod filters;
mod rotation;
mod scale;

pub use catalog::{
    apply_pipeline, Transform, TransformError, CLARENDON_FACTOR_RANGE, ROTATION_DEGREES_RANGE,
    SCALING_FACTOR_RANGE,
};
pub use engine::{map_pixels, remap};
pub use filters::{clarendon, darken, grayscale, high_contrast, lighten, primary_colors, vignette};
pub use rotation::{compute_rotated_bounds, rotate_90, rotate_degrees, rotate_quarter_turns};
pub use scale::enlarge;
