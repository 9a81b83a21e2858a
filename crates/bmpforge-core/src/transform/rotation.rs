//! Image rotation: exact quarter turns and arbitrary angles with bilinear
//! interpolation.
//!
//! # Algorithm
//!
//! Both paths use inverse mapping: for each pixel in the output image we
//! work out which source position lands there and sample it.
//!
//! Quarter turns are an exact permutation of pixels. For arbitrary angles,
//! with θ = −degrees (clockwise rotation), the output canvas is the bounding
//! box of the rotated corners and the inverse transform is:
//! ```text
//! src_x = (dst_x - dst_cx) * cos(-θ) - (dst_y - dst_cy) * sin(-θ) + src_cx
//! src_y = (dst_x - dst_cx) * sin(-θ) + (dst_y - dst_cy) * cos(-θ) + src_cy
//! ```
//! Output pixels whose source position lacks a full 2x2 neighbourhood are
//! black, which gives the rotated image a black border.

use std::f64::consts::PI;

use tracing::debug;

use super::engine::{remap, round_channel};
use crate::raster::{Raster, Rgb};

/// Rotate 90 degrees clockwise.
pub fn rotate_90(image: &Raster) -> Raster {
    rotate_quarter_turns(image, 1)
}

/// Rotate clockwise by `turns` quarter turns (negative = counter-clockwise).
///
/// `turns` is taken modulo 4 with a non-negative result, so `-1` is three
/// clockwise turns. Zero net turns returns an equal but distinct raster.
///
/// One clockwise turn swaps the dimensions and moves source `(r, c)` to
/// destination `(c, height - 1 - r)`.
pub fn rotate_quarter_turns(image: &Raster, turns: i32) -> Raster {
    let turns = turns.rem_euclid(4);
    let (w, h) = image.dimensions();

    match turns {
        0 => image.clone(),
        // Destination (row, col) reads source (h - 1 - col, row)
        1 => remap(h, w, |row, col| image.pixel(h - 1 - col, row)),
        2 => remap(w, h, |row, col| image.pixel(h - 1 - row, w - 1 - col)),
        // Destination (row, col) reads source (col, w - 1 - row)
        _ => remap(h, w, |row, col| image.pixel(col, w - 1 - row)),
    }
}

/// Rotation matrix terms for a clockwise rotation of `degrees`.
///
/// Returns `(cos θ, sin θ)` with θ = −degrees in radians.
fn rotation_terms(degrees: i32) -> (f64, f64) {
    let angle_rad = -f64::from(degrees) * PI / 180.0;
    (angle_rad.cos(), angle_rad.sin())
}

/// Compute the canvas size for a clockwise rotation by `degrees`.
///
/// The four corners, taken relative to the image centre, are rotated and
/// the spans of their x and y coordinates rounded up. One extra pixel on
/// each axis keeps boundary pixels lost to floating-point rounding.
///
/// # Returns
///
/// Tuple of (new_width, new_height), each at least 1.
pub fn compute_rotated_bounds(width: u32, height: u32, degrees: i32) -> (u32, u32) {
    let (cos, sin) = rotation_terms(degrees);
    let cx = width as f64 / 2.0;
    let cy = height as f64 / 2.0;

    let corners = [
        (-cx, -cy),
        (width as f64 - cx, -cy),
        (width as f64 - cx, height as f64 - cy),
        (-cx, height as f64 - cy),
    ];

    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    for (x, y) in corners {
        let rot_x = x * cos - y * sin;
        let rot_y = x * sin + y * cos;
        min_x = min_x.min(rot_x);
        max_x = max_x.max(rot_x);
        min_y = min_y.min(rot_y);
        max_y = max_y.max(rot_y);
    }

    // Float-to-int casts saturate, so huge spans stop at u32::MAX
    let new_w = ((max_x - min_x).ceil() as u32).saturating_add(1);
    let new_h = ((max_y - min_y).ceil() as u32).saturating_add(1);
    (new_w, new_h)
}

/// Rotate clockwise by an arbitrary whole number of degrees.
///
/// The image is rotated around its centre onto a canvas expanded to the
/// bounding box of the rotated corners. Areas outside the rotated source
/// are black. Any angle is accepted; range checks belong to the caller.
///
/// # Returns
///
/// New raster with the rotated content, or the empty raster for empty
/// input.
pub fn rotate_degrees(image: &Raster, degrees: i32) -> Raster {
    if image.is_empty() {
        return Raster::empty();
    }

    let (src_w, src_h) = image.dimensions();
    let (dst_w, dst_h) = compute_rotated_bounds(src_w, src_h, degrees);
    debug!(
        degrees,
        src_w, src_h, dst_w, dst_h, "Rotating by arbitrary angle"
    );

    // Inverse rotation: same angle, opposite sense
    let (cos, sin) = rotation_terms(degrees);
    let (inv_cos, inv_sin) = (cos, -sin);

    let src_cx = src_w as f64 / 2.0;
    let src_cy = src_h as f64 / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    remap(dst_w, dst_h, |row, col| {
        let x = col as f64 - dst_cx;
        let y = row as f64 - dst_cy;

        let src_x = x * inv_cos - y * inv_sin + src_cx;
        let src_y = x * inv_sin + y * inv_cos + src_cy;

        sample_bilinear(image, src_x, src_y)
    })
}

/// Sample a pixel using bilinear interpolation.
///
/// Blends the four pixels around `(x, y)` by their fractional distances.
/// Positions without a full 2x2 neighbourhood inside the image are black;
/// there is no edge clamping or wraparound.
fn sample_bilinear(image: &Raster, x: f64, y: f64) -> Rgb {
    let (w, h) = image.dimensions();
    let x0 = x.floor();
    let y0 = y.floor();

    if x0 < 0.0 || y0 < 0.0 || x0 + 1.0 >= w as f64 || y0 + 1.0 >= h as f64 {
        return Rgb::BLACK;
    }

    let dx = x - x0;
    let dy = y - y0;
    let (c0, r0) = (x0 as u32, y0 as u32);

    let p00 = image.pixel(r0, c0);
    let p10 = image.pixel(r0, c0 + 1);
    let p01 = image.pixel(r0 + 1, c0);
    let p11 = image.pixel(r0 + 1, c0 + 1);

    let blend = |a: u8, b: u8, c: u8, d: u8| {
        let v = (1.0 - dx) * (1.0 - dy) * a as f64
            + dx * (1.0 - dy) * b as f64
            + (1.0 - dx) * dy * c as f64
            + dx * dy * d as f64;
        round_channel(v)
    };

    Rgb::new(
        blend(p00.red, p10.red, p01.red, p11.red),
        blend(p00.green, p10.green, p01.green, p11.green),
        blend(p00.blue, p10.blue, p01.blue, p11.blue),
    )
}


// ============================================================================
// Property-Based Tests
// ============================================================================
