//! Per-pixel intensity filters.
//!
//! Every filter keeps the image dimensions and computes each output pixel
//! from the matching input pixel alone (the vignette also uses its
//! position). Scaled channels are truncated toward zero, then clamped.

use super::engine::{map_pixels, truncate_channel};
use crate::raster::{Raster, Rgb};

/// Average brightness at or above which Clarendon lightens a pixel.
const CLARENDON_BRIGHT: f64 = 170.0;

/// Average brightness below which Clarendon darkens a pixel.
const CLARENDON_DARK: f64 = 90.0;

/// Integer average at or above which high contrast picks white.
const HIGH_CONTRAST_THRESHOLD: u32 = 128;

/// Channel sum at or above which primary colors picks white.
const PRIMARY_WHITE_SUM: u32 = 550;

/// Channel sum at or below which primary colors picks black.
const PRIMARY_BLACK_SUM: u32 = 150;

/// Darken each pixel in proportion to its distance from the image centre.
///
/// The factor is `(height - distance) / height`, floored at zero, so the
/// corners of wide images go fully black.
pub fn vignette(image: &Raster) -> Raster {
    let center_x = image.width() as f64 / 2.0;
    let center_y = image.height() as f64 / 2.0;
    let height = image.height() as f64;

    map_pixels(image, |row, col, p| {
        let dx = col as f64 - center_x;
        let dy = row as f64 - center_y;
        let distance = (dx * dx + dy * dy).sqrt();
        let factor = ((height - distance) / height).max(0.0);
        scale(p, factor)
    })
}

/// Push bright pixels toward white and dark pixels toward black.
///
/// Pixels whose channel average is at least 170 become
/// `255 - (255 - c) * factor`; those below 90 become `c * factor`; mid
/// tones are unchanged. `factor` is meant to lie in `[0, 1]`.
pub fn clarendon(image: &Raster, factor: f64) -> Raster {
    map_pixels(image, |_, _, p| {
        let average = p.sum() as f64 / 3.0;
        if average >= CLARENDON_BRIGHT {
            lift(p, factor)
        } else if average < CLARENDON_DARK {
            scale(p, factor)
        } else {
            p
        }
    })
}

/// Replace every channel with the rounded channel average.
pub fn grayscale(image: &Raster) -> Raster {
    map_pixels(image, |_, _, p| {
        Rgb::gray(truncate_channel(p.sum() as f64 / 3.0 + 0.5))
    })
}

/// Threshold to pure black or white on the integer channel average.
pub fn high_contrast(image: &Raster) -> Raster {
    map_pixels(image, |_, _, p| {
        if p.sum() / 3 >= HIGH_CONTRAST_THRESHOLD {
            Rgb::WHITE
        } else {
            Rgb::BLACK
        }
    })
}

/// Move each channel toward white: `255 - (255 - c) * factor`.
///
/// Smaller factors lighten more; `1.0` is the identity.
pub fn lighten(image: &Raster, factor: f64) -> Raster {
    map_pixels(image, |_, _, p| lift(p, factor))
}

/// Scale each channel toward black: `c * factor`.
pub fn darken(image: &Raster, factor: f64) -> Raster {
    map_pixels(image, |_, _, p| scale(p, factor))
}

/// Reduce each pixel to white, black, or the pure primary of its
/// strongest channel.
///
/// Ties between channels prefer red, then green.
pub fn primary_colors(image: &Raster) -> Raster {
    map_pixels(image, |_, _, p| {
        let sum = p.sum();
        let max = p.red.max(p.green).max(p.blue);
        if sum >= PRIMARY_WHITE_SUM {
            Rgb::WHITE
        } else if sum <= PRIMARY_BLACK_SUM {
            Rgb::BLACK
        } else if max == p.red {
            Rgb::RED
        } else if max == p.green {
            Rgb::GREEN
        } else {
            Rgb::BLUE
        }
    })
}

#[inline]
fn scale(p: Rgb, factor: f64) -> Rgb {
    let f = |c: u8| truncate_channel(c as f64 * factor);
    Rgb::new(f(p.red), f(p.green), f(p.blue))
}

#[inline]
fn lift(p: Rgb, factor: f64) -> Rgb {
    let f = |c: u8| truncate_channel(255.0 - (255.0 - c as f64) * factor);
    Rgb::new(f(p.red), f(p.green), f(p.blue))
}
