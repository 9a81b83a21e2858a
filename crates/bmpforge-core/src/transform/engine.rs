//! Shared loops for every transform.
//!
//! Per-pixel maps go through [`map_pixels`]; operations that move pixels
//! around (rotation, enlargement) go through [`remap`]. Both fill output
//! rows in parallel, since no two rows alias.

use rayon::prelude::*;

use crate::raster::{Raster, Rgb};

/// Apply `f(row, col, pixel)` to every pixel, keeping the dimensions.
///
/// Empty input yields empty output.
pub fn map_pixels<F>(image: &Raster, f: F) -> Raster
where
    F: Fn(u32, u32, Rgb) -> Rgb + Sync,
{
    if image.is_empty() {
        return Raster::empty();
    }
    remap(image.width(), image.height(), |row, col| {
        f(row, col, image.pixel(row, col))
    })
}

/// Build a `width` x `height` raster by asking `sample(row, col)` for each
/// output pixel.
///
/// Geometric transforms pass a closure that inverse-maps the output
/// coordinate into the source image.
pub fn remap<F>(width: u32, height: u32, sample: F) -> Raster
where
    F: Fn(u32, u32) -> Rgb + Sync,
{
    if width == 0 || height == 0 {
        return Raster::empty();
    }

    let mut pixels = vec![Rgb::BLACK; (width as usize) * (height as usize)];
    pixels
        .par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(row, out)| {
            for (col, pixel) in out.iter_mut().enumerate() {
                *pixel = sample(row as u32, col as u32);
            }
        });

    Raster::from_pixels(width, height, pixels)
}

/// Truncate toward zero, then clamp into a channel.
#[inline]
pub(crate) fn truncate_channel(value: f64) -> u8 {
    (value as i64).clamp(0, 255) as u8
}

/// Round to nearest (halves away from zero), then clamp into a channel.
#[inline]
pub(crate) fn round_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_pixels_keeps_dimensions() {
        let img = Raster::filled(7, 3, Rgb::gray(10));
        let out = map_pixels(&img, |_, _, p| Rgb::gray(p.red * 2));
        assert_eq!(out.dimensions(), (7, 3));
        assert!(out.pixels().iter().all(|&p| p == Rgb::gray(20)));
    }

    #[test]
    fn test_map_pixels_passes_coordinates() {
        let img = Raster::filled(4, 2, Rgb::BLACK);
        let out = map_pixels(&img, |row, col, _| Rgb::new(row as u8, col as u8, 0));
        assert_eq!(out.pixel(1, 3), Rgb::new(1, 3, 0));
    }

    #[test]
    fn test_map_pixels_leaves_input_untouched() {
        let img = Raster::filled(2, 2, Rgb::RED);
        let _ = map_pixels(&img, |_, _, _| Rgb::BLUE);
        assert_eq!(img, Raster::filled(2, 2, Rgb::RED));
    }

    #[test]
    fn test_map_pixels_empty() {
        assert!(map_pixels(&Raster::empty(), |_, _, p| p).is_empty());
    }

    #[test]
    fn test_remap_zero_dimensions() {
        assert!(remap(0, 5, |_, _| Rgb::WHITE).is_empty());
        assert!(remap(5, 0, |_, _| Rgb::WHITE).is_empty());
    }

    #[test]
    fn test_remap_matches_from_fn() {
        let f = |row: u32, col: u32| Rgb::new(row as u8, col as u8, (row * col) as u8);
        assert_eq!(remap(9, 6, f), Raster::from_fn(9, 6, f));
    }

    #[test]
    fn test_truncate_channel() {
        assert_eq!(truncate_channel(12.9), 12);
        assert_eq!(truncate_channel(-0.9), 0);
        assert_eq!(truncate_channel(-300.0), 0);
        assert_eq!(truncate_channel(300.0), 255);
        assert_eq!(truncate_channel(f64::NAN), 0);
    }

    #[test]
    fn test_round_channel() {
        assert_eq!(round_channel(12.5), 13);
        assert_eq!(round_channel(12.49), 12);
        assert_eq!(round_channel(-4.0), 0);
        assert_eq!(round_channel(255.6), 255);
    }
}
