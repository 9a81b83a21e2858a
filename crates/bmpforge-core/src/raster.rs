//! In-memory raster buffer shared by the codec and the transform engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for constructing a raster from caller-supplied pixels.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RasterError {
    /// A row in nested input does not match the width of the first row.
    #[error("Ragged rows: row {row} has {actual} pixels, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Flat pixel data does not match `width * height`.
    #[error("Pixel count mismatch: expected {expected} pixels, got {actual}")]
    PixelCountMismatch { expected: usize, actual: usize },
}

/// A single colour sample with three 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Build a sample with all three channels set to `value`.
    pub const fn gray(value: u8) -> Self {
        Self::new(value, value, value)
    }

    /// Sum of the three channels.
    #[inline]
    pub fn sum(self) -> u32 {
        self.red as u32 + self.green as u32 + self.blue as u32
    }

    /// Channels as `[red, green, blue]`.
    #[inline]
    pub fn channels(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([red, green, blue]: [u8; 3]) -> Self {
        Self::new(red, green, blue)
    }
}

/// A rectangular, row-major grid of [`Rgb`] samples.
///
/// Pixels are stored flat, so every row has the same length by
/// construction. A raster with zero width or zero height is the empty
/// sentinel used for "no image": it always compares equal to
/// [`Raster::empty`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Raster {
    /// The empty sentinel.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a raster from flat row-major pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<Rgb>) -> Result<Self, RasterError> {
        let expected = (width as usize) * (height as usize);
        if pixels.len() != expected {
            return Err(RasterError::PixelCountMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        if expected == 0 {
            return Ok(Self::empty());
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Wrap pixels whose length the caller has already sized to
    /// `width * height`.
    pub(crate) fn from_pixels(width: u32, height: u32, pixels: Vec<Rgb>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width as usize) * (height as usize),
            "Pixel buffer size mismatch"
        );
        if width == 0 || height == 0 {
            return Self::empty();
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a raster with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: Rgb) -> Self {
        if width == 0 || height == 0 {
            return Self::empty();
        }
        Self {
            width,
            height,
            pixels: vec![color; (width as usize) * (height as usize)],
        }
    }

    /// Create a raster by evaluating `f(row, col)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Rgb) -> Self {
        if width == 0 || height == 0 {
            return Self::empty();
        }
        let mut pixels = Vec::with_capacity((width as usize) * (height as usize));
        for row in 0..height {
            for col in 0..width {
                pixels.push(f(row, col));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a raster from nested rows, rejecting rows of unequal length.
    pub fn from_rows(rows: Vec<Vec<Rgb>>) -> Result<Self, RasterError> {
        let expected = rows.first().map_or(0, Vec::len);
        for (row, pixels) in rows.iter().enumerate() {
            if pixels.len() != expected {
                return Err(RasterError::RaggedRows {
                    row,
                    expected,
                    actual: pixels.len(),
                });
            }
        }
        let width = expected as u32;
        let height = rows.len() as u32;
        Self::new(width, height, rows.into_iter().flatten().collect())
    }

    /// Copy the pixels out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<Rgb>> {
        self.rows().map(<[Rgb]>::to_vec).collect()
    }

    /// Create a Raster from an image::RgbImage.
    pub fn from_rgb_image(img: &image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.pixels().map(|p| Rgb::from(p.0)).collect();
        Self::new(width, height, pixels).unwrap_or_default()
    }

    /// Convert to an image::RgbImage for interop with the `image` crate.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        let raw = self.pixels.iter().flat_map(|p| p.channels()).collect();
        image::RgbImage::from_raw(self.width, self.height, raw)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this is the empty sentinel.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Pixel at `(row, col)`, or `None` outside the grid.
    pub fn get(&self, row: u32, col: u32) -> Option<Rgb> {
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(self.pixels[self.index(row, col)])
    }

    /// Pixel at `(row, col)`. Panics outside the grid.
    #[inline]
    pub fn pixel(&self, row: u32, col: u32) -> Rgb {
        self.pixels[self.index(row, col)]
    }

    /// One row of pixels. Panics if `row >= height`.
    pub fn row(&self, row: u32) -> &[Rgb] {
        let start = (row as usize) * (self.width as usize);
        &self.pixels[start..start + self.width as usize]
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[Rgb]> + ExactSizeIterator {
        // chunks_exact(0) panics, and an empty raster has no rows anyway
        self.pixels.chunks_exact(self.width.max(1) as usize)
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    #[inline]
    fn index(&self, row: u32, col: u32) -> usize {
        (row as usize) * (self.width as usize) + col as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sentinel() {
        let img = Raster::empty();
        assert!(img.is_empty());
        assert_eq!(img.dimensions(), (0, 0));
        assert_eq!(img.rows().count(), 0);
    }

    #[test]
    fn test_zero_dimension_normalizes_to_empty() {
        assert_eq!(Raster::new(0, 5, vec![]).unwrap(), Raster::empty());
        assert_eq!(Raster::filled(3, 0, Rgb::RED), Raster::empty());
        assert_eq!(Raster::from_rows(vec![vec![], vec![]]).unwrap(), Raster::empty());
    }

    #[test]
    fn test_new_rejects_wrong_pixel_count() {
        let err = Raster::new(2, 2, vec![Rgb::BLACK; 3]).unwrap_err();
        assert_eq!(
            err,
            RasterError::PixelCountMismatch {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let rows = vec![vec![Rgb::RED; 3], vec![Rgb::RED; 2]];
        let err = Raster::from_rows(rows).unwrap_err();
        assert_eq!(
            err,
            RasterError::RaggedRows {
                row: 1,
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_rows_round_trip() {
        let rows = vec![
            vec![Rgb::RED, Rgb::GREEN, Rgb::BLUE],
            vec![Rgb::WHITE, Rgb::BLACK, Rgb::gray(7)],
        ];
        let img = Raster::from_rows(rows.clone()).unwrap();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.pixel(1, 2), Rgb::gray(7));
        assert_eq!(img.row(0), rows[0].as_slice());
        assert_eq!(img.to_rows(), rows);
    }

    #[test]
    fn test_get_out_of_bounds() {
        let img = Raster::filled(2, 3, Rgb::RED);
        assert_eq!(img.get(2, 1), Some(Rgb::RED));
        assert_eq!(img.get(3, 0), None);
        assert_eq!(img.get(0, 2), None);
    }

    #[test]
    fn test_from_fn_is_row_major() {
        let img = Raster::from_fn(3, 2, |row, col| Rgb::gray((row * 10 + col) as u8));
        assert_eq!(img.pixels()[4], Rgb::gray(11));
    }

    #[test]
    fn test_rgb_image_interop() {
        let img = Raster::from_fn(4, 3, |row, col| Rgb::new(row as u8, col as u8, 9));
        let rgb = img.to_rgb_image().unwrap();
        assert_eq!(rgb.get_pixel(2, 1).0, [1, 2, 9]);
        assert_eq!(Raster::from_rgb_image(&rgb), img);
    }

    #[test]
    fn test_rgb_sum_and_channels() {
        let p = Rgb::new(200, 100, 50);
        assert_eq!(p.sum(), 350);
        assert_eq!(p.channels(), [200, 100, 50]);
    }
}
