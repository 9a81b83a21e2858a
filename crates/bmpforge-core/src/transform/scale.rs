//! Nearest-neighbour block enlargement.

use tracing::debug;

use super::engine::remap;
use crate::codec::BmpHeader;
use crate::raster::Raster;

/// Enlarge by integer factors, turning each source pixel into an
/// `x_scale` x `y_scale` block.
///
/// Returns the empty raster if either factor is not positive, the input is
/// empty, or the enlarged image would be too large to encode as a BMP.
pub fn enlarge(image: &Raster, x_scale: i32, y_scale: i32) -> Raster {
    if image.is_empty() || x_scale <= 0 || y_scale <= 0 {
        return Raster::empty();
    }
    let (x_scale, y_scale) = (x_scale as u32, y_scale as u32);

    let (Some(width), Some(height)) = (
        image.width().checked_mul(x_scale),
        image.height().checked_mul(y_scale),
    ) else {
        debug!(x_scale, y_scale, "Enlarged dimensions overflow");
        return Raster::empty();
    };
    if BmpHeader::for_output(width, height).is_none() {
        debug!(width, height, "Enlarged image exceeds BMP size limit");
        return Raster::empty();
    }

    remap(width, height, |row, col| {
        image.pixel(row / y_scale, col / x_scale)
    })
}
