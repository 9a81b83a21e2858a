//! Fixed-offset BMP header fields and the row layout derived from them.
//!
//! # Layout
//!
//! ```text
//! offset  size  field
//!      0     2  signature "BM"
//!      2     4  file size
//!      6     4  reserved
//!     10     4  pixel array offset
//!     14     4  descriptor header size (40)
//!     18     4  width
//!     22     4  height
//!     26     2  colour planes (1)
//!     28     2  bits per pixel
//!     30     4  compression
//!     34     4  raw pixel data size
//!     38     4  horizontal resolution (pixels/metre)
//!     42     4  vertical resolution (pixels/metre)
//!     46     4  palette colours
//!     50     4  important colours
//! ```
//!
//! All integers are little-endian.

use super::DecodeError;

/// Size of the primary file header.
pub const FILE_HEADER_SIZE: u32 = 14;

/// Size of the BITMAPINFOHEADER descriptor.
pub const INFO_HEADER_SIZE: u32 = 40;

/// Pixel array offset written by the encoder (no palette).
pub const PIXEL_ARRAY_OFFSET: u32 = FILE_HEADER_SIZE + INFO_HEADER_SIZE;

/// Magic bytes at the start of every BMP file.
pub const SIGNATURE: [u8; 2] = *b"BM";

/// Print resolution written by the encoder (72 DPI).
pub const PIXELS_PER_METER: u32 = 2835;

/// Uncompressed RGB.
pub const COMPRESSION_NONE: u32 = 0;

/// Uncompressed with channel masks; used by 32-bit files.
pub const COMPRESSION_BITFIELDS: u32 = 3;

/// Bit depth written by the encoder.
pub const OUTPUT_BITS_PER_PIXEL: u16 = 24;

/// Container metadata read from (or written to) the fixed header offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BmpHeader {
    /// Declared total file size in bytes.
    pub file_size: u32,
    /// Byte offset of the first pixel row.
    pub pixel_offset: u32,
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u16,
    pub compression: u32,
}

impl BmpHeader {
    /// Parse the header fields from the start of a file.
    ///
    /// Only the fields are read here; [`BmpHeader::validate`] checks that
    /// they describe a layout this codec can decode.
    pub fn parse(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() < PIXEL_ARRAY_OFFSET as usize {
            return Err(DecodeError::TooShort { len: bytes.len() });
        }
        let signature = [bytes[0], bytes[1]];
        if signature != SIGNATURE {
            return Err(DecodeError::InvalidSignature(signature));
        }

        Ok(Self {
            file_size: read_u32(bytes, 2),
            pixel_offset: read_u32(bytes, 10),
            width: read_u32(bytes, 18),
            height: read_u32(bytes, 22),
            bits_per_pixel: read_u16(bytes, 28),
            compression: read_u32(bytes, 30),
        })
    }

    /// Header for a 24-bit encoding of a `width` x `height` raster.
    ///
    /// Returns `None` if the file size does not fit in 32 bits.
    pub fn for_output(width: u32, height: u32) -> Option<Self> {
        let mut header = Self {
            file_size: 0,
            pixel_offset: PIXEL_ARRAY_OFFSET,
            width,
            height,
            bits_per_pixel: OUTPUT_BITS_PER_PIXEL,
            compression: COMPRESSION_NONE,
        };
        header.file_size = u32::try_from(header.expected_file_size()).ok()?;
        Some(header)
    }

    /// Check the declared geometry against itself and the available data.
    pub fn validate(&self, available: usize) -> Result<(), DecodeError> {
        if !matches!(self.bits_per_pixel, 24 | 32) {
            return Err(DecodeError::UnsupportedBitDepth(self.bits_per_pixel));
        }
        if !matches!(self.compression, COMPRESSION_NONE | COMPRESSION_BITFIELDS) {
            return Err(DecodeError::UnsupportedCompression(self.compression));
        }

        let expected = self.expected_file_size();
        if u64::from(self.file_size) != expected {
            return Err(DecodeError::SizeMismatch {
                declared: u64::from(self.file_size),
                expected,
            });
        }

        if self.width == 0 || self.height == 0 {
            return Err(DecodeError::ZeroDimensions {
                width: self.width,
                height: self.height,
            });
        }

        if (available as u64) < expected {
            return Err(DecodeError::Truncated {
                expected,
                actual: available as u64,
            });
        }
        Ok(())
    }

    pub fn bytes_per_pixel(&self) -> u64 {
        u64::from(self.bits_per_pixel / 8)
    }

    /// Unpadded bytes per row.
    pub fn row_stride(&self) -> u64 {
        u64::from(self.width) * self.bytes_per_pixel()
    }

    /// Zero bytes appended to each row.
    pub fn row_padding(&self) -> u64 {
        row_padding(self.row_stride())
    }

    /// Bytes per row on disk, padding included.
    pub fn padded_row_len(&self) -> u64 {
        self.row_stride() + self.row_padding()
    }

    /// Size of the pixel array, padding included.
    ///
    /// Saturates instead of wrapping so hostile headers fail the size check.
    pub fn pixel_array_len(&self) -> u64 {
        self.padded_row_len().saturating_mul(u64::from(self.height))
    }

    /// File size implied by the offset and row geometry.
    pub fn expected_file_size(&self) -> u64 {
        u64::from(self.pixel_offset).saturating_add(self.pixel_array_len())
    }

    /// Serialize both headers (54 bytes) onto `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        // Primary header
        out.extend_from_slice(&SIGNATURE);
        out.extend_from_slice(&self.file_size.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes()); // reserved
        out.extend_from_slice(&self.pixel_offset.to_le_bytes());

        // Descriptor header
        let raw_size = self.file_size.saturating_sub(self.pixel_offset);
        out.extend_from_slice(&INFO_HEADER_SIZE.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes()); // planes
        out.extend_from_slice(&self.bits_per_pixel.to_le_bytes());
        out.extend_from_slice(&self.compression.to_le_bytes());
        out.extend_from_slice(&raw_size.to_le_bytes());
        out.extend_from_slice(&PIXELS_PER_METER.to_le_bytes());
        out.extend_from_slice(&PIXELS_PER_METER.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes()); // palette colours
        out.extend_from_slice(&0u32.to_le_bytes()); // important colours
    }
}

/// Bytes needed to round `stride` up to the next multiple of 4.
pub fn row_padding(stride: u64) -> u64 {
    (4 - stride % 4) % 4
}

#[inline]
fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

#[inline]
fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(width: u32, height: u32, bits_per_pixel: u16) -> BmpHeader {
        let mut h = BmpHeader {
            file_size: 0,
            pixel_offset: PIXEL_ARRAY_OFFSET,
            width,
            height,
            bits_per_pixel,
            compression: COMPRESSION_NONE,
        };
        h.file_size = h.expected_file_size() as u32;
        h
    }

    #[test]
    fn test_row_padding_aligned_width() {
        // 4 * 3 = 12 bytes, already aligned
        let h = header(4, 1, 24);
        assert_eq!(h.row_stride(), 12);
        assert_eq!(h.row_padding(), 0);
    }

    #[test]
    fn test_row_padding_width_five() {
        let h = header(5, 1, 24);
        assert_eq!(h.row_stride(), 15);
        assert_eq!(h.row_padding(), 1);
        assert_eq!(h.padded_row_len(), 16);
    }

    #[test]
    fn test_row_padding_all_remainders() {
        assert_eq!(row_padding(0), 0);
        assert_eq!(row_padding(1), 3);
        assert_eq!(row_padding(2), 2);
        assert_eq!(row_padding(3), 1);
        assert_eq!(row_padding(4), 0);
    }

    #[test]
    fn test_32_bit_rows_never_padded() {
        for width in 1..10 {
            assert_eq!(header(width, 1, 32).row_padding(), 0);
        }
    }

    #[test]
    fn test_write_then_parse() {
        let h = BmpHeader::for_output(5, 3).unwrap();
        let mut bytes = Vec::new();
        h.write_to(&mut bytes);
        assert_eq!(bytes.len(), PIXEL_ARRAY_OFFSET as usize);
        assert_eq!(BmpHeader::parse(&bytes).unwrap(), h);
        assert_eq!(h.file_size, 54 + 16 * 3);
    }

    #[test]
    fn test_written_descriptor_fields() {
        let h = BmpHeader::for_output(2, 2).unwrap();
        let mut bytes = Vec::new();
        h.write_to(&mut bytes);

        assert_eq!(&bytes[0..2], b"BM");
        assert_eq!(read_u32(&bytes, 6), 0);
        assert_eq!(read_u32(&bytes, 14), 40);
        assert_eq!(read_u16(&bytes, 26), 1);
        assert_eq!(read_u16(&bytes, 28), 24);
        assert_eq!(read_u32(&bytes, 34), 16); // two rows of 6 + 2 padding
        assert_eq!(read_u32(&bytes, 38), 2835);
        assert_eq!(read_u32(&bytes, 42), 2835);
        assert_eq!(read_u32(&bytes, 46), 0);
        assert_eq!(read_u32(&bytes, 50), 0);
    }

    #[test]
    fn test_for_output_rejects_oversized() {
        assert!(BmpHeader::for_output(u32::MAX, u32::MAX).is_none());
    }

    #[test]
    fn test_parse_too_short() {
        let err = BmpHeader::parse(&[b'B', b'M', 0, 0]).unwrap_err();
        assert!(matches!(err, DecodeError::TooShort { len: 4 }));
    }

    #[test]
    fn test_parse_bad_signature() {
        let mut bytes = vec![0u8; 54];
        bytes[0] = b'P';
        bytes[1] = b'K';
        let err = BmpHeader::parse(&bytes).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidSignature([b'P', b'K'])));
    }

    #[test]
    fn test_validate_size_mismatch() {
        let mut h = header(3, 3, 24);
        h.file_size += 1;
        let err = h.validate(1000).unwrap_err();
        assert!(matches!(err, DecodeError::SizeMismatch { .. }));
    }

    #[test]
    fn test_validate_bit_depth() {
        let h = header(3, 3, 8);
        assert!(matches!(
            h.validate(1000),
            Err(DecodeError::UnsupportedBitDepth(8))
        ));
    }

    #[test]
    fn test_validate_compression() {
        let mut h = header(3, 3, 24);
        h.compression = 1; // RLE8
        assert!(matches!(
            h.validate(1000),
            Err(DecodeError::UnsupportedCompression(1))
        ));
    }

    #[test]
    fn test_validate_truncated() {
        let h = header(3, 3, 24);
        let err = h.validate(h.file_size as usize - 1).unwrap_err();
        assert!(matches!(err, DecodeError::Truncated { .. }));
    }

    #[test]
    fn test_validate_zero_dimensions() {
        let h = header(0, 3, 24);
        assert!(matches!(
            h.validate(1000),
            Err(DecodeError::ZeroDimensions { width: 0, height: 3 })
        ));
    }
}
