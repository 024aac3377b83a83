//! BMP file and info header parsing.
//!
//! Only the 14-byte `BITMAPFILEHEADER` and the first 40 bytes of the info
//! header (`BITMAPINFOHEADER`) are interpreted. Larger V4/V5 info headers are
//! accepted; their extra fields are skipped and the palette region starts
//! right after them.

use crate::error::BitmapError;

/// Size of `BITMAPFILEHEADER`.
pub const FILE_HEADER_SIZE: usize = 14;
/// Size of `BITMAPINFOHEADER`.
pub const INFO_HEADER_SIZE: usize = 40;
/// Bytes per palette entry (blue, green, red, reserved).
pub const PALETTE_ENTRY_SIZE: usize = 4;

pub(crate) const SIGNATURE: [u8; 2] = *b"BM";
const BI_RGB: u32 = 0;

// ── Cursor for reading from &[u8] ───────────────────────────────────

pub(crate) struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub(crate) fn at(data: &'a [u8], pos: usize) -> Self {
        Self { data, pos }
    }

    pub(crate) fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], BitmapError> {
        let bytes = self
            .pos
            .checked_add(N)
            .and_then(|end| self.data.get(self.pos..end))
            .ok_or_else(|| BitmapError::truncated(self.pos, N, self.data.len()))?;
        let mut buf = [0u8; N];
        buf.copy_from_slice(bytes);
        self.pos += N;
        Ok(buf)
    }

    pub(crate) fn get_u16_le(&mut self) -> Result<u16, BitmapError> {
        self.read_fixed_bytes().map(u16::from_le_bytes)
    }

    pub(crate) fn get_u32_le(&mut self) -> Result<u32, BitmapError> {
        self.read_fixed_bytes().map(u32::from_le_bytes)
    }

    pub(crate) fn get_i32_le(&mut self) -> Result<i32, BitmapError> {
        self.read_fixed_bytes().map(i32::from_le_bytes)
    }
}

// ── Header structs ──────────────────────────────────────────────────

/// `BITMAPFILEHEADER` (reserved words dropped).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileHeader {
    pub signature: [u8; 2],
    /// `bfSize`
    pub file_size: u32,
    /// `bfOffBits`
    pub pixel_offset: u32,
}

/// `BITMAPINFOHEADER`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InfoHeader {
    pub header_size: u32,
    pub width: i32,
    /// Negative for top-down storage.
    pub height: i32,
    pub planes: u16,
    pub bit_count: u16,
    pub compression: u32,
    pub image_size: u32,
    pub x_pels_per_meter: i32,
    pub y_pels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

/// Both fixed headers plus the fields derived from them.
///
/// Immutable once parsed; holds no reference to the input buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpHeader {
    pub file: FileHeader,
    pub info: InfoHeader,
}

impl BmpHeader {
    /// Parse and validate the headers at the start of `data`.
    ///
    /// Checks, in order: buffer length, `BM` signature, info header size,
    /// compression, bit depth, then width and height.
    pub fn parse(data: &[u8]) -> Result<Self, BitmapError> {
        let min_len = FILE_HEADER_SIZE + INFO_HEADER_SIZE;
        if data.len() < min_len {
            return Err(BitmapError::truncated(0, min_len, data.len()));
        }

        let mut cur = Cursor::new(data);

        let signature = cur.read_fixed_bytes::<2>()?;
        if signature != SIGNATURE {
            return Err(BitmapError::InvalidSignature { found: signature });
        }
        let file_size = cur.get_u32_le()?;
        // bfReserved1, bfReserved2
        cur.read_fixed_bytes::<4>()?;
        let pixel_offset = cur.get_u32_le()?;

        let info = InfoHeader {
            header_size: cur.get_u32_le()?,
            width: cur.get_i32_le()?,
            height: cur.get_i32_le()?,
            planes: cur.get_u16_le()?,
            bit_count: cur.get_u16_le()?,
            compression: cur.get_u32_le()?,
            image_size: cur.get_u32_le()?,
            x_pels_per_meter: cur.get_i32_le()?,
            y_pels_per_meter: cur.get_i32_le()?,
            colors_used: cur.get_u32_le()?,
            colors_important: cur.get_u32_le()?,
        };

        if (info.header_size as usize) < INFO_HEADER_SIZE {
            return Err(BitmapError::InvalidHeader(alloc::format!(
                "info header size {} is smaller than {INFO_HEADER_SIZE}",
                info.header_size
            )));
        }
        if info.compression != BI_RGB {
            return Err(BitmapError::UnsupportedCompression(info.compression));
        }
        if !matches!(info.bit_count, 1 | 4 | 8 | 16 | 24 | 32) {
            return Err(BitmapError::UnsupportedBitDepth(info.bit_count));
        }
        if info.width <= 0 || info.height == 0 {
            return Err(BitmapError::InvalidGeometry {
                width: info.width,
                height: info.height,
            });
        }

        Ok(Self {
            file: FileHeader {
                signature,
                file_size,
                pixel_offset,
            },
            info,
        })
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.info.width.unsigned_abs() as usize
    }

    /// Number of stored rows, `abs(biHeight)`.
    #[inline]
    pub fn height(&self) -> usize {
        self.info.height.unsigned_abs() as usize
    }

    /// Rows stored first-to-last from the top of the image (negative height).
    #[inline]
    pub fn is_top_down(&self) -> bool {
        self.info.height < 0
    }

    #[inline]
    pub fn bit_count(&self) -> u16 {
        self.info.bit_count
    }

    /// Offset of the first pixel byte, `bfOffBits`.
    #[inline]
    pub fn pixel_offset(&self) -> usize {
        self.file.pixel_offset as usize
    }

    /// Offset where the palette (or 16 bpp mask table) starts.
    #[inline]
    pub fn palette_offset(&self) -> usize {
        FILE_HEADER_SIZE.saturating_add(self.info.header_size as usize)
    }

    /// Bytes between the headers and the pixel data; zero if `bfOffBits`
    /// points inside the headers.
    #[inline]
    pub fn palette_byte_size(&self) -> usize {
        self.pixel_offset().saturating_sub(self.palette_offset())
    }

    /// `palette_byte_size / 4`.
    #[inline]
    pub fn palette_entry_count(&self) -> usize {
        self.palette_byte_size() / PALETTE_ENTRY_SIZE
    }

    /// Bytes per stored row, padding included.
    ///
    /// `biSizeImage / abs(biHeight)`, or the 4-byte aligned row size when
    /// `biSizeImage` is zero. A stride too short to hold one row of pixels
    /// is rejected.
    pub fn row_stride(&self) -> Result<usize, BitmapError> {
        let height = self.height();
        let invalid = || BitmapError::InvalidRowStride {
            image_size: self.info.image_size,
            height: height as u32,
        };
        if height == 0 {
            return Err(invalid());
        }

        let row_bits = self
            .width()
            .checked_mul(usize::from(self.bit_count()))
            .ok_or_else(invalid)?;
        let min_stride = row_bits.div_ceil(8);

        let stride = if self.info.image_size == 0 {
            row_bits.div_ceil(32).checked_mul(4).ok_or_else(invalid)?
        } else {
            self.info.image_size as usize / height
        };

        if stride < min_stride {
            return Err(invalid());
        }
        Ok(stride)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn header_bytes(bit_count: u16, width: i32, height: i32, off_bits: u32) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&off_bits.to_le_bytes());
        out.extend_from_slice(&40u32.to_le_bytes());
        out.extend_from_slice(&width.to_le_bytes());
        out.extend_from_slice(&height.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&bit_count.to_le_bytes());
        out.extend_from_slice(&[0u8; 24]);
        out
    }

    #[test]
    fn palette_size_derived_from_offset() {
        let h = BmpHeader::parse(&header_bytes(8, 4, 4, 54 + 1024)).unwrap();
        assert_eq!(h.palette_byte_size(), 1024);
        assert_eq!(h.palette_entry_count(), 256);
    }

    #[test]
    fn offset_inside_headers_gives_empty_palette() {
        let h = BmpHeader::parse(&header_bytes(24, 4, 4, 20)).unwrap();
        assert_eq!(h.palette_byte_size(), 0);
        assert_eq!(h.palette_entry_count(), 0);
    }

    #[test]
    fn entry_count_rounds_down() {
        let h = BmpHeader::parse(&header_bytes(16, 4, 4, 54 + 14)).unwrap();
        assert_eq!(h.palette_entry_count(), 3);
    }

    #[test]
    fn rejects_bad_signature() {
        let mut bytes = header_bytes(24, 1, 1, 54);
        bytes[..2].copy_from_slice(b"XX");
        assert!(matches!(
            BmpHeader::parse(&bytes),
            Err(BitmapError::InvalidSignature { found }) if found == *b"XX"
        ));
    }

    #[test]
    fn rejects_compression() {
        let mut bytes = header_bytes(8, 1, 1, 54);
        bytes[30..34].copy_from_slice(&1u32.to_le_bytes());
        assert!(matches!(
            BmpHeader::parse(&bytes),
            Err(BitmapError::UnsupportedCompression(1))
        ));
    }

    #[test]
    fn rejects_bit_depth() {
        assert!(matches!(
            BmpHeader::parse(&header_bytes(2, 1, 1, 54)),
            Err(BitmapError::UnsupportedBitDepth(2))
        ));
    }

    #[test]
    fn rejects_geometry() {
        assert!(matches!(
            BmpHeader::parse(&header_bytes(24, 0, 1, 54)),
            Err(BitmapError::InvalidGeometry { width: 0, height: 1 })
        ));
        assert!(matches!(
            BmpHeader::parse(&header_bytes(24, 3, 0, 54)),
            Err(BitmapError::InvalidGeometry { width: 3, height: 0 })
        ));
    }

    #[test]
    fn rejects_short_buffer() {
        assert!(matches!(
            BmpHeader::parse(b"BM"),
            Err(BitmapError::TruncatedBuffer { needed: 54, len: 2, .. })
        ));
    }

    #[test]
    fn stride_from_image_size() {
        let mut bytes = header_bytes(24, 3, -2, 54);
        bytes[34..38].copy_from_slice(&24u32.to_le_bytes());
        let h = BmpHeader::parse(&bytes).unwrap();
        assert!(h.is_top_down());
        assert_eq!(h.row_stride().unwrap(), 12);
    }

    #[test]
    fn stride_derived_when_image_size_zero() {
        let h = BmpHeader::parse(&header_bytes(1, 33, 1, 62)).unwrap();
        assert_eq!(h.row_stride().unwrap(), 8);
        let h = BmpHeader::parse(&header_bytes(24, 3, 1, 54)).unwrap();
        assert_eq!(h.row_stride().unwrap(), 12);
    }

    #[test]
    fn stride_shorter_than_row_rejected() {
        let mut bytes = header_bytes(24, 4, 2, 54);
        bytes[34..38].copy_from_slice(&8u32.to_le_bytes());
        let h = BmpHeader::parse(&bytes).unwrap();
        assert!(matches!(
            h.row_stride(),
            Err(BitmapError::InvalidRowStride { image_size: 8, height: 2 })
        ));
    }
}
