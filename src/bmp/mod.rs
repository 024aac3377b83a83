//! BMP parsing and per-pixel decoding.
//!
//! Use [`crate::ConvertRequest`] for whole-image conversion; the pieces here
//! are public for callers that drive decoding themselves.

mod decode;
mod header;
mod palette;
mod utils;

pub use decode::{BitDepthFormat, PixelDecoder, decode_pixel};
pub use header::{
    BmpHeader, FILE_HEADER_SIZE, FileHeader, INFO_HEADER_SIZE, InfoHeader, PALETTE_ENTRY_SIZE,
};
pub use palette::{ChannelMasks, MASK_TABLE_SIZE, PaletteEntry, PaletteTable};

use crate::error::BitmapError;
use crate::geometry::Geometry;

/// Parse only the headers (fast probe).
pub fn probe(data: &[u8]) -> Result<BmpHeader, BitmapError> {
    BmpHeader::parse(data)
}

/// Whether `data` starts with the `BM` signature.
pub fn has_signature(data: &[u8]) -> bool {
    data.starts_with(&header::SIGNATURE)
}

/// A parsed image: headers, palette and derived layout, borrowing the
/// file bytes.
#[derive(Clone, Debug)]
pub struct BmpImage<'a> {
    data: &'a [u8],
    header: BmpHeader,
    format: BitDepthFormat,
    palette: PaletteTable,
    row_stride: usize,
}

impl<'a> BmpImage<'a> {
    /// Parse headers, resolve the pixel format, load the palette and
    /// compute the row stride.
    pub fn parse(data: &'a [u8]) -> Result<Self, BitmapError> {
        let header = BmpHeader::parse(data)?;
        let format = BitDepthFormat::from_header(&header)?;
        let palette = match format {
            BitDepthFormat::OneBpp
            | BitDepthFormat::FourBpp
            | BitDepthFormat::EightBpp
            | BitDepthFormat::SixteenBpp { mask_mode: true } => {
                PaletteTable::from_header(data, &header)?
            }
            _ => PaletteTable::default(),
        };
        let row_stride = header.row_stride()?;
        Ok(Self {
            data,
            header,
            format,
            palette,
            row_stride,
        })
    }

    #[inline]
    pub fn header(&self) -> &BmpHeader {
        &self.header
    }

    #[inline]
    pub fn format(&self) -> BitDepthFormat {
        self.format
    }

    #[inline]
    pub fn palette(&self) -> &PaletteTable {
        &self.palette
    }

    #[inline]
    pub fn row_stride(&self) -> usize {
        self.row_stride
    }

    /// A decoder bound to this image's palette.
    pub fn decoder(&self) -> PixelDecoder<'_> {
        PixelDecoder::new(self.format, &self.palette)
    }

    /// Storage index of the row displayed at `display_row` (0 = top).
    ///
    /// Bottom-up files store the top row last.
    ///
    /// # Panics
    ///
    /// Debug builds panic if `display_row` is not below the image height.
    #[inline]
    pub fn stored_row(&self, display_row: usize) -> usize {
        debug_assert!(
            display_row < self.header.height(),
            "display row {display_row} outside {} rows",
            self.header.height()
        );
        if self.header.is_top_down() {
            display_row
        } else {
            self.header.height() - display_row - 1
        }
    }

    fn row_start(&self, stored_row: usize) -> Option<usize> {
        self.row_stride
            .checked_mul(stored_row)
            .and_then(|off| off.checked_add(self.header.pixel_offset()))
    }

    /// Bytes of one stored row, cut short at the end of the buffer.
    pub fn row(&self, stored_row: usize) -> Result<&'a [u8], BitmapError> {
        let data: &'a [u8] = self.data;
        match self.row_start(stored_row) {
            Some(start) if start <= data.len() => {
                let end = start.saturating_add(self.row_stride).min(data.len());
                Ok(&data[start..end])
            }
            start => Err(BitmapError::truncated(
                start.unwrap_or(usize::MAX),
                self.row_stride,
                data.len(),
            )),
        }
    }

    /// Check that every byte the `window` needs lies inside the buffer.
    ///
    /// Run before the first pixel is emitted so that a short file fails
    /// without producing partial output.
    pub fn check_window(&self, window: &Geometry) -> Result<(), BitmapError> {
        if window.rows == 0 || window.cols == 0 {
            return Ok(());
        }
        let needed = self
            .format
            .row_bytes(window.cols)
            .ok_or(BitmapError::DimensionsTooLarge {
                width: window.cols as u32,
                height: window.rows as u32,
            })?;
        // The highest stored row the window touches.
        let last = if self.header.is_top_down() {
            window.rows - 1
        } else {
            self.header.height() - 1
        };
        let len = self.data.len();
        let start = self
            .row_start(last)
            .ok_or_else(|| BitmapError::truncated(usize::MAX, needed, len))?;
        if start.checked_add(needed).is_none_or(|end| end > len) {
            return Err(BitmapError::truncated(start, needed, len));
        }
        Ok(())
    }
}
