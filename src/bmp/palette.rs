//! Palette region: classic color table or 16 bpp channel masks.

use alloc::vec::Vec;

use super::header::{BmpHeader, Cursor, PALETTE_ENTRY_SIZE};
use crate::error::BitmapError;
use crate::pixel::DecodedPixel;

/// Palette region size that switches 16 bpp decoding to mask mode:
/// three 4-byte mask words (red, green, blue).
pub const MASK_TABLE_SIZE: usize = 12;

/// One 4-byte palette entry as stored in the file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaletteEntry {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
    pub reserved: u8,
}

impl PaletteEntry {
    /// The opaque pixel for this entry; the reserved byte is ignored.
    #[inline]
    pub fn to_pixel(self) -> DecodedPixel {
        DecodedPixel::opaque(self.red, self.green, self.blue)
    }
}

/// Ordered color table read from the palette region.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PaletteTable {
    entries: Vec<PaletteEntry>,
}

impl PaletteTable {
    /// Read `entry_count` 4-byte entries starting at `offset`.
    ///
    /// An empty table is valid wherever `offset` points.
    pub fn load(data: &[u8], offset: usize, entry_count: usize) -> Result<Self, BitmapError> {
        if entry_count == 0 {
            return Ok(Self::default());
        }
        let needed = entry_count
            .checked_mul(PALETTE_ENTRY_SIZE)
            .ok_or_else(|| BitmapError::truncated(offset, usize::MAX, data.len()))?;
        if offset.checked_add(needed).is_none_or(|end| end > data.len()) {
            return Err(BitmapError::truncated(offset, needed, data.len()));
        }

        let mut cur = Cursor::at(data, offset);
        let mut entries = Vec::with_capacity(entry_count);
        for _ in 0..entry_count {
            let [blue, green, red, reserved] = cur.read_fixed_bytes::<4>()?;
            entries.push(PaletteEntry {
                blue,
                green,
                red,
                reserved,
            });
        }
        Ok(Self { entries })
    }

    /// Load the table described by `header`.
    pub fn from_header(data: &[u8], header: &BmpHeader) -> Result<Self, BitmapError> {
        Self::load(data, header.palette_offset(), header.palette_entry_count())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    /// Look up a decoded palette index.
    #[inline]
    pub fn lookup(&self, index: usize) -> Result<DecodedPixel, BitmapError> {
        self.entries
            .get(index)
            .map(|e| e.to_pixel())
            .ok_or(BitmapError::PaletteIndexOutOfRange {
                index,
                entries: self.entries.len(),
            })
    }
}

/// Red, green and blue masks of a 16 bpp mask-mode image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChannelMasks {
    pub red: u32,
    pub green: u32,
    pub blue: u32,
}

impl ChannelMasks {
    /// Reinterpret the first three palette entries as little-endian mask words.
    ///
    /// Returns `None` unless the table holds exactly the three words of a
    /// mask table.
    pub fn from_palette(palette: &PaletteTable) -> Option<Self> {
        let [r, g, b] = palette.entries() else {
            return None;
        };
        let word = |e: &PaletteEntry| u32::from_le_bytes([e.blue, e.green, e.red, e.reserved]);
        Some(Self {
            red: word(r),
            green: word(g),
            blue: word(b),
        })
    }
}
