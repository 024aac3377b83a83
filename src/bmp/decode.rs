//! Per-pixel decoding for every supported bit depth.
//!
//! The format is resolved once per image into a [`BitDepthFormat`]; the
//! matching decode function is then selected once and called for every
//! pixel. All reads go through bounds-checked slice accessors, so a short
//! row surfaces as [`BitmapError::TruncatedBuffer`].

use super::header::BmpHeader;
use super::palette::{ChannelMasks, MASK_TABLE_SIZE, PaletteTable};
use super::utils::{mask_shift, rescale, shift_signed};
use crate::error::BitmapError;
use crate::pixel::DecodedPixel;

/// Storage format of one source pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BitDepthFormat {
    OneBpp,
    FourBpp,
    EightBpp,
    /// 16 bits per pixel; `mask_mode` when the palette region is a 3-word
    /// mask table, fixed 5-6-5 packing otherwise.
    SixteenBpp { mask_mode: bool },
    TwentyFourBpp,
    ThirtyTwoBpp,
}

impl BitDepthFormat {
    /// Resolve the format of a parsed header.
    ///
    /// Mask mode is chosen from the palette region size, not the bit depth
    /// alone.
    pub fn from_header(header: &BmpHeader) -> Result<Self, BitmapError> {
        Ok(match header.bit_count() {
            1 => Self::OneBpp,
            4 => Self::FourBpp,
            8 => Self::EightBpp,
            16 => Self::SixteenBpp {
                mask_mode: header.palette_byte_size() == MASK_TABLE_SIZE,
            },
            24 => Self::TwentyFourBpp,
            32 => Self::ThirtyTwoBpp,
            other => return Err(BitmapError::UnsupportedBitDepth(other)),
        })
    }

    pub fn bits_per_pixel(self) -> usize {
        match self {
            Self::OneBpp => 1,
            Self::FourBpp => 4,
            Self::EightBpp => 8,
            Self::SixteenBpp { .. } => 16,
            Self::TwentyFourBpp => 24,
            Self::ThirtyTwoBpp => 32,
        }
    }

    /// Whether pixels are palette indices.
    pub fn is_indexed(self) -> bool {
        matches!(self, Self::OneBpp | Self::FourBpp | Self::EightBpp)
    }

    /// Bytes of a row needed to hold pixels `0..cols`.
    pub fn row_bytes(self, cols: usize) -> Option<usize> {
        cols.checked_mul(self.bits_per_pixel())
            .map(|bits| bits.div_ceil(8))
    }
}

/// Context shared by every pixel of one image. `masks` is only read by
/// the masked 16 bpp decoder.
struct DecodeContext<'p> {
    palette: &'p PaletteTable,
    masks: MaskShifts,
}

#[derive(Clone, Copy, Debug, Default)]
struct MaskShifts {
    masks: ChannelMasks,
    shifts: [i32; 3],
    bits: [u32; 3],
}

impl MaskShifts {
    fn new(masks: ChannelMasks) -> Self {
        let ChannelMasks { red, green, blue } = masks;
        Self {
            masks,
            shifts: [mask_shift(red), mask_shift(green), mask_shift(blue)],
            bits: [red.count_ones(), green.count_ones(), blue.count_ones()],
        }
    }
}

type DecodeFn = fn(&[u8], usize, &DecodeContext<'_>) -> Result<DecodedPixel, BitmapError>;

/// Decodes single pixels of one image.
pub struct PixelDecoder<'p> {
    format: BitDepthFormat,
    ctx: DecodeContext<'p>,
    decode: DecodeFn,
}

impl core::fmt::Debug for PixelDecoder<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PixelDecoder")
            .field("format", &self.format)
            .field("palette_entries", &self.ctx.palette.len())
            .field("masks", &self.ctx.masks.masks)
            .finish()
    }
}

impl<'p> PixelDecoder<'p> {
    /// Select the decode function for `format`.
    ///
    /// In mask mode the first three palette entries are taken as the red,
    /// green and blue mask words; a table of any other size falls back to
    /// 5-6-5 decoding.
    pub fn new(format: BitDepthFormat, palette: &'p PaletteTable) -> Self {
        let masks = match format {
            BitDepthFormat::SixteenBpp { mask_mode: true } => {
                ChannelMasks::from_palette(palette).map(MaskShifts::new)
            }
            _ => None,
        };
        let decode: DecodeFn = match format {
            BitDepthFormat::OneBpp => decode_1bpp,
            BitDepthFormat::FourBpp => decode_4bpp,
            BitDepthFormat::EightBpp => decode_8bpp,
            BitDepthFormat::SixteenBpp { .. } if masks.is_some() => decode_16bpp_masked,
            BitDepthFormat::SixteenBpp { .. } => decode_16bpp_565,
            BitDepthFormat::TwentyFourBpp => decode_24bpp,
            BitDepthFormat::ThirtyTwoBpp => decode_32bpp,
        };
        Self {
            format,
            ctx: DecodeContext {
                palette,
                masks: masks.unwrap_or_default(),
            },
            decode,
        }
    }

    #[inline]
    pub fn format(&self) -> BitDepthFormat {
        self.format
    }

    /// Decode the pixel at column `col` of one source row.
    #[inline]
    pub fn decode(&self, row: &[u8], col: usize) -> Result<DecodedPixel, BitmapError> {
        (self.decode)(row, col, &self.ctx)
    }
}

/// Decode a single pixel without keeping a [`PixelDecoder`] around.
pub fn decode_pixel(
    format: BitDepthFormat,
    row: &[u8],
    col: usize,
    palette: &PaletteTable,
) -> Result<DecodedPixel, BitmapError> {
    PixelDecoder::new(format, palette).decode(row, col)
}

// ── Bounds-checked row access ───────────────────────────────────────

#[inline]
fn byte_at(row: &[u8], idx: usize) -> Result<u8, BitmapError> {
    row.get(idx)
        .copied()
        .ok_or_else(|| BitmapError::truncated(idx, 1, row.len()))
}

#[inline]
fn bytes_at<const N: usize>(row: &[u8], idx: usize) -> Result<[u8; N], BitmapError> {
    idx.checked_add(N)
        .and_then(|end| row.get(idx..end))
        .and_then(|s| <[u8; N]>::try_from(s).ok())
        .ok_or_else(|| BitmapError::truncated(idx, N, row.len()))
}

// ── Decode functions, one per format ────────────────────────────────

fn decode_1bpp(
    row: &[u8],
    col: usize,
    ctx: &DecodeContext<'_>,
) -> Result<DecodedPixel, BitmapError> {
    let byte = byte_at(row, col / 8)?;
    let bit = 7 - (col % 8);
    ctx.palette.lookup(usize::from((byte >> bit) & 0x01))
}

fn decode_4bpp(
    row: &[u8],
    col: usize,
    ctx: &DecodeContext<'_>,
) -> Result<DecodedPixel, BitmapError> {
    let byte = byte_at(row, col / 2)?;
    let nibble = if col % 2 == 0 { byte >> 4 } else { byte & 0x0F };
    ctx.palette.lookup(usize::from(nibble))
}

fn decode_8bpp(
    row: &[u8],
    col: usize,
    ctx: &DecodeContext<'_>,
) -> Result<DecodedPixel, BitmapError> {
    ctx.palette.lookup(usize::from(byte_at(row, col)?))
}

#[inline]
fn sample_16(row: &[u8], col: usize) -> Result<u16, BitmapError> {
    let idx = col
        .checked_mul(2)
        .ok_or_else(|| BitmapError::truncated(usize::MAX, 2, row.len()))?;
    let [low, high] = bytes_at::<2>(row, idx)?;
    Ok((u16::from(high) << 8) | u16::from(low))
}

fn decode_16bpp_565(
    row: &[u8],
    col: usize,
    _ctx: &DecodeContext<'_>,
) -> Result<DecodedPixel, BitmapError> {
    let v = sample_16(row, col)?;
    let blue = v & 0x1F;
    let green = (v >> 5) & 0x3F;
    let red = (v >> 11) & 0x1F;
    Ok(DecodedPixel::opaque(
        rescale(red, 31),
        rescale(green, 63),
        rescale(blue, 31),
    ))
}

fn decode_16bpp_masked(
    row: &[u8],
    col: usize,
    ctx: &DecodeContext<'_>,
) -> Result<DecodedPixel, BitmapError> {
    let v = u32::from(sample_16(row, col)?);
    let MaskShifts {
        masks,
        shifts,
        bits,
    } = ctx.masks;
    Ok(DecodedPixel::opaque(
        shift_signed(v & masks.red, shifts[0], bits[0]) as u8,
        shift_signed(v & masks.green, shifts[1], bits[1]) as u8,
        shift_signed(v & masks.blue, shifts[2], bits[2]) as u8,
    ))
}

fn decode_24bpp(
    row: &[u8],
    col: usize,
    _ctx: &DecodeContext<'_>,
) -> Result<DecodedPixel, BitmapError> {
    let idx = col
        .checked_mul(3)
        .ok_or_else(|| BitmapError::truncated(usize::MAX, 3, row.len()))?;
    let [b, g, r] = bytes_at::<3>(row, idx)?;
    Ok(DecodedPixel::opaque(r, g, b))
}

fn decode_32bpp(
    row: &[u8],
    col: usize,
    _ctx: &DecodeContext<'_>,
) -> Result<DecodedPixel, BitmapError> {
    let idx = col
        .checked_mul(4)
        .ok_or_else(|| BitmapError::truncated(usize::MAX, 4, row.len()))?;
    // Stored alpha is discarded.
    let [b, g, r, _] = bytes_at::<4>(row, idx)?;
    Ok(DecodedPixel::opaque(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    /// Grayscale palette where entry `i` decodes to `(i, i, i)`.
    fn gray_palette(n: usize) -> PaletteTable {
        let data: Vec<u8> = (0..n).flat_map(|i| [i as u8, i as u8, i as u8, 0]).collect();
        PaletteTable::load(&data, 0, n).unwrap()
    }

    fn indices(format: BitDepthFormat, row: &[u8], cols: usize) -> Vec<u8> {
        let pal = gray_palette(256);
        let dec = PixelDecoder::new(format, &pal);
        (0..cols).map(|c| dec.decode(row, c).unwrap().r).collect()
    }

    #[test]
    fn one_bpp_msb_first() {
        assert_eq!(indices(BitDepthFormat::OneBpp, &[0b1011_0000], 4), [1, 0, 1, 1]);
        assert_eq!(
            indices(BitDepthFormat::OneBpp, &[0x00, 0b0100_0000], 10)[8..],
            [0, 1]
        );
    }

    #[test]
    fn four_bpp_high_nibble_first() {
        assert_eq!(indices(BitDepthFormat::FourBpp, &[0x3A], 2), [3, 10]);
    }

    #[test]
    fn eight_bpp_direct_index() {
        assert_eq!(indices(BitDepthFormat::EightBpp, &[7, 200, 0], 3), [7, 200, 0]);
    }

    #[test]
    fn palette_index_checked_against_entry_count() {
        let pal = gray_palette(2);
        let dec = PixelDecoder::new(BitDepthFormat::FourBpp, &pal);
        assert!(matches!(
            dec.decode(&[0x13], 1),
            Err(BitmapError::PaletteIndexOutOfRange { index: 3, entries: 2 })
        ));
    }

    #[test]
    fn sixteen_bpp_565() {
        let pal = PaletteTable::default();
        let fmt = BitDepthFormat::SixteenBpp { mask_mode: false };
        assert_eq!(
            decode_pixel(fmt, &[0xFF, 0xFF], 0, &pal).unwrap(),
            DecodedPixel::opaque(255, 255, 255)
        );
        assert_eq!(
            decode_pixel(fmt, &[0x00, 0x00], 0, &pal).unwrap(),
            DecodedPixel::opaque(0, 0, 0)
        );
        // 0xF800 = pure red, 0x07E0 = pure green, 0x001F = pure blue
        let row = [0x00, 0xF8, 0xE0, 0x07, 0x1F, 0x00];
        let dec = PixelDecoder::new(fmt, &pal);
        assert_eq!(dec.decode(&row, 0).unwrap(), DecodedPixel::opaque(255, 0, 0));
        assert_eq!(dec.decode(&row, 1).unwrap(), DecodedPixel::opaque(0, 255, 0));
        assert_eq!(dec.decode(&row, 2).unwrap(), DecodedPixel::opaque(0, 0, 255));
    }

    #[test]
    fn sixteen_bpp_masked_555() {
        let mut data = Vec::new();
        for m in [0x7C00u32, 0x03E0, 0x001F] {
            data.extend_from_slice(&m.to_le_bytes());
        }
        let pal = PaletteTable::load(&data, 0, 3).unwrap();
        let dec = PixelDecoder::new(BitDepthFormat::SixteenBpp { mask_mode: true }, &pal);
        // 0x7C00 red, 0x03E0 green, 0x001F blue, 0x7FFF white
        let row = [0x00, 0x7C, 0xE0, 0x03, 0x1F, 0x00, 0xFF, 0x7F];
        assert_eq!(dec.decode(&row, 0).unwrap(), DecodedPixel::opaque(255, 0, 0));
        assert_eq!(dec.decode(&row, 1).unwrap(), DecodedPixel::opaque(0, 255, 0));
        assert_eq!(dec.decode(&row, 2).unwrap(), DecodedPixel::opaque(0, 0, 255));
        assert_eq!(dec.decode(&row, 3).unwrap(), DecodedPixel::opaque(255, 255, 255));
    }

    #[test]
    fn mask_mode_without_three_words_decodes_565() {
        let data = [0u8; 8];
        let pal = PaletteTable::load(&data, 0, 2).unwrap();
        let dec = PixelDecoder::new(BitDepthFormat::SixteenBpp { mask_mode: true }, &pal);
        assert_eq!(dec.decode(&[0x00, 0xF8], 0).unwrap(), DecodedPixel::opaque(255, 0, 0));
    }

    #[test]
    fn twenty_four_bpp_bgr() {
        let pal = PaletteTable::default();
        let row = [0, 0, 0, 0x10, 0x20, 0x30];
        assert_eq!(
            decode_pixel(BitDepthFormat::TwentyFourBpp, &row, 1, &pal).unwrap(),
            DecodedPixel {
                a: 0xFF,
                r: 0x30,
                g: 0x20,
                b: 0x10
            }
        );
    }

    #[test]
    fn thirty_two_bpp_forces_alpha() {
        let pal = PaletteTable::default();
        let row = [0x10, 0x20, 0x30, 0x00];
        assert_eq!(
            decode_pixel(BitDepthFormat::ThirtyTwoBpp, &row, 0, &pal).unwrap(),
            DecodedPixel::opaque(0x30, 0x20, 0x10)
        );
    }

    #[test]
    fn short_row_is_truncated_error() {
        let pal = PaletteTable::default();
        assert!(matches!(
            decode_pixel(BitDepthFormat::TwentyFourBpp, &[1, 2, 3, 4], 1, &pal),
            Err(BitmapError::TruncatedBuffer { offset: 3, needed: 3, len: 4 })
        ));
    }

    #[test]
    fn row_bytes_rounds_up() {
        assert_eq!(BitDepthFormat::OneBpp.row_bytes(9), Some(2));
        assert_eq!(BitDepthFormat::FourBpp.row_bytes(3), Some(2));
        assert_eq!(BitDepthFormat::TwentyFourBpp.row_bytes(3), Some(9));
    }
}
