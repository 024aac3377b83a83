//! BMP fixture builder shared by the integration tests.

#![allow(dead_code)]

/// Builds an uncompressed BMP in memory.
///
/// Rows are given in storage order (the first row is the bottom of the
/// image when `height > 0`) and are zero-padded to the 4-byte stride.
pub struct BmpFixture {
    pub width: i32,
    pub height: i32,
    pub bit_count: u16,
    pub header_size: u32,
    pub compression: u32,
    /// Raw palette-region bytes (color entries or mask words).
    pub palette: Vec<u8>,
    pub rows: Vec<Vec<u8>>,
    /// Overrides `biSizeImage`.
    pub image_size: Option<u32>,
}

impl BmpFixture {
    pub fn new(width: i32, height: i32, bit_count: u16) -> Self {
        Self {
            width,
            height,
            bit_count,
            header_size: 40,
            compression: 0,
            palette: Vec::new(),
            rows: Vec::new(),
            image_size: None,
        }
    }

    /// Palette from `(r, g, b)` triples.
    pub fn palette(mut self, colors: &[(u8, u8, u8)]) -> Self {
        self.palette = colors.iter().flat_map(|&(r, g, b)| [b, g, r, 0]).collect();
        self
    }

    /// Raw bytes for the palette region.
    pub fn palette_bytes(mut self, bytes: &[u8]) -> Self {
        self.palette = bytes.to_vec();
        self
    }

    pub fn rows(mut self, rows: &[&[u8]]) -> Self {
        self.rows = rows.iter().map(|r| r.to_vec()).collect();
        self
    }

    pub fn stride(&self) -> usize {
        (self.width as usize * usize::from(self.bit_count)).div_ceil(32) * 4
    }

    pub fn build(&self) -> Vec<u8> {
        let stride = self.stride();
        let mut pixels = Vec::new();
        for row in &self.rows {
            let mut padded = row.clone();
            padded.resize(stride.max(row.len()), 0);
            pixels.extend_from_slice(&padded);
        }

        let headers = 14 + self.header_size.max(40) as usize;
        let off_bits = (headers + self.palette.len()) as u32;
        let file_size = off_bits + pixels.len() as u32;
        let image_size = self.image_size.unwrap_or(pixels.len() as u32);

        let mut out = Vec::with_capacity(file_size as usize);
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&file_size.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&off_bits.to_le_bytes());

        out.extend_from_slice(&self.header_size.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&self.bit_count.to_le_bytes());
        out.extend_from_slice(&self.compression.to_le_bytes());
        out.extend_from_slice(&image_size.to_le_bytes());
        out.extend_from_slice(&2835i32.to_le_bytes());
        out.extend_from_slice(&2835i32.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        // V4/V5 tail
        out.resize(headers, 0);

        out.extend_from_slice(&self.palette);
        out.extend_from_slice(&pixels);
        out
    }
}

/// One 24 bpp row from `(r, g, b)` pixels.
pub fn bgr_row(pixels: &[(u8, u8, u8)]) -> Vec<u8> {
    pixels.iter().flat_map(|&(r, g, b)| [b, g, r]).collect()
}

/// A 24 bpp image where the pixel at display `(row, col)` is
/// `(row, col, 0x80)`, stored in the order `height`'s sign implies.
pub fn labelled_24bpp(width: usize, height: i32) -> Vec<u8> {
    let rows = height.unsigned_abs() as usize;
    let display: Vec<Vec<u8>> = (0..rows)
        .map(|r| {
            let px: Vec<_> = (0..width).map(|c| (r as u8, c as u8, 0x80)).collect();
            bgr_row(&px)
        })
        .collect();
    let stored: Vec<&[u8]> = if height > 0 {
        display.iter().rev().map(|r| r.as_slice()).collect()
    } else {
        display.iter().map(|r| r.as_slice()).collect()
    };
    BmpFixture::new(width as i32, height, 24).rows(&stored).build()
}
