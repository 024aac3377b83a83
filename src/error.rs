use alloc::string::String;
use enough::StopReason;

/// Errors from BMP parsing and conversion.
///
/// Every variant is terminal for the conversion that produced it.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("invalid file signature {found:02x?}, expected \"BM\"")]
    InvalidSignature { found: [u8; 2] },

    #[error("unsupported compression {0} (only BI_RGB = 0 is decoded)")]
    UnsupportedCompression(u32),

    #[error("unsupported bit depth {0} (expected 1, 4, 8, 16, 24 or 32)")]
    UnsupportedBitDepth(u16),

    #[error("invalid row stride: image data size {image_size} over {height} rows")]
    InvalidRowStride { image_size: u32, height: u32 },

    #[error("truncated buffer: need {needed} bytes at offset {offset}, buffer holds {len}")]
    TruncatedBuffer {
        offset: usize,
        needed: usize,
        len: usize,
    },

    #[error("invalid geometry: width {width}, height {height}")]
    InvalidGeometry { width: i32, height: i32 },

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("palette index {index} out of range (palette has {entries} entries)")]
    PaletteIndexOutOfRange { index: usize, entries: usize },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),

    #[cfg(feature = "std")]
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StopReason> for BitmapError {
    fn from(r: StopReason) -> Self {
        BitmapError::Cancelled(r)
    }
}

impl BitmapError {
    /// Build a [`BitmapError::TruncatedBuffer`] for a read of `needed` bytes at `offset`.
    pub(crate) fn truncated(offset: usize, needed: usize, len: usize) -> Self {
        BitmapError::TruncatedBuffer {
            offset,
            needed,
            len,
        }
    }
}
