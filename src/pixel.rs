/// One decoded output sample.
///
/// Always opaque: every bit depth this crate decodes produces `a == 0xFF`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DecodedPixel {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl DecodedPixel {
    /// Build an opaque pixel from red, green and blue.
    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { a: 0xFF, r, g, b }
    }

    /// The 4 output bytes of this pixel in the given order.
    #[inline]
    pub fn to_bytes(self, order: SampleOrder) -> [u8; 4] {
        match order {
            SampleOrder::Argb => [self.a, self.r, self.g, self.b],
            SampleOrder::Rgba => [self.r, self.g, self.b, self.a],
            SampleOrder::Bgra => [self.b, self.g, self.r, self.a],
        }
    }
}

#[cfg(feature = "rgb")]
impl From<DecodedPixel> for rgb::RGBA8 {
    fn from(p: DecodedPixel) -> Self {
        rgb::RGBA8::new(p.r, p.g, p.b, p.a)
    }
}

/// Byte order of each 4-byte sample in a raw output stream.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SampleOrder {
    /// A, R, G, B. The layout of the `output_rotated.raw` artifact.
    #[default]
    Argb,
    /// R, G, B, A.
    Rgba,
    /// B, G, R, A (a little-endian `0xAARRGGBB` word).
    Bgra,
}

impl SampleOrder {
    /// Bytes per emitted sample.
    pub const BYTES_PER_PIXEL: usize = 4;
}

impl core::str::FromStr for SampleOrder {
    type Err = alloc::string::String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "argb" => Ok(Self::Argb),
            "rgba" => Ok(Self::Rgba),
            "bgra" => Ok(Self::Bgra),
            other => Err(alloc::format!("unknown sample order `{other}`")),
        }
    }
}
