use alloc::vec::Vec;

use enough::Stop;

use crate::bmp::BmpImage;
use crate::error::BitmapError;
use crate::geometry::{DeviceResolution, Geometry};
use crate::limits::Limits;
use crate::pixel::{DecodedPixel, SampleOrder};
use crate::rotate::Rotation;
use crate::scan::Pixels;

/// Builder for a BMP → raw pixel conversion.
///
/// ```no_run
/// use bmp2raw::{ConvertRequest, DeviceResolution, Rotation, SampleOrder};
/// use enough::Unstoppable;
///
/// let data: &[u8] = &[]; // your BMP bytes
/// let out = ConvertRequest::new(data)
///     .rotation(Rotation::Rotate90)
///     .device_resolution(DeviceResolution::new(320, 240))
///     .convert(Unstoppable)?;
/// let raw = out.to_bytes(SampleOrder::Argb);
/// # Ok::<(), bmp2raw::BitmapError>(())
/// ```
#[derive(Clone, Debug)]
pub struct ConvertRequest<'a> {
    data: &'a [u8],
    rotation: Rotation,
    device: DeviceResolution,
    limits: Option<&'a Limits>,
}

impl<'a> ConvertRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            rotation: Rotation::None,
            device: DeviceResolution::UNAVAILABLE,
            limits: None,
        }
    }

    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Clip the emitted image to this resolution (before rotation).
    pub fn device_resolution(mut self, device: DeviceResolution) -> Self {
        self.device = device;
        self
    }

    pub fn limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Parse and validate everything a conversion needs without decoding
    /// any pixel.
    pub fn prepare(&self) -> Result<Conversion<'a>, BitmapError> {
        let image = BmpImage::parse(self.data)?;
        let header = image.header();
        let window = Geometry::clip(header.height(), header.width(), self.device);
        let (out_rows, out_cols) = window.output_dims(self.rotation);

        log::debug!(
            "{}x{} {} bpp ({:?}), {} palette entries, stride {}, {}",
            header.width(),
            header.height(),
            header.bit_count(),
            image.format(),
            image.palette().len(),
            image.row_stride(),
            if header.is_top_down() { "top-down" } else { "bottom-up" },
        );
        log::debug!(
            "window {}x{} (device {}x{}), rotation {}, output {}x{}",
            window.cols,
            window.rows,
            self.device.width,
            self.device.height,
            self.rotation.degrees(),
            out_cols,
            out_rows,
        );

        let out_bytes = window
            .rows
            .checked_mul(window.cols)
            .and_then(|n| n.checked_mul(SampleOrder::BYTES_PER_PIXEL))
            .ok_or(BitmapError::DimensionsTooLarge {
                width: out_cols as u32,
                height: out_rows as u32,
            })?;
        if let Some(limits) = self.limits {
            limits.check_output(out_cols, out_rows, out_bytes)?;
        }

        image.check_window(&window)?;

        Ok(Conversion {
            image,
            window,
            rotation: self.rotation,
        })
    }

    /// Decode the whole output grid into memory.
    pub fn convert(&self, stop: impl Stop) -> Result<ConvertOutput, BitmapError> {
        self.prepare()?.decode_all(stop)
    }

    /// Convert, then write the raw samples to `writer`.
    ///
    /// Nothing is written unless the whole conversion succeeds. Returns the
    /// number of bytes written.
    #[cfg(feature = "std")]
    pub fn write_to<W: std::io::Write>(
        &self,
        writer: &mut W,
        order: SampleOrder,
        stop: impl Stop,
    ) -> Result<usize, BitmapError> {
        let bytes = self.convert(stop)?.to_bytes(order);
        writer.write_all(&bytes)?;
        writer.flush()?;
        Ok(bytes.len())
    }
}

/// A validated conversion. Every call to [`Conversion::pixels`] starts a
/// fresh scan.
#[derive(Clone, Debug)]
pub struct Conversion<'a> {
    image: BmpImage<'a>,
    window: Geometry,
    rotation: Rotation,
}

impl<'a> Conversion<'a> {
    pub fn image(&self) -> &BmpImage<'a> {
        &self.image
    }

    /// Source window before rotation.
    pub fn window(&self) -> Geometry {
        self.window
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Emitted `(width, height)`.
    pub fn output_size(&self) -> (usize, usize) {
        let (rows, cols) = self.window.output_dims(self.rotation);
        (cols, rows)
    }

    /// Lazy row-major pixel sequence.
    pub fn pixels(&self) -> Pixels<'_> {
        Pixels::new(&self.image, self.window, self.rotation)
    }

    /// Decode every pixel, checking `stop` once per output row.
    pub fn decode_all(&self, stop: impl Stop) -> Result<ConvertOutput, BitmapError> {
        let mut pixels = self.pixels();
        let (rows, cols) = pixels.output_dims();
        let mut out = Vec::with_capacity(self.window.pixel_count());
        for _ in 0..rows {
            stop.check()?;
            for px in pixels.by_ref().take(cols) {
                out.push(px?);
            }
        }
        log::debug!("decoded {} pixels", out.len());
        Ok(ConvertOutput {
            pixels: out,
            width: cols as u32,
            height: rows as u32,
            rotation: self.rotation,
        })
    }
}

/// Fully decoded output grid, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConvertOutput {
    pixels: Vec<DecodedPixel>,
    pub width: u32,
    pub height: u32,
    pub rotation: Rotation,
}

impl ConvertOutput {
    pub fn pixels(&self) -> &[DecodedPixel] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<DecodedPixel> {
        self.pixels
    }

    /// Pixel at output `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<DecodedPixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Flat raw stream, 4 bytes per pixel in `order`.
    pub fn to_bytes(&self, order: SampleOrder) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_bytes(order)).collect()
    }

    /// Copy into an [`imgref::ImgVec`] of RGBA pixels.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> imgref::ImgVec<rgb::RGBA8> {
        imgref::ImgVec::new(
            self.pixels.iter().map(|&p| p.into()).collect(),
            self.width as usize,
            self.height as usize,
        )
    }
}
