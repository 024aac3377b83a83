use crate::rotate::Rotation;

/// Target display size in pixels. Zero on an axis means "unknown" and
/// disables clipping on that axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DeviceResolution {
    pub width: u32,
    pub height: u32,
}

impl DeviceResolution {
    /// No device information: the full image is emitted.
    pub const UNAVAILABLE: Self = Self {
        width: 0,
        height: 0,
    };

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_available(&self) -> bool {
        self.width != 0 || self.height != 0
    }
}

/// The source window that gets emitted: the top-left `rows × cols` of the
/// image as displayed, before rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    pub rows: usize,
    pub cols: usize,
}

impl Geometry {
    /// Clip an image of `image_rows × image_cols` to `device`.
    pub fn clip(image_rows: usize, image_cols: usize, device: DeviceResolution) -> Self {
        let clip_axis = |image: usize, limit: u32| match limit {
            0 => image,
            limit => image.min(limit as usize),
        };
        Self {
            rows: clip_axis(image_rows, device.height),
            cols: clip_axis(image_cols, device.width),
        }
    }

    /// `(rows, cols)` of the emitted grid under `rotation`.
    #[inline]
    pub fn output_dims(&self, rotation: Rotation) -> (usize, usize) {
        rotation.output_dims(self.rows, self.cols)
    }

    /// Number of emitted pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.rows.saturating_mul(self.cols)
    }
}
