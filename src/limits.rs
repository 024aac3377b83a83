use crate::error::BitmapError;

/// Caps on the emitted image, checked by [`crate::ConvertRequest::prepare`]
/// once the clipped and rotated output size is known.
///
/// `None` leaves that axis of the output unbounded.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Emitted pixel count.
    pub max_pixels: Option<u64>,
    /// Size of the raw output, 4 bytes per pixel.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Reject a `width × height` output taking `bytes` of raw samples if it
    /// breaks any cap.
    pub(crate) fn check_output(
        &self,
        width: usize,
        height: usize,
        bytes: usize,
    ) -> Result<(), BitmapError> {
        let pixels = (width as u64).saturating_mul(height as u64);
        let checks = [
            ("width", width as u64, self.max_width),
            ("height", height as u64, self.max_height),
            ("pixel count", pixels, self.max_pixels),
            ("output size", bytes as u64, self.max_memory_bytes),
        ];
        for (what, value, cap) in checks {
            if let Some(max) = cap.filter(|&max| value > max) {
                return Err(BitmapError::LimitExceeded(alloc::format!(
                    "{what} {value} over limit {max}"
                )));
            }
        }
        Ok(())
    }
}
