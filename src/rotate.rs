//! Quarter-turn rotation as a coordinate remap.
//!
//! Rotation is applied while emitting: every output cell asks
//! [`map_coordinate`] which source cell it shows. No pixel buffer is
//! rotated in place.

/// Clockwise rotation applied to the emitted image.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Rotation {
    #[default]
    None,
    Rotate90,
    Rotate180,
    Rotate270,
}

impl Rotation {
    /// Map an angle in degrees to a rotation.
    ///
    /// Anything other than 90, 180 or 270 means no rotation.
    pub fn from_degrees(degrees: u32) -> Self {
        match degrees {
            90 => Self::Rotate90,
            180 => Self::Rotate180,
            270 => Self::Rotate270,
            _ => Self::None,
        }
    }

    pub fn degrees(self) -> u32 {
        match self {
            Self::None => 0,
            Self::Rotate90 => 90,
            Self::Rotate180 => 180,
            Self::Rotate270 => 270,
        }
    }

    /// Whether the emitted image has rows and columns swapped.
    #[inline]
    pub fn swaps_axes(self) -> bool {
        matches!(self, Self::Rotate90 | Self::Rotate270)
    }

    /// `(rows, cols)` of the emitted image for a `rows × cols` source window.
    #[inline]
    pub fn output_dims(self, rows: usize, cols: usize) -> (usize, usize) {
        if self.swaps_axes() {
            (cols, rows)
        } else {
            (rows, cols)
        }
    }
}

/// Source `(row, col)` shown at output `(out_row, out_col)`.
///
/// `rows` and `cols` are the dimensions of the source window before
/// rotation; for 90 and 270 the output grid is `cols × rows`.
///
/// # Panics
///
/// Debug builds panic if `(out_row, out_col)` lies outside the output grid.
#[inline]
pub fn map_coordinate(
    out_row: usize,
    out_col: usize,
    rotation: Rotation,
    rows: usize,
    cols: usize,
) -> (usize, usize) {
    let (out_rows, out_cols) = rotation.output_dims(rows, cols);
    debug_assert!(
        out_row < out_rows && out_col < out_cols,
        "output ({out_row}, {out_col}) outside {out_rows}x{out_cols}"
    );
    match rotation {
        Rotation::None => (out_row, out_col),
        Rotation::Rotate90 => (rows - out_col - 1, out_row),
        Rotation::Rotate180 => (rows - out_row - 1, cols - out_col - 1),
        Rotation::Rotate270 => (out_col, cols - out_row - 1),
    }
}
