//! Row-major scan over the emitted grid.

use core::iter::FusedIterator;

use crate::bmp::{BmpImage, PixelDecoder};
use crate::error::BitmapError;
use crate::geometry::Geometry;
use crate::pixel::DecodedPixel;
use crate::rotate::{Rotation, map_coordinate};

/// Lazy row-major sequence of decoded pixels over the (clipped, rotated)
/// output grid.
///
/// Each output cell is mapped back to its source cell, the source row is
/// resolved against the file's storage order and the pixel is decoded on
/// demand. The first error is yielded once, after which the iterator is
/// exhausted.
pub struct Pixels<'a> {
    image: &'a BmpImage<'a>,
    decoder: PixelDecoder<'a>,
    window: Geometry,
    rotation: Rotation,
    out_rows: usize,
    out_cols: usize,
    row: usize,
    col: usize,
    done: bool,
}

impl<'a> Pixels<'a> {
    pub(crate) fn new(image: &'a BmpImage<'a>, window: Geometry, rotation: Rotation) -> Self {
        let (out_rows, out_cols) = window.output_dims(rotation);
        Self {
            image,
            decoder: image.decoder(),
            window,
            rotation,
            out_rows,
            out_cols,
            row: 0,
            col: 0,
            done: out_rows == 0 || out_cols == 0,
        }
    }

    /// `(rows, cols)` of the emitted grid.
    pub fn output_dims(&self) -> (usize, usize) {
        (self.out_rows, self.out_cols)
    }

    /// Output row of the next pixel.
    pub fn current_row(&self) -> usize {
        self.row
    }

    fn decode_at(&self, out_row: usize, out_col: usize) -> Result<DecodedPixel, BitmapError> {
        let (src_row, src_col) = map_coordinate(
            out_row,
            out_col,
            self.rotation,
            self.window.rows,
            self.window.cols,
        );
        let row = self.image.row(self.image.stored_row(src_row))?;
        self.decoder.decode(row, src_col)
    }

    fn remaining(&self) -> usize {
        if self.done {
            return 0;
        }
        (self.out_rows - self.row) * self.out_cols - self.col
    }
}

impl Iterator for Pixels<'_> {
    type Item = Result<DecodedPixel, BitmapError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.col == 0 {
            log::trace!("output row {}/{}", self.row, self.out_rows);
        }

        let result = self.decode_at(self.row, self.col);

        self.col += 1;
        if self.col == self.out_cols {
            self.col = 0;
            self.row += 1;
        }
        if self.row == self.out_rows || result.is_err() {
            self.done = true;
        }
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // An error can end the scan early.
        (0, Some(self.remaining()))
    }
}

impl FusedIterator for Pixels<'_> {}
