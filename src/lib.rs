//! # bmp2raw
//!
//! Convert Windows BMP images to a flat stream of 32-bit pixels, optionally
//! rotated by a quarter turn and clipped to a display's resolution. The
//! output is what a framebuffer wants: no header, row-major, 4 bytes per
//! pixel.
//!
//! ## Supported Input
//!
//! - `BITMAPINFOHEADER` (and larger V4/V5 headers), uncompressed (`BI_RGB`)
//! - 1, 4 and 8 bpp through the palette
//! - 16 bpp as 5-6-5, or through a 3-word mask table
//! - 24 bpp BGR and 32 bpp BGRX (stored alpha is ignored)
//! - bottom-up and top-down row order
//!
//! Every output pixel is opaque.
//!
//! ## Non-Goals
//!
//! - Writing BMP
//! - RLE and other compressed encodings
//! - Color management
//!
//! ## Usage
//!
//! ```no_run
//! use bmp2raw::{ConvertRequest, DeviceResolution, Rotation, SampleOrder};
//! use enough::Unstoppable;
//!
//! let data: &[u8] = &[]; // your BMP bytes
//!
//! // Probe without decoding
//! let header = bmp2raw::probe(data)?;
//! println!("{}x{} {} bpp", header.width(), header.height(), header.bit_count());
//!
//! // Rotate a quarter turn clockwise, clipped to a 320x240 panel
//! let out = ConvertRequest::new(data)
//!     .rotation(Rotation::from_degrees(90))
//!     .device_resolution(DeviceResolution::new(320, 240))
//!     .convert(Unstoppable)?;
//! let raw: Vec<u8> = out.to_bytes(SampleOrder::Argb);
//! # Ok::<(), bmp2raw::BitmapError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod convert;
mod error;
mod geometry;
mod limits;
mod pixel;
mod rotate;
mod scan;

pub mod bmp;

#[cfg(feature = "std")]
pub mod config;

// Re-exports
pub use bmp::{BmpHeader, BmpImage, probe};
pub use convert::{Conversion, ConvertOutput, ConvertRequest};
pub use enough::{Stop, Unstoppable};
pub use error::BitmapError;
pub use geometry::{DeviceResolution, Geometry};
pub use limits::Limits;
pub use pixel::{DecodedPixel, SampleOrder};
pub use rotate::{Rotation, map_coordinate};
pub use scan::Pixels;

/// Convert `data` with no rotation and no clipping.
pub fn convert(data: &[u8], stop: impl Stop) -> Result<ConvertOutput, BitmapError> {
    ConvertRequest::new(data).convert(stop)
}
