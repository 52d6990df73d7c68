//! Image decoding for the tool pipeline.
//!
//! Turns uploaded bytes into a [`RasterSurface`]: RGBA pixels at the
//! image's displayed intrinsic size (EXIF orientation applied).
//!
//! # Architecture
//!
//! Decoding is synchronous and single-threaded. The WASM bindings run it
//! inside a Web Worker, which is what keeps the page responsive.
//!
//! # Examples
//!
//! ```ignore
//! use pixnivo_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.png").unwrap();
//! let surface = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", surface.width, surface.height);
//! ```

mod raster;
mod types;

pub use raster::{decode_image, sniff_format};
pub(crate) use types::Orientation;
pub use types::{DecodeError, RasterSurface};
