//! Encoding surfaces into JPEG, PNG or WebP blobs.
//!
//! JPEG and WebP are lossy: a quality factor in `[0, 1]` maps onto each
//! encoder's 0-100 scale. PNG is written losslessly and ignores quality.
//! JPEG has no alpha channel, so transparent pixels are composited over
//! white first. WebP keeps alpha.
//!
//! # Examples
//!
//! ```ignore
//! use pixnivo_core::encode::encode_surface;
//! use pixnivo_core::OutputFormat;
//!
//! let result = encode_surface(&surface, OutputFormat::Jpeg, 0.92).unwrap();
//! println!("Encoded {} bytes", result.byte_length());
//! ```

mod encoder;
mod types;

pub use encoder::{encode_surface, flatten_on_white, jpeg_quality, webp_quality};
pub use types::{EncodeError, EncodedResult};
