//! PixNivo Core - in-browser image tools
//!
//! This crate implements the pipeline behind PixNivo's converter, compressor
//! and resizer pages: upload validation, decoding, geometry planning,
//! encoding and size targeting. It is host-agnostic and synchronous; the
//! `pixnivo-wasm` crate runs it inside a Web Worker.

pub mod config;
pub mod decode;
pub mod encode;
pub mod format;
pub mod geometry;
pub mod report;
pub mod session;
pub mod target;
pub mod tools;
pub mod validate;

#[cfg(test)]
mod test_support;

pub use config::{ResizePreset, SizeTargetPolicy, ToolConfig};
pub use decode::{decode_image, DecodeError, RasterSurface};
pub use encode::{encode_surface, EncodeError, EncodedResult};
pub use format::OutputFormat;
pub use geometry::{plan_fit, FilterType, GeometryError, ScaleMode};
pub use session::{Session, Ticket};
pub use tools::{
    compress, convert, jpg_to_png, png_to_jpg, resize, CompressOutcome, ResizeRequest,
    SourceImage, ToolError,
};
pub use validate::{validate, validate_for_tool, FileInfo, Tool, ValidationOutcome};
