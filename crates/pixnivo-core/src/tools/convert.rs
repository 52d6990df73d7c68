use crate::config::ToolConfig;
use crate::decode::decode_image;
use crate::encode::{encode_surface, EncodedResult};
use crate::format::OutputFormat;
use crate::session::Ticket;
use crate::validate::Tool;

use super::{SourceImage, ToolError};

/// Convert `source` to `target` without resizing.
///
/// `quality` defaults to `config.convert_lossy_quality` for lossy targets and
/// 1.0 for lossless ones. It is ignored by lossless encoders either way.
pub fn convert(
    source: &SourceImage<'_>,
    target: OutputFormat,
    quality: Option<f32>,
    config: &ToolConfig,
    ticket: &Ticket,
) -> Result<EncodedResult, ToolError> {
    convert_as(Tool::Converter, source, target, quality, config, ticket)
}

/// The PNG to JPG page: PNG uploads only, alpha flattened onto white.
pub fn png_to_jpg(
    source: &SourceImage<'_>,
    config: &ToolConfig,
    ticket: &Ticket,
) -> Result<EncodedResult, ToolError> {
    convert_as(Tool::PngToJpg, source, OutputFormat::Jpeg, None, config, ticket)
}

/// The JPG to PNG page: JPEG uploads only.
pub fn jpg_to_png(
    source: &SourceImage<'_>,
    config: &ToolConfig,
    ticket: &Ticket,
) -> Result<EncodedResult, ToolError> {
    convert_as(Tool::JpgToPng, source, OutputFormat::Png, None, config, ticket)
}

fn convert_as(
    tool: Tool,
    source: &SourceImage<'_>,
    target: OutputFormat,
    quality: Option<f32>,
    config: &ToolConfig,
    ticket: &Ticket,
) -> Result<EncodedResult, ToolError> {
    source.admit(tool, config)?;

    ticket.ensure_current()?;
    let surface = decode_image(source.bytes)?;

    let quality = match quality {
        Some(quality) => quality,
        None if target.is_lossy() => config.convert_lossy_quality,
        None => target.default_quality(),
    };

    ticket.ensure_current()?;
    let result = encode_surface(&surface, target, quality)?;

    log::info!(
        "converted {:?} ({} bytes) to {} ({} bytes, {}x{})",
        source.name,
        source.size_bytes(),
        target,
        result.byte_length(),
        result.width,
        result.height
    );
    ticket.commit(result)
}
