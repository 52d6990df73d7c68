use serde::{Deserialize, Serialize};

use crate::config::{ResizePreset, ToolConfig};
use crate::decode::decode_image;
use crate::encode::{encode_surface, EncodedResult};
use crate::geometry::{fit_surface, ScaleMode};
use crate::session::Ticket;
use crate::validate::Tool;

use super::{SourceImage, ToolError};

/// Bounding box and policy for one resize.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResizeRequest {
    pub max_width: u32,
    pub max_height: u32,
    /// Falls back to `config.resize_quality`.
    #[serde(default)]
    pub quality: Option<f32>,
    /// Enlarge images smaller than the box. Off by default.
    #[serde(default)]
    pub allow_upscale: bool,
}

impl ResizeRequest {
    pub fn new(max_width: u32, max_height: u32) -> Self {
        Self {
            max_width,
            max_height,
            quality: None,
            allow_upscale: false,
        }
    }

    pub fn from_preset(preset: ResizePreset) -> Self {
        Self::new(preset.width, preset.height)
    }

    fn scale_mode(&self) -> ScaleMode {
        if self.allow_upscale {
            ScaleMode::Fit
        } else {
            ScaleMode::ShrinkOnly
        }
    }
}

/// Fit `source` into the requested box, keeping aspect ratio and format.
pub fn resize(
    source: &SourceImage<'_>,
    request: &ResizeRequest,
    config: &ToolConfig,
    ticket: &Ticket,
) -> Result<EncodedResult, ToolError> {
    source.admit(Tool::Resizer, config)?;
    let format = source.format()?;

    ticket.ensure_current()?;
    let decoded = decode_image(source.bytes)?;
    let source_dims = decoded.dimensions();
    let surface = fit_surface(
        &decoded,
        request.max_width,
        request.max_height,
        request.scale_mode(),
        config.resize_filter,
    )?;
    drop(decoded);

    ticket.ensure_current()?;
    let quality = request.quality.unwrap_or(config.resize_quality);
    let result = encode_surface(&surface, format, quality)?;

    log::info!(
        "resized {:?}: {}x{} -> {}x{} ({} bytes)",
        source.name,
        source_dims.0,
        source_dims.1,
        result.width,
        result.height,
        result.byte_length()
    );
    ticket.commit(result)
}
