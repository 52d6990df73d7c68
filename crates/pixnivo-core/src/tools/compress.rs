use crate::config::ToolConfig;
use crate::decode::decode_image;
use crate::encode::{encode_surface, EncodedResult};
use crate::geometry::{fit_surface, ScaleMode};
use crate::report::savings_percent;
use crate::session::Ticket;
use crate::target::{search_quality, TargetOutcome};
use crate::validate::Tool;

use super::{SourceImage, ToolError};

/// Result of compressing one file, with the requested budget alongside the
/// size actually reached.
#[derive(Debug, Clone)]
pub struct CompressOutcome {
    pub result: EncodedResult,
    /// Quality of the returned blob (1.0 for PNG and passthrough).
    pub quality: f32,
    pub attempts: u32,
    pub target_bytes: u64,
    pub met_target: bool,
    /// The original bytes were returned because re-encoding did not help.
    pub passthrough: bool,
}

impl CompressOutcome {
    /// Percent saved relative to `original_bytes`.
    pub fn savings_percent(&self, original_bytes: u64) -> Option<f64> {
        savings_percent(original_bytes, self.result.byte_length() as u64)
    }
}

/// Compress `source` toward `target_bytes`.
///
/// The image keeps its format. It is first shrunk to fit a square box of
/// `max_long_edge` (default `config.compress_max_long_edge`), then JPEG and
/// WebP go through the quality search. PNG gets one encode.
///
/// The result is never larger than the upload: when re-encoding does not
/// produce fewer bytes, the original file comes back with `passthrough` set.
/// Missing the budget is not an error: check `met_target`.
pub fn compress(
    source: &SourceImage<'_>,
    target_bytes: u64,
    max_long_edge: Option<u32>,
    config: &ToolConfig,
    ticket: &Ticket,
) -> Result<CompressOutcome, ToolError> {
    source.admit(Tool::Compressor, config)?;
    let format = source.format()?;

    ticket.ensure_current()?;
    let decoded = decode_image(source.bytes)?;
    let original_dimensions = decoded.dimensions();

    let edge = max_long_edge.unwrap_or(config.compress_max_long_edge);
    let surface = fit_surface(&decoded, edge, edge, ScaleMode::ShrinkOnly, config.resize_filter)?;
    let downscaled = surface.dimensions() != original_dimensions;
    drop(decoded);

    // A smaller frame can still encode larger than the upload at high
    // quality, so the search must also get under the upload's size.
    let budget = if downscaled {
        target_bytes.min(source.size_bytes().saturating_sub(1))
    } else {
        target_bytes
    };

    let outcome = if format.is_lossy() {
        search_quality(
            budget,
            &config.size_target,
            |quality| encode_surface(&surface, format, quality).map_err(ToolError::from),
            || ticket.ensure_current(),
        )?
    } else {
        ticket.ensure_current()?;
        let result = encode_surface(&surface, format, format.default_quality())?;
        TargetOutcome {
            met_target: result.byte_length() as u64 <= budget,
            result,
            quality: 1.0,
            attempts: 1,
        }
    };

    let outcome = if outcome.result.byte_length() as u64 >= source.size_bytes() {
        log::debug!(
            "re-encode is not smaller ({} >= {} bytes), keeping original",
            outcome.result.byte_length(),
            source.size_bytes()
        );
        let (width, height) = original_dimensions;
        CompressOutcome {
            result: EncodedResult {
                bytes: source.bytes.to_vec(),
                format,
                width,
                height,
            },
            quality: 1.0,
            attempts: outcome.attempts,
            target_bytes,
            met_target: source.size_bytes() <= target_bytes,
            passthrough: true,
        }
    } else {
        CompressOutcome {
            met_target: outcome.result.byte_length() as u64 <= target_bytes,
            result: outcome.result,
            quality: outcome.quality,
            attempts: outcome.attempts,
            target_bytes,
            passthrough: false,
        }
    };

    log::info!(
        "compressed {:?}: {} -> {} bytes (target {}, met: {}, {} attempts, {}x{})",
        source.name,
        source.size_bytes(),
        outcome.result.byte_length(),
        target_bytes,
        outcome.met_target,
        outcome.attempts,
        outcome.result.width,
        outcome.result.height
    );
    ticket.commit(outcome)
}
