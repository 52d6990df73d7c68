//! Tool configuration and the presets shown by the tool pages.
//!
//! Every tunable lives in [`ToolConfig`]. The defaults match what the
//! tool pages ship with; the WASM layer lets the page override any field
//! by passing a partial object.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::FilterType;

/// Maximum accepted upload size (10 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// MIME types accepted by every tool.
pub const ALLOWED_MIME_TYPES: [&str; 4] = ["image/jpeg", "image/jpg", "image/png", "image/webp"];

/// Quality used for lossy conversion and resizing.
pub const DEFAULT_LOSSY_QUALITY: f32 = 0.92;

/// Longest edge the compressor shrinks to before searching for a quality.
pub const DEFAULT_COMPRESS_MAX_LONG_EDGE: u32 = 1920;

/// Target sizes offered by the compressor, in megabytes.
pub const TARGET_SIZE_PRESETS_MB: [f64; 4] = [0.5, 1.0, 2.0, 5.0];

/// A named bounding box offered by the resizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResizePreset {
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
}

/// Bounding boxes for common social formats.
pub const RESIZE_PRESETS: [ResizePreset; 6] = [
    ResizePreset {
        name: "Instagram Post",
        width: 1080,
        height: 1080,
    },
    ResizePreset {
        name: "Instagram Story",
        width: 1080,
        height: 1920,
    },
    ResizePreset {
        name: "Facebook Cover",
        width: 1200,
        height: 630,
    },
    ResizePreset {
        name: "Twitter Header",
        width: 1500,
        height: 500,
    },
    ResizePreset {
        name: "LinkedIn Post",
        width: 1200,
        height: 627,
    },
    ResizePreset {
        name: "YouTube Thumbnail",
        width: 1280,
        height: 720,
    },
];

/// Look up a resize preset by name (case-insensitive).
pub fn resize_preset(name: &str) -> Option<ResizePreset> {
    RESIZE_PRESETS
        .iter()
        .copied()
        .find(|preset| preset.name.eq_ignore_ascii_case(name.trim()))
}

/// A configuration value that makes no sense.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be within [0, 1], got {value}")]
    QualityOutOfRange { field: &'static str, value: f32 },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("minimum quality ({min}) exceeds the maximum quality (1.0)")]
    FloorAboveCeiling { min: f32 },

    #[error("fit slack must be within [0, 1], got {0}")]
    SlackOutOfRange(f32),
}

/// Bounds for the size-targeting quality search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SizeTargetPolicy {
    /// Lowest quality the search will try.
    pub min_quality: f32,
    /// Maximum number of encode attempts per operation.
    pub max_attempts: u32,
    /// Fraction of the budget a fitting result may leave unused before the
    /// search stops refining upward. 1.0 stops at the first fit.
    pub fit_slack: f32,
}

impl Default for SizeTargetPolicy {
    fn default() -> Self {
        Self {
            min_quality: 0.1,
            max_attempts: 7,
            fit_slack: 0.1,
        }
    }
}

impl SizeTargetPolicy {
    pub fn validated(self) -> Result<Self, ConfigError> {
        check_quality("minQuality", self.min_quality)?;
        if self.min_quality >= 1.0 {
            return Err(ConfigError::FloorAboveCeiling {
                min: self.min_quality,
            });
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::Zero("maxAttempts"));
        }
        if !(0.0..=1.0).contains(&self.fit_slack) {
            return Err(ConfigError::SlackOutOfRange(self.fit_slack));
        }
        Ok(self)
    }
}

/// Settings shared by all tool operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToolConfig {
    pub max_upload_bytes: u64,
    pub allowed_mime_types: Vec<String>,
    /// Quality for conversions to a lossy format.
    pub convert_lossy_quality: f32,
    /// Quality for the single encode done by the resizer.
    pub resize_quality: f32,
    /// Square box the compressor shrinks into before the quality search.
    pub compress_max_long_edge: u32,
    pub resize_filter: FilterType,
    pub size_target: SizeTargetPolicy,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: MAX_UPLOAD_BYTES,
            allowed_mime_types: ALLOWED_MIME_TYPES.iter().map(|m| m.to_string()).collect(),
            convert_lossy_quality: DEFAULT_LOSSY_QUALITY,
            resize_quality: DEFAULT_LOSSY_QUALITY,
            compress_max_long_edge: DEFAULT_COMPRESS_MAX_LONG_EDGE,
            resize_filter: FilterType::Lanczos3,
            size_target: SizeTargetPolicy::default(),
        }
    }
}

impl ToolConfig {
    /// Check every field and return the config unchanged when it is usable.
    pub fn validated(self) -> Result<Self, ConfigError> {
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::Zero("maxUploadBytes"));
        }
        if self.compress_max_long_edge == 0 {
            return Err(ConfigError::Zero("compressMaxLongEdge"));
        }
        check_quality("convertLossyQuality", self.convert_lossy_quality)?;
        check_quality("resizeQuality", self.resize_quality)?;
        let size_target = self.size_target.clone().validated()?;
        Ok(Self {
            size_target,
            ..self
        })
    }

    /// The validator's view of this config.
    pub fn validation(&self) -> crate::validate::ValidationConfig<'_> {
        crate::validate::ValidationConfig {
            max_size_bytes: self.max_upload_bytes,
            allowed_mime_types: &self.allowed_mime_types,
        }
    }
}

fn check_quality(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::QualityOutOfRange { field, value })
    }
}
