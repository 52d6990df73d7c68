//! Output geometry: fitting an image into a bounding box and resampling.
//!
//! Planning and pixel work are separate. [`plan_fit`] is pure integer
//! arithmetic the UI can call to preview output dimensions; [`fit_surface`]
//! plans and then resamples a decoded surface.
//!
//! # Rules
//!
//! - One uniform scale factor for both axes, so aspect ratio is kept
//! - The scale is `min(max_width / width, max_height / height)`: fit, never crop
//! - [`ScaleMode::ShrinkOnly`] additionally caps the scale at 1.0
//! - Output sides are rounded to the nearest integer, never below 1

mod plan;
mod resample;

pub use plan::{plan_fit, GeometryError, ScaleMode};
pub use resample::{fit_surface, resize_surface};

use serde::{Deserialize, Serialize};

/// Filter type for resampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    #[default]
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}
