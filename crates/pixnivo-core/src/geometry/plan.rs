//! Bounding-box planning.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Whether a plan may enlarge the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScaleMode {
    /// Never enlarge beyond the source dimensions.
    #[default]
    ShrinkOnly,
    /// Scale up or down so the image touches the box.
    Fit,
}

/// Errors from planning or resampling.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeometryError {
    /// The bounding box has a side below one pixel.
    #[error("Width and height must be at least 1 pixel (got {max_width}x{max_height})")]
    InvalidBox { max_width: u32, max_height: u32 },

    /// The source has a zero-length side.
    #[error("Source image has invalid dimensions {width}x{height}")]
    EmptySource { width: u32, height: u32 },

    /// Pixel data length doesn't match the surface dimensions.
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    PixelBuffer { expected: usize, actual: usize },
}

/// Compute output dimensions for fitting `width x height` inside
/// `max_width x max_height`.
///
/// # Errors
///
/// `GeometryError::InvalidBox` if either box side is below 1, and
/// `GeometryError::EmptySource` if the source has a zero side.
///
/// # Example
///
/// ```
/// use pixnivo_core::geometry::{plan_fit, ScaleMode};
///
/// // 4:3 source in a 16:9 box is height-bound
/// let out = plan_fit(4000, 3000, 1920, 1080, ScaleMode::ShrinkOnly).unwrap();
/// assert_eq!(out, (1440, 1080));
/// ```
pub fn plan_fit(
    width: u32,
    height: u32,
    max_width: u32,
    max_height: u32,
    mode: ScaleMode,
) -> Result<(u32, u32), GeometryError> {
    if max_width < 1 || max_height < 1 {
        return Err(GeometryError::InvalidBox {
            max_width,
            max_height,
        });
    }
    if width == 0 || height == 0 {
        return Err(GeometryError::EmptySource { width, height });
    }

    let scale_x = max_width as f64 / width as f64;
    let scale_y = max_height as f64 / height as f64;
    let mut scale = scale_x.min(scale_y);
    if mode == ScaleMode::ShrinkOnly {
        scale = scale.min(1.0);
    }

    if scale == 1.0 {
        return Ok((width, height));
    }

    let out_width = scale_side(width, scale, max_width);
    let out_height = scale_side(height, scale, max_height);
    Ok((out_width, out_height))
}

fn scale_side(side: u32, scale: f64, max: u32) -> u32 {
    let scaled = (side as f64 * scale).round();
    (scaled as u32).clamp(1, max)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn mode_strategy() -> impl Strategy<Value = ScaleMode> {
        prop_oneof![Just(ScaleMode::ShrinkOnly), Just(ScaleMode::Fit)]
    }

    proptest! {
        /// Property: output always fits inside the box and is at least 1x1.
        #[test]
        fn prop_output_within_bounds(
            width in 1u32..=10_000,
            height in 1u32..=10_000,
            max_width in 1u32..=5_000,
            max_height in 1u32..=5_000,
            mode in mode_strategy(),
        ) {
            let (w, h) = plan_fit(width, height, max_width, max_height, mode).unwrap();
            prop_assert!(w >= 1 && h >= 1);
            prop_assert!(w <= max_width, "width {} exceeds {}", w, max_width);
            prop_assert!(h <= max_height, "height {} exceeds {}", h, max_height);
        }

        /// Property: both sides use the same scale, within one rounding unit.
        #[test]
        fn prop_aspect_ratio_preserved(
            width in 1u32..=10_000,
            height in 1u32..=10_000,
            max_width in 1u32..=5_000,
            max_height in 1u32..=5_000,
            mode in mode_strategy(),
        ) {
            let (w, h) = plan_fit(width, height, max_width, max_height, mode).unwrap();
            let mut scale = (max_width as f64 / width as f64).min(max_height as f64 / height as f64);
            if mode == ScaleMode::ShrinkOnly {
                scale = scale.min(1.0);
            }
            prop_assert!((w as f64 - width as f64 * scale).abs() <= 1.0);
            prop_assert!((h as f64 - height as f64 * scale).abs() <= 1.0);
        }

        /// Property: shrink-only never enlarges either side.
        #[test]
        fn prop_shrink_only_never_enlarges(
            width in 1u32..=10_000,
            height in 1u32..=10_000,
            max_width in 1u32..=20_000,
            max_height in 1u32..=20_000,
        ) {
            let (w, h) = plan_fit(width, height, max_width, max_height, ScaleMode::ShrinkOnly).unwrap();
            prop_assert!(w <= width && h <= height);
        }

        /// Property: planning the output again against the same box changes nothing.
        #[test]
        fn prop_idempotent(
            width in 1u32..=10_000,
            height in 1u32..=10_000,
            max_width in 1u32..=5_000,
            max_height in 1u32..=5_000,
            mode in mode_strategy(),
        ) {
            let first = plan_fit(width, height, max_width, max_height, mode).unwrap();
            let second = plan_fit(first.0, first.1, max_width, max_height, mode).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
