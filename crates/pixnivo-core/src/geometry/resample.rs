//! Resampling surfaces to planned dimensions.
//!
//! All functions return new surfaces without modifying the input.

use super::{plan_fit, FilterType, GeometryError, ScaleMode};
use crate::decode::RasterSurface;

/// Resize a surface to exact dimensions.
///
/// # Errors
///
/// `GeometryError::InvalidBox` if `width` or `height` is zero, and
/// `GeometryError::PixelBuffer` if the surface's buffer is inconsistent.
pub fn resize_surface(
    surface: &RasterSurface,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<RasterSurface, GeometryError> {
    if width == 0 || height == 0 {
        return Err(GeometryError::InvalidBox {
            max_width: width,
            max_height: height,
        });
    }

    if surface.width == width && surface.height == height {
        return Ok(surface.clone());
    }

    let rgba = surface
        .to_rgba_image()
        .ok_or_else(|| GeometryError::PixelBuffer {
            expected: surface.width as usize * surface.height as usize * 4,
            actual: surface.pixels.len(),
        })?;

    let resized = image::imageops::resize(&rgba, width, height, filter.to_image_filter());
    Ok(RasterSurface::from_rgba_image(resized))
}

/// Plan a fit into `max_width x max_height` and resample to it.
///
/// Returns a clone when the plan keeps the source dimensions.
pub fn fit_surface(
    surface: &RasterSurface,
    max_width: u32,
    max_height: u32,
    mode: ScaleMode,
    filter: FilterType,
) -> Result<RasterSurface, GeometryError> {
    let (width, height) = plan_fit(surface.width, surface.height, max_width, max_height, mode)?;

    if (width, height) != surface.dimensions() {
        log::debug!(
            "resampling {}x{} -> {}x{} ({:?})",
            surface.width,
            surface.height,
            width,
            height,
            filter
        );
    }

    resize_surface(surface, width, height, filter)
}
