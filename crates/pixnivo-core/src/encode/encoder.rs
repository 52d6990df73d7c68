//! Format encoders: the `image` crate's codecs for JPEG and PNG, libwebp
//! (through the `webp` crate) for lossy WebP.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::{EncodeError, EncodedResult};
use crate::decode::RasterSurface;
use crate::format::OutputFormat;

/// Encode a surface to `format` at `quality`.
///
/// `quality` is in `[0, 1]` and affects JPEG and WebP; values outside the
/// range are clamped. The surface is not modified.
///
/// # Errors
///
/// * `EncodeError::InvalidDimensions` if the surface has a zero side.
/// * `EncodeError::InvalidPixelData` if the buffer length is not `w * h * 4`.
/// * `EncodeError::InvalidQuality` if `quality` is NaN or infinite.
/// * `EncodeError::EncodingFailed` if the codec fails.
pub fn encode_surface(
    surface: &RasterSurface,
    format: OutputFormat,
    quality: f32,
) -> Result<EncodedResult, EncodeError> {
    let (width, height) = surface.dimensions();
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = width as usize * height as usize * 4;
    if surface.pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: surface.pixels.len(),
        });
    }

    if !quality.is_finite() {
        return Err(EncodeError::InvalidQuality(quality));
    }

    let mut buffer = Cursor::new(Vec::new());
    let failed = |e: image::ImageError| EncodeError::EncodingFailed {
        format,
        message: e.to_string(),
    };

    match format {
        OutputFormat::Jpeg => {
            let rgb = flatten_on_white(&surface.pixels);
            JpegEncoder::new_with_quality(&mut buffer, jpeg_quality(quality))
                .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
                .map_err(failed)?;
        }
        OutputFormat::Png => {
            let encoder = PngEncoder::new(&mut buffer);
            if surface.has_alpha() {
                encoder
                    .write_image(&surface.pixels, width, height, ExtendedColorType::Rgba8)
                    .map_err(failed)?;
            } else {
                let rgb = strip_alpha(&surface.pixels);
                encoder
                    .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
                    .map_err(failed)?;
            }
        }
        OutputFormat::WebP => {
            let rgb;
            let encoder = if surface.has_alpha() {
                webp::Encoder::from_rgba(&surface.pixels, width, height)
            } else {
                rgb = strip_alpha(&surface.pixels);
                webp::Encoder::from_rgb(&rgb, width, height)
            };
            let memory = encoder
                .encode_simple(false, webp_quality(quality))
                .map_err(|e| EncodeError::EncodingFailed {
                    format,
                    message: format!("{:?}", e),
                })?;
            buffer.get_mut().extend_from_slice(&memory);
        }
    }

    Ok(EncodedResult {
        bytes: buffer.into_inner(),
        format,
        width,
        height,
    })
}

/// Map a `[0, 1]` quality factor onto the JPEG encoder's 1-100 scale.
pub fn jpeg_quality(quality: f32) -> u8 {
    let scaled = (quality.clamp(0.0, 1.0) * 100.0).round() as u8;
    scaled.clamp(1, 100)
}

/// Map a `[0, 1]` quality factor onto libwebp's 0-100 scale.
pub fn webp_quality(quality: f32) -> f32 {
    quality.clamp(0.0, 1.0) * 100.0
}

/// Composite RGBA pixels over opaque white, producing RGB.
pub fn flatten_on_white(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        let alpha = px[3] as u32;
        for &channel in &px[..3] {
            let blended = (channel as u32 * alpha + 255 * (255 - alpha) + 127) / 255;
            rgb.push(blended as u8);
        }
    }
    rgb
}

fn strip_alpha(rgba: &[u8]) -> Vec<u8> {
    rgba.chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect()
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=40, 1u32..=40)
    }

    fn format_strategy() -> impl Strategy<Value = OutputFormat> {
        prop_oneof![
            Just(OutputFormat::Jpeg),
            Just(OutputFormat::Png),
            Just(OutputFormat::WebP),
        ]
    }

    proptest! {
        /// Property: valid input always encodes, and byte_length is the real length.
        #[test]
        fn prop_valid_input_encodes(
            (width, height) in dimensions_strategy(),
            format in format_strategy(),
            quality in 0.0f32..=1.0,
            fill in any::<u8>(),
        ) {
            let surface = RasterSurface::new(width, height, vec![fill; (width * height * 4) as usize]);
            let result = encode_surface(&surface, format, quality);
            prop_assert!(result.is_ok(), "encode failed: {:?}", result.err());

            let result = result.unwrap();
            prop_assert!(result.byte_length() > 0);
            prop_assert_eq!(result.byte_length(), result.bytes.len());
            prop_assert_eq!((result.width, result.height), (width, height));
        }

        /// Property: same input always produces the same bytes.
        #[test]
        fn prop_deterministic_output(
            (width, height) in (1u32..=16, 1u32..=16),
            format in format_strategy(),
            quality in 0.0f32..=1.0,
        ) {
            let surface = RasterSurface::new(width, height, vec![100u8; (width * height * 4) as usize]);
            let a = encode_surface(&surface, format, quality).unwrap();
            let b = encode_surface(&surface, format, quality).unwrap();
            prop_assert_eq!(a.bytes, b.bytes);
        }

        /// Property: mismatched buffers are always rejected.
        #[test]
        fn prop_invalid_pixel_length_returns_error(
            (width, height) in dimensions_strategy(),
            format in format_strategy(),
            delta in prop_oneof![-12i64..=-1, 1i64..=12],
        ) {
            let expected = (width * height * 4) as i64;
            let actual = (expected + delta).max(0) as usize;
            prop_assume!(actual != expected as usize);

            let surface = RasterSurface { width, height, pixels: vec![0u8; actual] };
            prop_assert!(
                matches!(
                    encode_surface(&surface, format, 0.9),
                    Err(EncodeError::InvalidPixelData { .. })
                ),
                "mismatched pixel data should be rejected"
            );
        }

        /// Property: flattening yields three opaque channels per pixel.
        #[test]
        fn prop_flatten_length(pixels in prop::collection::vec(any::<u8>(), 0..256)) {
            let whole = pixels.len() / 4 * 4;
            let rgb = flatten_on_white(&pixels[..whole]);
            prop_assert_eq!(rgb.len(), whole / 4 * 3);
        }
    }
}
