//! Decoding uploaded bytes into a [`RasterSurface`].
//!
//! The format is sniffed from the bytes, not taken from the declared MIME
//! type, so a mislabeled upload still decodes or fails with a precise error.
//! EXIF orientation is applied the way browsers display images.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, Orientation, RasterSurface};
use crate::format::OutputFormat;

/// Decode image bytes (JPEG, PNG or WebP) into an RGBA surface.
///
/// # Errors
///
/// * `DecodeError::Empty` if `bytes` is empty.
/// * `DecodeError::InvalidFormat` if the format cannot be recognized.
/// * `DecodeError::UnsupportedFormat` for recognized formats other than
///   JPEG, PNG and WebP.
/// * `DecodeError::CorruptedFile` if the data is truncated or malformed.
pub fn decode_image(bytes: &[u8]) -> Result<RasterSurface, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    let img = decode_dynamic(bytes)?;
    let oriented = apply_orientation(img, extract_orientation(bytes));
    let surface = RasterSurface::from_rgba_image(oriented.into_rgba8());

    if surface.is_empty() {
        return Err(DecodeError::CorruptedFile("image has no pixels".to_string()));
    }

    log::debug!("decoded {}x{} image", surface.width, surface.height);
    Ok(surface)
}

/// Sniff the format of `bytes` without decoding pixel data.
pub fn sniff_format(bytes: &[u8]) -> Result<OutputFormat, DecodeError> {
    let format = image::guess_format(bytes).map_err(|_| DecodeError::InvalidFormat)?;
    OutputFormat::from_image_format(format)
        .ok_or_else(|| DecodeError::UnsupportedFormat(format!("{:?}", format)))
}

fn decode_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    match reader.format() {
        None => return Err(DecodeError::InvalidFormat),
        Some(format) if OutputFormat::from_image_format(format).is_none() => {
            return Err(DecodeError::UnsupportedFormat(format!("{:?}", format)));
        }
        Some(_) => {}
    }

    reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

/// Extract the EXIF orientation tag.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
