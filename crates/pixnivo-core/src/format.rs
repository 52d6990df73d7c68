//! Output formats supported by the tools.

use serde::{Deserialize, Serialize};

/// Raster formats the tools can write.
///
/// JPEG and WebP are lossy targets with a quality factor. PNG is lossless
/// and ignores quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Jpeg,
    Png,
    #[serde(rename = "webp")]
    WebP,
}

impl OutputFormat {
    /// Canonical MIME type for this format.
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
            OutputFormat::WebP => "image/webp",
        }
    }

    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
            OutputFormat::WebP => "webp",
        }
    }

    /// Whether the quality factor affects the encoded output.
    pub fn is_lossy(self) -> bool {
        matches!(self, OutputFormat::Jpeg | OutputFormat::WebP)
    }

    /// Parse a MIME type. `image/jpg` is accepted as an alias of JPEG.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some(OutputFormat::Jpeg),
            "image/png" => Some(OutputFormat::Png),
            "image/webp" => Some(OutputFormat::WebP),
            _ => None,
        }
    }

    /// Map a sniffed `image` crate format onto an output format.
    pub fn from_image_format(format: image::ImageFormat) -> Option<Self> {
        match format {
            image::ImageFormat::Jpeg => Some(OutputFormat::Jpeg),
            image::ImageFormat::Png => Some(OutputFormat::Png),
            image::ImageFormat::WebP => Some(OutputFormat::WebP),
            _ => None,
        }
    }

    /// Quality used by the converter when the caller does not pick one.
    ///
    /// 0.92 for lossy targets, 1.0 for lossless ones.
    pub fn default_quality(self) -> f32 {
        if self.is_lossy() {
            crate::config::DEFAULT_LOSSY_QUALITY
        } else {
            1.0
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mime_type())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mime_aliases() {
        assert_eq!(OutputFormat::from_mime("image/jpeg"), Some(OutputFormat::Jpeg));
        assert_eq!(OutputFormat::from_mime("image/jpg"), Some(OutputFormat::Jpeg));
        assert_eq!(OutputFormat::from_mime(" IMAGE/PNG "), Some(OutputFormat::Png));
        assert_eq!(OutputFormat::from_mime("image/webp"), Some(OutputFormat::WebP));
        assert_eq!(OutputFormat::from_mime("image/gif"), None);
        assert_eq!(OutputFormat::from_mime(""), None);
    }

    #[test]
    fn test_png_is_the_only_lossless_format() {
        assert!(OutputFormat::Jpeg.is_lossy());
        assert!(OutputFormat::WebP.is_lossy());
        assert!(!OutputFormat::Png.is_lossy());
    }

    #[test]
    fn test_default_quality() {
        assert!((OutputFormat::Jpeg.default_quality() - 0.92).abs() < f32::EPSILON);
        assert!((OutputFormat::WebP.default_quality() - 0.92).abs() < f32::EPSILON);
        assert!((OutputFormat::Png.default_quality() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_mime_and_extension() {
        assert_eq!(OutputFormat::Jpeg.mime_type(), "image/jpeg");
        assert_eq!(OutputFormat::Jpeg.extension(), "jpg");
        assert_eq!(OutputFormat::WebP.to_string(), "image/webp");
    }

    #[test]
    fn test_from_image_format() {
        assert_eq!(
            OutputFormat::from_image_format(image::ImageFormat::Png),
            Some(OutputFormat::Png)
        );
        assert_eq!(OutputFormat::from_image_format(image::ImageFormat::Gif), None);
    }
}
