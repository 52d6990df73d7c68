//! WASM-compatible wrapper types for tool results and errors.
//!
//! Byte counts cross the boundary as `f64` (JS numbers) rather than `u64`,
//! which wasm-bindgen would map to `BigInt`.

use pixnivo_core::format::OutputFormat;
use pixnivo_core::{CompressOutcome, EncodedResult, ToolConfig, ToolError};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// An encoded image for JavaScript.
///
/// `bytes()` copies the blob into JS memory; wrap it in a `Blob` with
/// `mimeType` for download.
#[wasm_bindgen]
pub struct JsEncodedResult {
    bytes: Vec<u8>,
    format: OutputFormat,
    width: u32,
    height: u32,
}

#[wasm_bindgen]
impl JsEncodedResult {
    /// Encoded bytes as a `Uint8Array` (copied).
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    #[wasm_bindgen(getter, js_name = byteLength)]
    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }

    #[wasm_bindgen(getter, js_name = mimeType)]
    pub fn mime_type(&self) -> String {
        self.format.mime_type().to_string()
    }

    /// File extension without the dot, for download naming.
    #[wasm_bindgen(getter)]
    pub fn extension(&self) -> String {
        self.format.extension().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }
}

impl From<EncodedResult> for JsEncodedResult {
    fn from(result: EncodedResult) -> Self {
        Self {
            bytes: result.bytes,
            format: result.format,
            width: result.width,
            height: result.height,
        }
    }
}

/// A compression result with the requested budget and what was reached.
#[wasm_bindgen]
pub struct JsCompressResult {
    result: JsEncodedResult,
    quality: f32,
    attempts: u32,
    target_bytes: u64,
    met_target: bool,
    passthrough: bool,
}

#[wasm_bindgen]
impl JsCompressResult {
    pub fn bytes(&self) -> Vec<u8> {
        self.result.bytes()
    }

    #[wasm_bindgen(getter, js_name = byteLength)]
    pub fn byte_length(&self) -> usize {
        self.result.byte_length()
    }

    #[wasm_bindgen(getter, js_name = mimeType)]
    pub fn mime_type(&self) -> String {
        self.result.mime_type()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.result.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.result.height
    }

    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> f32 {
        self.quality
    }

    #[wasm_bindgen(getter)]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    #[wasm_bindgen(getter, js_name = targetBytes)]
    pub fn target_bytes(&self) -> f64 {
        self.target_bytes as f64
    }

    /// False when the budget could not be reached; the result is still usable.
    #[wasm_bindgen(getter, js_name = metTarget)]
    pub fn met_target(&self) -> bool {
        self.met_target
    }

    /// The original upload was returned unchanged.
    #[wasm_bindgen(getter)]
    pub fn passthrough(&self) -> bool {
        self.passthrough
    }
}

impl From<CompressOutcome> for JsCompressResult {
    fn from(outcome: CompressOutcome) -> Self {
        Self {
            result: outcome.result.into(),
            quality: outcome.quality,
            attempts: outcome.attempts,
            target_bytes: outcome.target_bytes,
            met_target: outcome.met_target,
            passthrough: outcome.passthrough,
        }
    }
}

/// The error object thrown to JavaScript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ErrorReport {
    /// Stable machine-readable kind, e.g. `"tooLarge"`.
    pub kind: &'static str,
    /// Text for the page's error banner.
    pub message: String,
    pub detail: String,
}

impl From<&ToolError> for ErrorReport {
    fn from(err: &ToolError) -> Self {
        let kind = match err {
            ToolError::TooLarge { .. } => "tooLarge",
            ToolError::UnsupportedType { .. } => "unsupportedType",
            ToolError::WrongSourceType { .. } => "wrongSourceType",
            ToolError::InvalidDimensions(_) => "invalidDimensions",
            ToolError::Decode(_) => "decode",
            ToolError::Encode(_) => "encode",
            ToolError::Superseded { .. } => "superseded",
        };
        Self {
            kind,
            message: err.user_message(),
            detail: err.to_string(),
        }
    }
}

/// Convert a tool error into a thrown JS value (`{ kind, message, detail }`).
pub(crate) fn tool_error(err: ToolError) -> JsValue {
    let report = ErrorReport::from(&err);
    serde_wasm_bindgen::to_value(&report).unwrap_or_else(|_| JsValue::from_str(&report.message))
}

/// Read an optional config object. `undefined` and `null` give the defaults;
/// missing fields fall back to their defaults.
pub(crate) fn config_from_js(value: JsValue) -> Result<ToolConfig, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(ToolConfig::default());
    }
    let config: ToolConfig =
        serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
    config
        .validated()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Parse an output format from a MIME type or a bare name ("jpg", "png").
pub(crate) fn parse_format(value: &str) -> Result<OutputFormat, String> {
    let trimmed = value.trim();
    OutputFormat::from_mime(trimmed)
        .or_else(|| OutputFormat::from_mime(&format!("image/{}", trimmed)))
        .ok_or_else(|| format!("unsupported output format {:?}", value))
}

/// Byte counts from JS numbers. Negative and NaN become 0.
pub(crate) fn bytes_from_js(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixnivo_core::GeometryError;

    #[test]
    fn test_encoded_result_wrapper() {
        let js = JsEncodedResult::from(EncodedResult {
            bytes: vec![1, 2, 3],
            format: OutputFormat::Png,
            width: 4,
            height: 5,
        });
        assert_eq!(js.byte_length(), 3);
        assert_eq!(js.bytes(), vec![1, 2, 3]);
        assert_eq!(js.mime_type(), "image/png");
        assert_eq!(js.extension(), "png");
        assert_eq!((js.width(), js.height()), (4, 5));
    }

    #[test]
    fn test_compress_result_wrapper() {
        let js = JsCompressResult::from(CompressOutcome {
            result: EncodedResult {
                bytes: vec![0; 10],
                format: OutputFormat::Jpeg,
                width: 2,
                height: 2,
            },
            quality: 0.55,
            attempts: 3,
            target_bytes: 512 * 1024,
            met_target: true,
            passthrough: false,
        });
        assert_eq!(js.byte_length(), 10);
        assert_eq!(js.target_bytes(), 524_288.0);
        assert_eq!(js.attempts(), 3);
        assert!(js.met_target());
        assert!(!js.passthrough());
        assert_eq!(js.mime_type(), "image/jpeg");
    }

    #[test]
    fn test_error_report() {
        let err = ToolError::from(GeometryError::InvalidBox {
            max_width: 0,
            max_height: 0,
        });
        let report = ErrorReport::from(&err);
        assert_eq!(report.kind, "invalidDimensions");
        assert_eq!(report.message, "Width and height must be at least 1 pixel.");

        let err = ToolError::Superseded { ticket: 3 };
        assert_eq!(ErrorReport::from(&err).kind, "superseded");
    }

    #[test]
    fn test_parse_format() {
        assert_eq!(parse_format("image/jpeg").unwrap(), OutputFormat::Jpeg);
        assert_eq!(parse_format("jpg").unwrap(), OutputFormat::Jpeg);
        assert_eq!(parse_format("webp").unwrap(), OutputFormat::WebP);
        assert_eq!(parse_format(" PNG ").unwrap(), OutputFormat::Png);
        assert!(parse_format("gif").is_err());
    }

    #[test]
    fn test_bytes_from_js() {
        assert_eq!(bytes_from_js(1024.0), 1024);
        assert_eq!(bytes_from_js(-5.0), 0);
        assert_eq!(bytes_from_js(f64::NAN), 0);
        assert_eq!(bytes_from_js(f64::INFINITY), 0);
    }
}
