//! Upload validation.
//!
//! Runs on file metadata only, before any bytes are decoded. Size is
//! checked first, then the declared MIME type.

use serde::Serialize;

use crate::format::OutputFormat;

/// Metadata of a candidate upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileInfo<'a> {
    pub size_bytes: u64,
    pub mime_type: &'a str,
}

/// Limits a file is validated against.
#[derive(Debug, Clone, Copy)]
pub struct ValidationConfig<'a> {
    pub max_size_bytes: u64,
    pub allowed_mime_types: &'a [String],
}

/// Why a file was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationFailure {
    TooLarge,
    UnsupportedType,
    /// Allowed in general, but not by the tool it was dropped on.
    WrongSourceType,
}

/// Result of validating one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<ValidationFailure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationOutcome {
    pub fn ok() -> Self {
        Self {
            valid: true,
            reason: None,
            message: None,
        }
    }

    fn rejected(reason: ValidationFailure, message: String) -> Self {
        Self {
            valid: false,
            reason: Some(reason),
            message: Some(message),
        }
    }
}

/// Validate a file against the size cap and the allowed MIME types.
pub fn validate(file: FileInfo<'_>, config: ValidationConfig<'_>) -> ValidationOutcome {
    if file.size_bytes > config.max_size_bytes {
        return ValidationOutcome::rejected(
            ValidationFailure::TooLarge,
            format!(
                "File is too large. Maximum size is {}.",
                crate::report::format_megabytes(config.max_size_bytes)
            ),
        );
    }

    let mime = file.mime_type.trim();
    if !config
        .allowed_mime_types
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(mime))
    {
        return ValidationOutcome::rejected(
            ValidationFailure::UnsupportedType,
            "Please upload a valid image file (JPG, PNG, or WebP).".to_string(),
        );
    }

    ValidationOutcome::ok()
}

/// The tool pages, plus a generic converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Tool {
    PngToJpg,
    JpgToPng,
    /// Any accepted format to any output format.
    Converter,
    Compressor,
    Resizer,
}

impl Tool {
    /// Whether this tool takes files of the given MIME type at all.
    pub fn accepts(self, mime: &str) -> bool {
        let format = OutputFormat::from_mime(mime);
        match self {
            Tool::PngToJpg => format == Some(OutputFormat::Png),
            Tool::JpgToPng => format == Some(OutputFormat::Jpeg),
            Tool::Converter | Tool::Compressor | Tool::Resizer => format.is_some(),
        }
    }

    /// Message shown when a file of the wrong type is dropped on this tool.
    pub fn wrong_source_message(self) -> &'static str {
        match self {
            Tool::PngToJpg => "Please upload a PNG image file.",
            Tool::JpgToPng => "Please upload a JPG image file.",
            Tool::Converter | Tool::Compressor | Tool::Resizer => {
                "Please upload a valid image file (JPG, PNG, or WebP)."
            }
        }
    }
}

/// Generic validation followed by the tool's own source-type rule.
pub fn validate_for_tool(
    tool: Tool,
    file: FileInfo<'_>,
    config: ValidationConfig<'_>,
) -> ValidationOutcome {
    let outcome = validate(file, config);
    if !outcome.valid {
        return outcome;
    }
    if !tool.accepts(file.mime_type) {
        return ValidationOutcome::rejected(
            ValidationFailure::WrongSourceType,
            tool.wrong_source_message().to_string(),
        );
    }
    outcome
}
