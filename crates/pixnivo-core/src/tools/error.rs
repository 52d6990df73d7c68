use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;
use crate::geometry::GeometryError;
use crate::report::format_megabytes;
use crate::validate::{Tool, ValidationFailure};

const INVALID_TYPE_MESSAGE: &str = "Please upload a valid image file (JPG, PNG, or WebP).";

/// Why a tool operation stopped.
///
/// Every variant is terminal for the operation that produced it; nothing is
/// retried by the core.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("file is {size_bytes} bytes, limit is {max_bytes}")]
    TooLarge { size_bytes: u64, max_bytes: u64 },

    #[error("unsupported file type {mime_type:?}")]
    UnsupportedType { mime_type: String },

    #[error("{tool:?} does not accept {mime_type:?}")]
    WrongSourceType { tool: Tool, mime_type: String },

    #[error("invalid dimensions: {0}")]
    InvalidDimensions(#[from] GeometryError),

    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("encode failed: {0}")]
    Encode(#[from] EncodeError),

    /// A newer selection exists; this operation's result is stale.
    #[error("operation for ticket {ticket} was superseded")]
    Superseded { ticket: u64 },
}

impl ToolError {
    /// Turn a failed validation into the matching error.
    pub(crate) fn rejected(
        reason: ValidationFailure,
        tool: Tool,
        size_bytes: u64,
        max_bytes: u64,
        mime_type: &str,
    ) -> Self {
        match reason {
            ValidationFailure::TooLarge => ToolError::TooLarge {
                size_bytes,
                max_bytes,
            },
            ValidationFailure::UnsupportedType => ToolError::UnsupportedType {
                mime_type: mime_type.to_string(),
            },
            ValidationFailure::WrongSourceType => ToolError::WrongSourceType {
                tool,
                mime_type: mime_type.to_string(),
            },
        }
    }

    /// The message shown to the user for this error.
    pub fn user_message(&self) -> String {
        match self {
            ToolError::TooLarge { max_bytes, .. } => format!(
                "File is too large. Maximum size is {}.",
                format_megabytes(*max_bytes)
            ),
            ToolError::UnsupportedType { .. } => INVALID_TYPE_MESSAGE.to_string(),
            ToolError::WrongSourceType { tool, .. } => tool.wrong_source_message().to_string(),
            ToolError::InvalidDimensions(_) => {
                "Width and height must be at least 1 pixel.".to_string()
            }
            ToolError::Decode(_) => "Failed to load image. Please try again.".to_string(),
            ToolError::Encode(_) => "Failed to process image. Please try again.".to_string(),
            ToolError::Superseded { .. } => {
                "A newer image was selected. This result was discarded.".to_string()
            }
        }
    }

    /// True for errors raised before any decoding happened.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ToolError::TooLarge { .. }
                | ToolError::UnsupportedType { .. }
                | ToolError::WrongSourceType { .. }
        )
    }
}
