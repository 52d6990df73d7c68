use crate::config::ToolConfig;
use crate::decode::{sniff_format, DecodeError};
use crate::format::OutputFormat;
use crate::validate::{validate_for_tool, FileInfo, Tool};

use super::ToolError;

/// A file handed to a tool: its bytes plus what the browser said about it.
///
/// Borrowed, never modified.
#[derive(Debug, Clone, Copy)]
pub struct SourceImage<'a> {
    pub bytes: &'a [u8],
    /// MIME type declared by the browser (`File.type`).
    pub mime_type: &'a str,
    pub name: &'a str,
}

impl<'a> SourceImage<'a> {
    pub fn new(bytes: &'a [u8], mime_type: &'a str, name: &'a str) -> Self {
        Self {
            bytes,
            mime_type,
            name,
        }
    }

    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn file_info(&self) -> FileInfo<'a> {
        FileInfo {
            size_bytes: self.size_bytes(),
            mime_type: self.mime_type,
        }
    }

    /// Format of the bytes, falling back to the declared MIME type when the
    /// content cannot be sniffed.
    pub fn format(&self) -> Result<OutputFormat, ToolError> {
        match sniff_format(self.bytes) {
            Ok(format) => Ok(format),
            Err(err @ DecodeError::UnsupportedFormat(_)) => Err(err.into()),
            Err(err) => {
                OutputFormat::from_mime(self.mime_type).ok_or_else(|| ToolError::from(err))
            }
        }
    }

    /// Validate against `config` and `tool`'s source rule. No bytes are read.
    pub(crate) fn admit(&self, tool: Tool, config: &ToolConfig) -> Result<(), ToolError> {
        let outcome = validate_for_tool(tool, self.file_info(), config.validation());
        match outcome.reason {
            None => Ok(()),
            Some(reason) => Err(ToolError::rejected(
                reason,
                tool,
                self.size_bytes(),
                config.max_upload_bytes,
                self.mime_type,
            )),
        }
    }
}
