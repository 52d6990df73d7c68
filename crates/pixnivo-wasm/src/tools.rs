//! Tool bindings: validation, conversion, compression and resizing.
//!
//! A page creates one [`JsToolSession`] and calls `select()` whenever the
//! user picks a file. The returned ticket goes with every tool call for that
//! file; once a newer file is selected, calls with the old ticket reject
//! with `{ kind: "superseded" }` instead of returning a stale result.
//!
//! Every call runs synchronously inside the worker, so a `select()` posted
//! while a call is running is only handled after that call returns. The
//! worker cannot interrupt its own call: the page checks `ticket.isCurrent`
//! (or compares its own selection id) when a result message arrives and
//! drops results for files that are no longer selected. Tickets checked
//! between compression attempts only cut a search short when the ticket's
//! counter is shared with another thread.
//!
//! # Example
//!
//! ```typescript
//! import { JsToolSession } from '@pixnivo/wasm';
//!
//! const tools = new JsToolSession({ sizeTarget: { maxAttempts: 6 } });
//! const ticket = tools.select();
//! const bytes = new Uint8Array(await file.arrayBuffer());
//!
//! const out = tools.compress(ticket, bytes, file.type, file.name, 1.0);
//! if (!ticket.isCurrent) {
//!   return; // a newer file was picked while this one was compressing
//! }
//! if (!out.metTarget) {
//!   console.warn(`Could only reach ${out.byteLength} bytes`);
//! }
//! ```

use pixnivo_core::validate::{validate, validate_for_tool, FileInfo, Tool};
use pixnivo_core::{
    compress, convert, jpg_to_png, png_to_jpg, report, resize, ResizeRequest, Session,
    SourceImage, Ticket, ToolConfig,
};
use wasm_bindgen::prelude::*;

use crate::types::{
    bytes_from_js, config_from_js, parse_format, tool_error, JsCompressResult, JsEncodedResult,
};

/// A selection ticket. Pass it to every tool call for the same file.
#[wasm_bindgen]
pub struct JsTicket {
    inner: Ticket,
}

#[wasm_bindgen]
impl JsTicket {
    #[wasm_bindgen(getter)]
    pub fn id(&self) -> f64 {
        self.inner.id() as f64
    }

    /// False once a newer file has been selected.
    #[wasm_bindgen(getter, js_name = isCurrent)]
    pub fn is_current(&self) -> bool {
        self.inner.is_current()
    }
}

/// Configuration plus the supersession state for one tool page.
#[wasm_bindgen]
pub struct JsToolSession {
    session: Session,
    config: ToolConfig,
}

#[wasm_bindgen]
impl JsToolSession {
    /// Create a session. `config` may be `undefined` or a partial object.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsToolSession, JsValue> {
        Ok(Self {
            session: Session::new(),
            config: config_from_js(config)?,
        })
    }

    /// Start work on a newly selected file, invalidating earlier tickets.
    pub fn select(&self) -> JsTicket {
        JsTicket {
            inner: self.session.select(),
        }
    }

    /// Invalidate every outstanding ticket (e.g. the user left the page).
    #[wasm_bindgen(js_name = cancelAll)]
    pub fn cancel_all(&self) {
        self.session.cancel_all();
    }

    /// Validate file metadata for `tool` ("pngToJpg", "jpgToPng",
    /// "converter", "compressor" or "resizer").
    ///
    /// Returns `{ valid, reason?, message? }`.
    pub fn validate(
        &self,
        size_bytes: f64,
        mime_type: &str,
        tool: &str,
    ) -> Result<JsValue, JsValue> {
        let tool = parse_tool(tool).map_err(|e| JsValue::from_str(&e))?;
        let outcome = validate_for_tool(
            tool,
            FileInfo {
                size_bytes: bytes_from_js(size_bytes),
                mime_type,
            },
            self.config.validation(),
        );
        serde_wasm_bindgen::to_value(&outcome).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Convert to `target_format` ("jpeg", "png", "webp" or a MIME type).
    ///
    /// `quality` defaults to 0.92 for JPEG and WebP.
    pub fn convert(
        &self,
        ticket: &JsTicket,
        bytes: &[u8],
        mime_type: &str,
        name: &str,
        target_format: &str,
        quality: Option<f32>,
    ) -> Result<JsEncodedResult, JsValue> {
        let target = parse_format(target_format).map_err(|e| JsValue::from_str(&e))?;
        let source = SourceImage::new(bytes, mime_type, name);
        convert(&source, target, quality, &self.config, &ticket.inner)
            .map(JsEncodedResult::from)
            .map_err(tool_error)
    }

    #[wasm_bindgen(js_name = pngToJpg)]
    pub fn png_to_jpg(
        &self,
        ticket: &JsTicket,
        bytes: &[u8],
        mime_type: &str,
        name: &str,
    ) -> Result<JsEncodedResult, JsValue> {
        let source = SourceImage::new(bytes, mime_type, name);
        png_to_jpg(&source, &self.config, &ticket.inner)
            .map(JsEncodedResult::from)
            .map_err(tool_error)
    }

    #[wasm_bindgen(js_name = jpgToPng)]
    pub fn jpg_to_png(
        &self,
        ticket: &JsTicket,
        bytes: &[u8],
        mime_type: &str,
        name: &str,
    ) -> Result<JsEncodedResult, JsValue> {
        let source = SourceImage::new(bytes, mime_type, name);
        jpg_to_png(&source, &self.config, &ticket.inner)
            .map(JsEncodedResult::from)
            .map_err(tool_error)
    }

    /// Compress toward `target_megabytes` (one of 0.5, 1, 2, 5 on the page).
    pub fn compress(
        &self,
        ticket: &JsTicket,
        bytes: &[u8],
        mime_type: &str,
        name: &str,
        target_megabytes: f64,
        max_long_edge: Option<u32>,
    ) -> Result<JsCompressResult, JsValue> {
        let source = SourceImage::new(bytes, mime_type, name);
        let target_bytes = report::megabytes_to_bytes(target_megabytes);
        compress(&source, target_bytes, max_long_edge, &self.config, &ticket.inner)
            .map(JsCompressResult::from)
            .map_err(tool_error)
    }

    /// Fit into `max_width x max_height`, keeping the source format.
    #[allow(clippy::too_many_arguments)]
    pub fn resize(
        &self,
        ticket: &JsTicket,
        bytes: &[u8],
        mime_type: &str,
        name: &str,
        max_width: u32,
        max_height: u32,
        quality: Option<f32>,
        allow_upscale: Option<bool>,
    ) -> Result<JsEncodedResult, JsValue> {
        let source = SourceImage::new(bytes, mime_type, name);
        let request = ResizeRequest {
            quality,
            allow_upscale: allow_upscale.unwrap_or(false),
            ..ResizeRequest::new(max_width, max_height)
        };
        resize(&source, &request, &self.config, &ticket.inner)
            .map(JsEncodedResult::from)
            .map_err(tool_error)
    }
}

/// Validate file metadata against an optional config, without a tool rule.
#[wasm_bindgen(js_name = validateFile)]
pub fn validate_file(
    size_bytes: f64,
    mime_type: &str,
    config: JsValue,
) -> Result<JsValue, JsValue> {
    let config = config_from_js(config)?;
    let outcome = validate(
        FileInfo {
            size_bytes: bytes_from_js(size_bytes),
            mime_type,
        },
        config.validation(),
    );
    serde_wasm_bindgen::to_value(&outcome).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_tool(name: &str) -> Result<Tool, String> {
    match name.trim() {
        "pngToJpg" => Ok(Tool::PngToJpg),
        "jpgToPng" => Ok(Tool::JpgToPng),
        "converter" => Ok(Tool::Converter),
        "compressor" => Ok(Tool::Compressor),
        "resizer" => Ok(Tool::Resizer),
        other => Err(format!("unknown tool {:?}", other)),
    }
}
