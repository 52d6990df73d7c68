//! PixNivo WASM - WebAssembly bindings for the PixNivo image tools
//!
//! This crate exposes pixnivo-core to the browser. It is meant to be loaded
//! inside a Web Worker: every call is synchronous, and running it off the
//! main thread is what keeps the page responsive during multi-attempt
//! compression.
//!
//! # Module Structure
//!
//! - `tools` - Tool session, tickets, validation, convert/compress/resize
//! - `types` - WASM-compatible wrappers for results and errors
//! - `presets` - Resize and target-size presets, size formatting
//! - `logging` - Forwarding `log` output to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsToolSession } from '@pixnivo/wasm';
//!
//! await init();
//!
//! const tools = new JsToolSession(undefined);
//! const ticket = tools.select();
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const jpg = tools.pngToJpg(ticket, bytes, file.type, file.name);
//! const blob = new Blob([jpg.bytes()], { type: jpg.mimeType });
//! ```

use wasm_bindgen::prelude::*;

mod logging;
mod presets;
mod tools;
mod types;

pub use logging::init_logging;
pub use presets::{
    format_file_size, plan_resize, resize_presets, savings_percent, target_size_presets,
};
pub use tools::{validate_file, JsTicket, JsToolSession};
pub use types::{JsCompressResult, JsEncodedResult};

/// Initialize the WASM module (called automatically on load).
///
/// Warnings from the core (missed size targets, discarded stale results)
/// go to the console from the start; call `init_logging` for more.
#[wasm_bindgen(start)]
pub fn init() {
    logging::install(log::LevelFilter::Warn);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
