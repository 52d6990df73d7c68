//! Presets and display helpers for the tool pages.

use pixnivo_core::config::{RESIZE_PRESETS, TARGET_SIZE_PRESETS_MB};
use pixnivo_core::{plan_fit, report, ScaleMode};
use wasm_bindgen::prelude::*;

use crate::types::bytes_from_js;

/// Named resize boxes: `[{ name, width, height }, ...]`.
#[wasm_bindgen(js_name = resizePresets)]
pub fn resize_presets() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&RESIZE_PRESETS[..])
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Compression targets offered by the page, in megabytes.
#[wasm_bindgen(js_name = targetSizePresets)]
pub fn target_size_presets() -> Vec<f64> {
    TARGET_SIZE_PRESETS_MB.to_vec()
}

/// "0 Bytes", "1.5 KB", "2 MB", ...
#[wasm_bindgen(js_name = formatFileSize)]
pub fn format_file_size(bytes: f64) -> String {
    report::format_file_size(bytes_from_js(bytes))
}

/// Percent saved; `undefined` when either size is zero.
#[wasm_bindgen(js_name = savingsPercent)]
pub fn savings_percent(original_bytes: f64, processed_bytes: f64) -> Option<f64> {
    report::savings_percent(bytes_from_js(original_bytes), bytes_from_js(processed_bytes))
}

/// Output dimensions the resizer would produce, as `[width, height]`.
///
/// Lets the page preview the result before any pixels are touched.
#[wasm_bindgen(js_name = planResize)]
pub fn plan_resize(
    width: u32,
    height: u32,
    max_width: u32,
    max_height: u32,
    allow_upscale: bool,
) -> Result<Vec<u32>, JsValue> {
    let mode = if allow_upscale {
        ScaleMode::Fit
    } else {
        ScaleMode::ShrinkOnly
    };
    plan_dimensions(width, height, max_width, max_height, mode)
        .map_err(|e| JsValue::from_str(&e))
}

fn plan_dimensions(
    width: u32,
    height: u32,
    max_width: u32,
    max_height: u32,
    mode: ScaleMode,
) -> Result<Vec<u32>, String> {
    plan_fit(width, height, max_width, max_height, mode)
        .map(|(w, h)| vec![w, h])
        .map_err(|e| e.to_string())
}
