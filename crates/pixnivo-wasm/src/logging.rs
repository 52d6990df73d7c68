//! Forwarding `log` records to the browser console.
//!
//! The core logs through the `log` facade. This module installs a logger
//! that writes each record to the matching `console` method, so encode
//! attempts and size-target misses show up in the worker's devtools.

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::prelude::*;

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format_record(record));
        match record.level() {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::info_1(&line),
            Level::Debug => web_sys::console::log_1(&line),
            Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

fn format_record(record: &Record) -> String {
    format!("[{}] {}: {}", record.level(), record.target(), record.args())
}

/// Parse a level name ("off", "error", "warn", "info", "debug", "trace").
pub(crate) fn parse_level(level: &str) -> Result<LevelFilter, String> {
    level
        .trim()
        .parse::<LevelFilter>()
        .map_err(|_| format!("unknown log level {:?}", level))
}

/// Install the console logger (once) and set the max level.
pub(crate) fn install(level: LevelFilter) {
    // A second install only changes the level.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

/// Route core logging to the browser console at the given level.
///
/// # Example
///
/// ```typescript
/// import { init_logging } from '@pixnivo/wasm';
///
/// init_logging('debug'); // log every size-targeting attempt
/// ```
#[wasm_bindgen]
pub fn init_logging(level: &str) -> Result<(), JsValue> {
    let level = parse_level(level).map_err(|e| JsValue::from_str(&e))?;
    install(level);
    Ok(())
}
