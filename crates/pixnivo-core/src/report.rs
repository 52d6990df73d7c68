//! Human-readable sizes and before/after comparisons.

const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
const KIB: f64 = 1024.0;

/// Format a byte count with base-1024 units and at most two decimals.
///
/// `0` becomes `"0 Bytes"`, `1536` becomes `"1.5 KB"`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut scaled = bytes as f64;
    let mut unit = 0;
    while scaled >= KIB && unit < UNITS.len() - 1 {
        scaled /= KIB;
        unit += 1;
    }
    format!("{} {}", trim_decimals(scaled), UNITS[unit])
}

/// Format a byte count as whole-or-fractional megabytes, e.g. `"10MB"`.
pub fn format_megabytes(bytes: u64) -> String {
    format!("{}MB", trim_decimals(bytes as f64 / (KIB * KIB)))
}

/// Convert a megabyte preset (0.5, 1, 2, 5) to bytes.
pub fn megabytes_to_bytes(megabytes: f64) -> u64 {
    if !megabytes.is_finite() || megabytes <= 0.0 {
        return 0;
    }
    (megabytes * KIB * KIB).round() as u64
}

/// Percentage saved by going from `original` to `processed` bytes.
///
/// Negative when the output grew. `None` if either size is zero.
pub fn savings_percent(original: u64, processed: u64) -> Option<f64> {
    if original == 0 || processed == 0 {
        return None;
    }
    Some((1.0 - processed as f64 / original as f64) * 100.0)
}

fn trim_decimals(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}
