//! Time formatting helpers for log output.

use civitas_types::Timestamp;

/// Format a duration in seconds to a human-readable string.
pub fn format_duration(secs: u64) -> String {
    match secs {
        0..=59 => format!("{secs}s"),
        60..=3_599 => format!("{}m {}s", secs / 60, secs % 60),
        3_600..=86_399 => format!("{}h {}m", secs / 3_600, (secs % 3_600) / 60),
        _ => format!("{}d {}h", secs / 86_400, (secs % 86_400) / 3_600),
    }
}

/// Describe a `[start, end]` window, e.g. `"120s..420s (5m 0s)"`.
pub fn format_window(start: Timestamp, end: Timestamp) -> String {
    format!("{start}..{end} ({})", format_duration(start.until(end)))
}
