//! Wall-clock helpers for relative-time display.
//!
//! All provider timestamps are Unix epoch milliseconds. Functions take `now_ms`
//! explicitly so presenters stay pure; callers pass [`now_ms()`].

use std::time::{SystemTime, UNIX_EPOCH};

/// Current Unix time in milliseconds.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Whole seconds (floored) between `then_ms` and `now_ms`.
///
/// Timestamps in the future clamp to zero.
pub fn elapsed_secs(then_ms: u64, now_ms: u64) -> u64 {
    now_ms.saturating_sub(then_ms) / 1_000
}

/// Relative "time ago" label for an optional timestamp.
///
/// `None` and `0` both mean the event never happened.
pub fn format_ago(then_ms: Option<u64>, now_ms: u64) -> String {
    let then_ms = match then_ms {
        Some(ms) if ms > 0 => ms,
        _ => return "Never".to_string(),
    };

    let seconds = elapsed_secs(then_ms, now_ms);
    if seconds < 60 {
        format!("{}s ago", seconds)
    } else if seconds < 3_600 {
        format!("{}m ago", seconds / 60)
    } else {
        format!("{}h ago", seconds / 3_600)
    }
}

/// Slot number with thousands separators (e.g. `1,234,567`).
pub fn format_slot(slot: u64) -> String {
    let digits = slot.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Optional slot, rendered as `N/A` when the node has not reported one.
pub fn format_optional_slot(slot: Option<u64>) -> String {
    slot.map(format_slot).unwrap_or_else(|| "N/A".to_string())
}
