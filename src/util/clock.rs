//! Wall-clock helpers.

use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch. Returns 0 if the system clock is set
/// before the epoch.
#[must_use]
pub fn now_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

/// Format an epoch-milliseconds timestamp as `HH:MM:SS` (UTC).
#[must_use]
pub fn format_clock(ms: u128) -> String {
    let secs_of_day = (ms / 1000) % 86_400;
    let hours = secs_of_day / 3600;
    let minutes = (secs_of_day % 3600) / 60;
    let seconds = secs_of_day % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
