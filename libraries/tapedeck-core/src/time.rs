//! Clock formatting for elapsed/total labels

use std::time::Duration;

/// Format a duration as `m:ss`
///
/// Seconds are zero-padded, minutes are not bounded (an hour-long track is
/// `60:00`). Sub-second remainders are truncated.
pub fn format_clock(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    format!("{}:{:02}", minutes, seconds)
}
