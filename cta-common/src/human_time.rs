//! Human-readable durations
//!
//! Track durations are stored as independent minute and second fields.
//! Seconds are not normalised at the model level, so `format_duration`
//! prints whatever it is given.

use crate::catalog::document::CassetteSide;

/// Format a stored track duration as `M:SS`
///
/// # Examples
///
/// ```
/// use cta_common::human_time::format_duration;
///
/// assert_eq!(format_duration(2, 48), "2:48");
/// assert_eq!(format_duration(3, 8), "3:08");
/// assert_eq!(format_duration(0, 75), "0:75");
/// ```
pub fn format_duration(minutes: i64, seconds: i64) -> String {
    format!("{}:{:02}", minutes, seconds)
}

/// Format a whole number of seconds as `M:SS`
///
/// Minutes are not rolled into hours: a 70 minute side reads `70:00`.
pub fn format_seconds(total: i64) -> String {
    let total = total.max(0);
    format_duration(total / 60, total % 60)
}

/// Format a playback position as `M:SS`, flooring fractional seconds
///
/// Non-finite or negative positions read as `0:00`.
///
/// # Examples
///
/// ```
/// use cta_common::human_time::format_clock;
///
/// assert_eq!(format_clock(0.0), "0:00");
/// assert_eq!(format_clock(65.9), "1:05");
/// assert_eq!(format_clock(f64::NAN), "0:00");
/// ```
pub fn format_clock(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return format_seconds(0);
    }
    format_seconds(seconds.floor() as i64)
}

/// Sum of all track durations on a side, in seconds
///
/// Saturates at `i64::MAX` rather than overflowing on corrupt durations.
pub fn total_seconds(side: &CassetteSide) -> i64 {
    side.tracks()
        .map(|track| {
            track
                .duration_min
                .saturating_mul(60)
                .saturating_add(track.duration_sec)
        })
        .fold(0, i64::saturating_add)
}
