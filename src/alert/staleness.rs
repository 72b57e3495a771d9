/// Reading freshness checks.
///
/// JMA publishes each 10-minute observation roughly 30 minutes after the
/// fact and the notifier is triggered every 10 minutes, so a 40-minute
/// window admits only the newest completed observation.
///
/// # Clock injection
/// Functions take `now` explicitly instead of calling `Utc::now()`, which
/// keeps the tests deterministic.

use crate::model::Reading;
use chrono::{DateTime, Duration, TimeZone};

/// Default freshness window in minutes.
pub const DEFAULT_FRESHNESS_WINDOW_MINUTES: i64 = 40;

/// Time elapsed between the observation and `now`.
///
/// Negative if the reading is stamped in the future (clock skew).
pub fn reading_age<Tz: TimeZone>(reading: &Reading, now: &DateTime<Tz>) -> Duration {
    now.fixed_offset() - reading.timestamp()
}

/// Returns `true` if the reading is older than `max_age_minutes`.
///
/// Staleness is strictly greater than the window:
///   age > window  →  stale
///   age == window →  not stale
pub fn is_stale_at<Tz: TimeZone>(reading: &Reading, max_age_minutes: i64, now: &DateTime<Tz>) -> bool {
    reading_age(reading, now) > Duration::minutes(max_age_minutes)
}
