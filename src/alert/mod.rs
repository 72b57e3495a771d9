/// Turns a parsed reading into a notification message.
///
/// - `thresholds`: amount → severity tier
/// - `staleness`: freshness window check

pub mod staleness;
pub mod thresholds;

use crate::model::{EvalError, Reading};
use chrono::{DateTime, TimeZone, Timelike};
use staleness::{is_stale_at, reading_age};
use thresholds::Severity;

/// Default station name used in the message text.
pub const DEFAULT_STATION_NAME: &str = "京都";

/// Parameters for `evaluate` that come from configuration.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationPolicy<'a> {
    pub station_name: &'a str,
    pub freshness_window_minutes: i64,
}

impl Default for EvaluationPolicy<'_> {
    fn default() -> Self {
        Self {
            station_name: DEFAULT_STATION_NAME,
            freshness_window_minutes: staleness::DEFAULT_FRESHNESS_WINDOW_MINUTES,
        }
    }
}

/// Decides whether a reading is worth reporting and, if so, what to say.
///
/// Returns `Ok(None)` when the reading is fresh but below the lowest tier.
///
/// # Errors
/// - `EvalError::NoMatchingStation` if there is no reading.
/// - `EvalError::StaleData` if the reading is older than the window,
///   whatever its amount.
pub fn evaluate<Tz: TimeZone>(
    reading: Option<&Reading>,
    now: &DateTime<Tz>,
    policy: &EvaluationPolicy<'_>,
) -> Result<Option<String>, EvalError> {
    let reading = reading.ok_or(EvalError::NoMatchingStation)?;

    if is_stale_at(reading, policy.freshness_window_minutes, now) {
        return Err(EvalError::StaleData {
            age_minutes: reading_age(reading, now).num_minutes(),
        });
    }

    let Some(severity) = Severity::classify(reading.amount_mm()) else {
        return Ok(None);
    };

    tracing::debug!(
        amount_mm = reading.amount_mm(),
        severity = %severity,
        lower_bound_mm = severity.lower_bound_mm(),
        "precipitation above reporting threshold"
    );

    Ok(Some(compose_message(reading, severity, policy.station_name)))
}

/// Formats the notification text, e.g.
/// `12:30〜の京都の一時間降水量は55.0mmです\n非常に激しい雨が降ります`.
pub fn compose_message(reading: &Reading, severity: Severity, station_name: &str) -> String {
    let observed = reading.timestamp();
    format!(
        "{:02}:{:02}〜の{}の一時間降水量は{:.1}mmです\n{}",
        observed.hour(),
        observed.minute(),
        station_name,
        reading.amount_mm(),
        severity.label()
    )
}
