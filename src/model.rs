/// Core data types for the rain notifier.
///
/// This module defines the one domain entity (`Reading`) and the error
/// types shared by every pipeline stage. It contains no I/O.

use chrono::{DateTime, FixedOffset, TimeZone};

// ---------------------------------------------------------------------------
// Time zone
// ---------------------------------------------------------------------------

/// JMA timestamps are published in Japan Standard Time (UTC+9, no DST).
pub const JST_OFFSET_SECONDS: i32 = 9 * 3600;

/// The fixed +09:00 offset used for every `Reading`.
///
/// `None` only if the offset constant is out of chrono's ±24h range.
pub fn jst() -> Option<FixedOffset> {
    FixedOffset::east_opt(JST_OFFSET_SECONDS)
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// The most recent one-hour precipitation total for a station.
///
/// Fields are private: a `Reading` only comes into existence through
/// `Reading::new` or `Reading::from_parts`, both of which validate every
/// field, so there is no partially-populated state.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    timestamp: DateTime<FixedOffset>,
    amount_mm: f64,
}

impl Reading {
    /// Builds a reading from an already-constructed timestamp.
    ///
    /// # Errors
    /// `ParseError::InvalidAmount` if `amount_mm` is NaN, infinite or carries
    /// a minus sign (including `-0.0`).
    pub fn new(timestamp: DateTime<FixedOffset>, amount_mm: f64) -> Result<Self, ParseError> {
        if !amount_mm.is_finite() || amount_mm.is_sign_negative() {
            return Err(ParseError::InvalidAmount(amount_mm.to_string()));
        }
        Ok(Self { timestamp, amount_mm })
    }

    /// Builds a reading from calendar fields interpreted as JST.
    pub fn from_parts(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        amount_mm: f64,
    ) -> Result<Self, ParseError> {
        let timestamp = jst()
            .and_then(|tz| tz.with_ymd_and_hms(year, month, day, hour, minute, 0).single())
            .ok_or_else(|| {
                ParseError::InvalidTimestamp(format!(
                    "{}-{}-{} {}:{}",
                    year, month, day, hour, minute
                ))
            })?;
        Self::new(timestamp, amount_mm)
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn amount_mm(&self) -> f64 {
        self.amount_mm
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// The feed could not be retrieved.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// DNS failure, refused connection, or a body that could not be read.
    #[error("feed request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// The matched feed row (or the header) is malformed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// The header no longer matches the expected column layout.
    #[error("feed header mismatch at column {index}: expected '{expected}', found '{found}'")]
    SchemaMismatch {
        index: usize,
        expected: &'static str,
        found: String,
    },
    /// The matched row has fewer columns than the schema requires.
    #[error("feed row is missing column {index} ({name})")]
    MissingField { index: usize, name: &'static str },
    /// Year/month/day/hour/minute do not form a valid point in time.
    #[error("invalid observation time: {0}")]
    InvalidTimestamp(String),
    /// The precipitation field is not a non-negative number.
    #[error("invalid precipitation amount: '{0}'")]
    InvalidAmount(String),
}

/// A parsed reading cannot be acted on.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvalError {
    /// The feed contained no row for the configured station.
    #[error("指定の降水量データが見つかりませんでした")]
    NoMatchingStation,
    /// The newest reading is older than the freshness window.
    #[error("指定の間隔より古いデータが見つかりました ({age_minutes} minutes old)")]
    StaleData { age_minutes: i64 },
}

/// The webhook POST did not go through.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// The JSON envelope could not be serialized.
    #[error("failed to build webhook body: {0}")]
    Json(#[from] serde_json::Error),
    /// Network failure or an unusable webhook URL.
    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The webhook answered with a non-2xx status.
    #[error("webhook rejected the message: HTTP {status}")]
    Rejected { status: u16 },
}

/// Any failure between fetching the feed and producing a message.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
