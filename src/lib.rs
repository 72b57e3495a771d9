/// rain_notifier: JMA hourly precipitation → chat webhook notifier.
///
/// # Module structure
///
/// ```text
/// rain_notifier
/// ├── model       — Reading + error types (FetchError, ParseError, EvalError, …)
/// ├── config      — NotifierConfig loader (rain_notifier.toml + SLACK_API_KEY)
/// ├── logging     — tracing subscriber setup (stderr)
/// ├── notifier    — single-shot pipeline run (fetch → evaluate → deliver)
/// ├── ingest
/// │   ├── jma     — JMA CSV feed: fetch, Shift_JIS decode, row parsing
/// │   └── fixtures (test only) — representative feed rows
/// ├── alert
/// │   ├── thresholds — amount → severity tier
/// │   └── staleness  — reading freshness window
/// └── notify
///     └── webhook    — JSON envelope + POST
/// ```

/// Public modules
pub mod alert;
pub mod config;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod notifier;
pub mod notify;
