/// Notifier configuration loader - parses rain_notifier.toml + environment
///
/// Feed location, station and freshness window have built-in defaults and
/// may be overridden from a TOML file without recompiling. The webhook URL
/// is a secret and only ever comes from the environment (or `.env`).
///
/// Configuration is loaded once in `main` and passed to `Notifier`
/// explicitly; nothing else reads the environment.

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::alert::staleness::DEFAULT_FRESHNESS_WINDOW_MINUTES;
use crate::alert::{DEFAULT_STATION_NAME, EvaluationPolicy};
use crate::ingest::jma::JMA_PRE1H_URL;

/// Environment variable holding the webhook URL.
pub const WEBHOOK_URL_ENV: &str = "SLACK_API_KEY";

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "RAIN_NOTIFIER_CONFIG";

/// Configuration file picked up from the working directory if present.
pub const DEFAULT_CONFIG_FILE: &str = "rain_notifier.toml";

/// Kyoto AMeDAS station.
pub const DEFAULT_STATION_ID: &str = "61286";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Everything a single notifier run needs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotifierConfig {
    /// Never read from TOML; populated from `SLACK_API_KEY`.
    #[serde(skip)]
    pub webhook_url: String,
    pub feed_url: String,
    pub station_id: String,
    pub station_name: String,
    pub freshness_window_minutes: i64,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            feed_url: JMA_PRE1H_URL.to_string(),
            station_id: DEFAULT_STATION_ID.to_string(),
            station_name: DEFAULT_STATION_NAME.to_string(),
            freshness_window_minutes: DEFAULT_FRESHNESS_WINDOW_MINUTES,
        }
    }
}

impl NotifierConfig {
    /// Parses TOML overrides on top of the defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: NotifierConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads TOML overrides from a file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Loads configuration for a production run.
    ///
    /// Order:
    /// 1. `.env` in the working directory, if any
    /// 2. the file named by `RAIN_NOTIFIER_CONFIG` (must exist), else
    ///    `rain_notifier.toml` if present, else built-in defaults
    /// 3. `SLACK_API_KEY` for the webhook URL
    ///
    /// A missing webhook URL is not an error: delivery to an empty URL
    /// fails quietly at run time.
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let mut config = match env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        config.webhook_url = env::var(WEBHOOK_URL_ENV).unwrap_or_default();
        if config.webhook_url.is_empty() {
            tracing::warn!("{} is not set; notifications will not be delivered", WEBHOOK_URL_ENV);
        }

        Ok(config)
    }

    /// Replaces the webhook URL.
    pub fn with_webhook_url(mut self, url: impl Into<String>) -> Self {
        self.webhook_url = url.into();
        self
    }

    /// Evaluation parameters borrowed from this configuration.
    pub fn evaluation_policy(&self) -> EvaluationPolicy<'_> {
        EvaluationPolicy {
            station_name: &self.station_name,
            freshness_window_minutes: self.freshness_window_minutes,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.freshness_window_minutes <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "freshness_window_minutes",
                reason: format!("must be positive, got {}", self.freshness_window_minutes),
            });
        }
        if self.station_id.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "station_id",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_kyoto_feed() {
        let config = NotifierConfig::default();
        assert_eq!(config.station_id, "61286");
        assert_eq!(config.station_name, "京都");
        assert_eq!(config.freshness_window_minutes, 40);
        assert!(config.feed_url.ends_with("pre1h00_rct.csv"));
        assert!(config.webhook_url.is_empty());
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = NotifierConfig::from_toml_str("").unwrap();
        assert_eq!(config, NotifierConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = NotifierConfig::from_toml_str(
            r#"
            station_id = "62078"
            station_name = "大阪"
            "#,
        )
        .unwrap();
        assert_eq!(config.station_id, "62078");
        assert_eq!(config.station_name, "大阪");
        assert_eq!(config.freshness_window_minutes, 40);
        assert_eq!(config.feed_url, JMA_PRE1H_URL);
    }

    #[test]
    fn test_webhook_url_is_not_read_from_toml() {
        let result = NotifierConfig::from_toml_str(r#"webhook_url = "https://example.invalid""#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_non_positive_window_rejected() {
        let result = NotifierConfig::from_toml_str("freshness_window_minutes = 0");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { field: "freshness_window_minutes", .. })
        ));
    }

    #[test]
    fn test_empty_station_id_rejected() {
        let result = NotifierConfig::from_toml_str(r#"station_id = "  ""#);
        assert!(matches!(result, Err(ConfigError::InvalidValue { field: "station_id", .. })));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let result = NotifierConfig::from_file(Path::new("does/not/exist.toml"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_shipped_config_file_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_CONFIG_FILE);
        let config = NotifierConfig::from_file(&path).expect("rain_notifier.toml should parse");
        assert_eq!(config.station_id, DEFAULT_STATION_ID);
    }

    #[test]
    fn test_evaluation_policy_borrows_config() {
        let config = NotifierConfig::default().with_webhook_url("http://localhost/hook");
        let policy = config.evaluation_policy();
        assert_eq!(policy.station_name, "京都");
        assert_eq!(policy.freshness_window_minutes, 40);
        assert_eq!(config.webhook_url, "http://localhost/hook");
    }
}
