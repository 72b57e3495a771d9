/// Single-shot notifier run
///
/// One invocation performs, strictly in order:
/// 1. GET the JMA precipitation table
/// 2. Decode Shift_JIS and find the configured station's row
/// 3. Reject stale data and classify the amount
/// 4. Print the message and POST it to the webhook
///
/// Any failure in steps 1-3 ends the run with two lines on stderr and no
/// POST. Delivery is fire-and-forget: its outcome is kept in `RunOutcome`
/// for callers that care, but never turned into an error.

use crate::alert;
use crate::config::NotifierConfig;
use crate::ingest::jma;
use crate::model::{DeliveryError, PipelineError};
use crate::notify::webhook;
use chrono::{DateTime, TimeZone, Utc};

/// Result of one run.
#[derive(Debug)]
pub enum RunOutcome {
    /// Fetching, parsing or evaluating failed; nothing was sent.
    Aborted(PipelineError),
    /// The reading was fresh but below the lowest tier.
    NothingToReport,
    /// A message was produced and delivery was attempted.
    Notified {
        message: String,
        delivery: Result<u16, DeliveryError>,
    },
}

/// Notifier state: immutable configuration plus a reusable HTTP client.
pub struct Notifier {
    config: NotifierConfig,
    client: reqwest::blocking::Client,
}

impl Notifier {
    /// Creates a notifier with a default blocking client.
    pub fn new(config: NotifierConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(config, client))
    }

    /// Creates a notifier around an existing client.
    pub fn with_client(config: NotifierConfig, client: reqwest::blocking::Client) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &NotifierConfig {
        &self.config
    }

    /// Entry point for the external trigger.
    pub fn run(&self) {
        self.run_at(Utc::now());
    }

    /// Runs the pipeline against an explicit clock.
    pub fn run_at<Tz: TimeZone>(&self, now: DateTime<Tz>) -> RunOutcome {
        let message = match self.fetch_message(&now) {
            Ok(Some(message)) => message,
            Ok(None) => {
                tracing::info!("nothing to inform");
                return RunOutcome::NothingToReport;
            }
            Err(e) => {
                tracing::error!("an error has occurred when fetching precipitation data");
                tracing::error!("{}", e);
                return RunOutcome::Aborted(e);
            }
        };

        println!("{}", message);

        let delivery = webhook::deliver(&self.client, &message, &self.config.webhook_url);

        match &delivery {
            Ok(status) => tracing::debug!(status, "webhook accepted message"),
            Err(DeliveryError::Json(e)) => {
                tracing::error!("an error has occurred when creating json body");
                tracing::error!("{}", e);
            }
            Err(e) => tracing::debug!(error = %e, "webhook delivery failed"),
        }

        RunOutcome::Notified { message, delivery }
    }

    /// Fetch, decode, parse and evaluate. `Ok(None)`: nothing to report.
    pub fn fetch_message<Tz: TimeZone>(
        &self,
        now: &DateTime<Tz>,
    ) -> Result<Option<String>, PipelineError> {
        let bytes = jma::fetch_feed(&self.client, &self.config.feed_url)?;
        let text = jma::decode_feed(&bytes);
        let reading = jma::parse_feed(&text, &self.config.station_id)?;
        let message = alert::evaluate(reading.as_ref(), now, &self.config.evaluation_policy())?;
        Ok(message)
    }
}
