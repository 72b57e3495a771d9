//! Rain Notifier - single run
//!
//! Checks the latest JMA one-hour precipitation for Kyoto and posts a
//! message to a Slack webhook when it is raining hard enough to mention.
//! Meant to be triggered every 10 minutes by an external scheduler
//! (cron, systemd timer, a serverless timer, ...); each run is independent.
//!
//! Usage:
//!   cargo run --release
//!
//! Environment:
//!   SLACK_API_KEY        - webhook URL (also read from .env)
//!   RAIN_NOTIFIER_CONFIG - optional path to a TOML override file
//!   RUST_LOG             - log filter (default: info)

use rain_notifier::config::NotifierConfig;
use rain_notifier::logging;
use rain_notifier::notifier::Notifier;

fn main() {
    logging::init_logging();

    let config = match NotifierConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let notifier = match Notifier::new(config) {
        Ok(notifier) => notifier,
        Err(e) => {
            tracing::error!("failed to create HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    notifier.run();
}
