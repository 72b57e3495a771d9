/// Process-wide logging setup.
///
/// Diagnostics go to stderr through `tracing`; stdout is reserved for the
/// notification text itself. The level defaults to `info` and can be
/// changed with `RUST_LOG` (e.g. `RUST_LOG=rain_notifier=debug` to see
/// webhook delivery outcomes).

use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_FILTER: &str = "info";

/// Installs the global subscriber.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
