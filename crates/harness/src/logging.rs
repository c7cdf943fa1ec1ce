//! Diagnostics setup. Logs go to stderr; stdout carries only frames.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::HarnessConfig;

/// Installs the global subscriber. `RUST_LOG` wins over
/// [`HarnessConfig::log_filter`]. Calling it twice is a no-op.
pub fn init_logging(config: &HarnessConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
