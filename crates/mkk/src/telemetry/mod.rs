//! Tracing subscriber initialisation.
//!
//! Stdout is the tool's output channel: exactly one rendered line that callers
//! paste into headers or pipe into scripts. Structured JSON logs therefore go
//! to stderr. Key text must never appear in a log field.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Install the JSON-on-stderr subscriber.
///
/// `RUST_LOG` takes precedence over `log_level` (from `--log-level` or
/// `MKK_LOG_LEVEL`) when set.
///
/// # Errors
///
/// Returns an error if the subscriber has already been set.
pub fn init(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .json()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise tracing subscriber: {e}"))
}
