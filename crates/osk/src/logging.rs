#![forbid(unsafe_code)]

//! Diagnostic output on stderr.

use tracing_subscriber::EnvFilter;

/// Variable consulted when `RUST_LOG` is unset.
pub const LOG_ENV: &str = "OSK_LOG";

/// Filter used when neither variable is set.
#[must_use]
pub const fn default_directive(silent: bool) -> &'static str {
    if silent { "warn" } else { "info" }
}

/// Pick the filter: `RUST_LOG`, then [`LOG_ENV`], then the silent flag.
#[must_use]
pub fn filter(silent: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env(LOG_ENV))
        .unwrap_or_else(|_| EnvFilter::new(default_directive(silent)))
}

/// Install the process-wide subscriber. A second call is a no-op.
pub fn init(silent: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(silent))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
