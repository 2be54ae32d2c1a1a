//! Tracing subscriber setup for the `tca` binary
//!
//! Logs go to stderr; stdout carries verdicts only.

use tracing_subscriber::EnvFilter;

/// Filter from `RUST_LOG`, else `default_filter`, else `warn`
#[must_use]
pub fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber
///
/// Returns `false` when a subscriber was already installed.
pub fn init(default_filter: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_filter))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}
