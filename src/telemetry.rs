//! Diagnostic logging set-up.
//!
//! stdout carries the JSON response to the orchestrator, so every log line
//! is written to stderr.

use std::env;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding the log filter directive.
pub const LOG_FILTER_VAR: &str = "PRWATCH_LOG";

const DEFAULT_FILTER: &str = "info";

/// Builds the filter from `directive`, falling back to `info` when it is
/// absent or does not parse.
#[must_use]
pub fn filter_from(directive: Option<&str>) -> EnvFilter {
    directive
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber writing to stderr.
///
/// Does nothing if a subscriber is already installed.
pub fn init() {
    let directive = env::var(LOG_FILTER_VAR).ok();
    let _ignored = tracing_subscriber::registry()
        .with(filter_from(directive.as_deref()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}
