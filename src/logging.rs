//! Tracing setup shared by both dashboard binaries.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,sales_dashboard=debug";

/// Install the global fmt subscriber. `RUST_LOG` overrides the default filter.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    // A second call (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
