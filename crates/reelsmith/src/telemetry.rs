//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initializes console tracing with an env-filter.
///
/// `RUST_LOG` overrides the default of `info` globally with `debug` for
/// the reelsmith crates. Calling this twice panics, so binaries call it
/// once at startup.
pub fn init_telemetry() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,reelsmith=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
