//! Tracing bootstrap for menukit binaries.
//!
//! JSON output with an `EnvFilter` read from `RUST_LOG`, falling back to
//! `info` so menu mutations, reconciliations, and cache invalidations are
//! logged out of the box.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. Call once at startup, before the first
/// menu operation runs.
pub fn init_telemetry() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().json())
        .init();
}
