//! # Logging Setup
//!
//! One-shot tracing initialization for binaries and integration tests.
//!
//! Filtering follows `RUST_LOG` when set; otherwise everything at `info`
//! and above is emitted. Library crates only *emit* tracing events; this
//! is the single place a subscriber gets installed.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Installs the global tracing subscriber. Idempotent: later calls are
/// no-ops, so tests can all call it without fighting over the global.
pub fn init() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    });
}
