//! Tracing setup for hosts embedding `telemetry-chart`.
//!
//! The chart only emits `tracing` events (dropped samples, zoom and eviction).
//! Installing a subscriber stays the host's decision; this helper exists for
//! demos and tests that just want log output.

/// Installs a compact `tracing` fmt subscriber filtered by `RUST_LOG`
/// (defaulting to `info`) when the `telemetry` feature is enabled.
///
/// Returns `false` when the feature is disabled or another global subscriber
/// is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
