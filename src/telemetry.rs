//! Tracing setup for hosts embedding `chart-composer`.
//!
//! The editor only emits `tracing` events; installing a subscriber is left to
//! the host. With the `telemetry` feature enabled, `init_default_tracing` wires
//! a compact formatter filtered by `RUST_LOG` (or the given fallback directive).

/// Default directive used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "chart_composer=info";

/// Installs a global subscriber filtered by `RUST_LOG`, else [`DEFAULT_FILTER`].
///
/// Returns `false` when the feature is disabled or a global subscriber was
/// already set by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_fallback(DEFAULT_FILTER)
}

/// Same as [`init_default_tracing`] with a caller-chosen fallback directive,
/// e.g. `"chart_composer=debug"` to trace every dataset and transition change.
#[must_use]
pub fn init_tracing_with_fallback(fallback_directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_directive));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_directive;
        false
    }
}
