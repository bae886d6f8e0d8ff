//! Metric instrument factories.
//!
//! Uses the OTel Meter API with the globally-registered `MeterProvider`.
//! Without a configured provider the instruments are no-ops.

use opentelemetry::metrics::{Counter, Histogram, Meter};

fn meter() -> Meter {
    opentelemetry::global::meter("order-traces")
}

/// Counter: traces recorded.
/// Labels: `status`.
pub fn traces_recorded() -> Counter<u64> {
    meter()
        .u64_counter("traces.recorded")
        .with_description("Number of order traces recorded")
        .build()
}

/// Counter: queries issued against the trace store.
/// Labels: `query`.
pub fn store_queries() -> Counter<u64> {
    meter()
        .u64_counter("traces.store.queries")
        .with_description("Number of trace store queries")
        .build()
}

/// Counter: analytics operations served.
/// Labels: `operation`.
pub fn analytics_queries() -> Counter<u64> {
    meter()
        .u64_counter("traces.analytics.queries")
        .with_description("Number of efficiency queries")
        .build()
}

/// Counter: completions dropped because no duration could be resolved.
/// Labels: `operation`.
pub fn durations_discarded() -> Counter<u64> {
    meter()
        .u64_counter("traces.analytics.discarded")
        .with_description("Completion events without a resolvable duration")
        .build()
}

/// Histogram: operation duration in milliseconds.
/// Labels: `operation`.
pub fn operation_duration_ms() -> Histogram<f64> {
    meter()
        .f64_histogram("traces.operation.duration_ms")
        .with_description("Operation duration in milliseconds")
        .with_unit("ms")
        .build()
}
