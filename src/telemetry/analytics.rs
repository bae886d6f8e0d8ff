//! Span helpers for analytics queries.

use opentelemetry::KeyValue;
use std::time::Instant;
use tracing::Span;

use super::metrics;

/// Start a span for one engine operation.
///
/// `analytics.results` is declared empty and filled by [`finish_query`].
pub fn start_query_span(operation: &'static str) -> Span {
    tracing::info_span!(
        "analytics.query",
        "analytics.operation" = operation,
        "analytics.results" = tracing::field::Empty,
    )
}

/// Record the result size on the span and the operation's metrics.
pub fn finish_query(span: &Span, operation: &'static str, started: Instant, results: usize) {
    span.record("analytics.results", results as u64);
    let labels = [KeyValue::new("operation", operation)];
    metrics::analytics_queries().add(1, &labels);
    metrics::operation_duration_ms().record(started.elapsed().as_secs_f64() * 1000.0, &labels);
}

/// Count completion events that produced no usable duration.
pub fn record_discarded(operation: &'static str, count: usize) {
    if count > 0 {
        metrics::durations_discarded()
            .add(count as u64, &[KeyValue::new("operation", operation)]);
    }
}
