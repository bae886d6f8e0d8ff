//! Integration tests for telemetry initialization and span helpers.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use order_traces::TraceEngine;
use order_traces::model::{NewOrderTrace, OrderStatus};
use order_traces::store::{InMemoryTraceStore, TraceStore};
use order_traces::telemetry::analytics;
use tracing::field::{Field, Visit};
use tracing::span::{Id, Record};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt as _};

#[test]
fn telemetry_initializes_without_endpoint() {
    // A global subscriber can only be set once per process, so a second
    // init in the same binary returns Err; either outcome is fine here.
    let config = order_traces::telemetry::TelemetryConfig {
        endpoint: None,
        service_name: "order-traces-test".to_string(),
        log_level: "debug".to_string(),
    };
    let guard = order_traces::telemetry::init_telemetry(config);
    if let Ok(guard) = guard {
        guard.force_flush();
    }
}

#[test]
fn query_span_records_results() {
    let span = analytics::start_query_span("order_efficiency");
    analytics::finish_query(&span, "order_efficiency", Instant::now(), 1);
    analytics::record_discarded("order_efficiency", 0);
    analytics::record_discarded("order_efficiency", 2);
}

// ---------------------------------------------------------------------------
// Result counts recorded on analytics spans
// ---------------------------------------------------------------------------

/// Collects every value recorded into `analytics.results`.
#[derive(Clone, Default)]
struct ResultCounts(Arc<Mutex<Vec<u64>>>);

impl Visit for ResultCounts {
    fn record_u64(&mut self, field: &Field, value: u64) {
        if field.name() == "analytics.results" {
            self.0.lock().unwrap().push(value);
        }
    }

    fn record_debug(&mut self, _field: &Field, _value: &dyn std::fmt::Debug) {}
}

impl<S: tracing::Subscriber> Layer<S> for ResultCounts {
    fn on_record(&self, _id: &Id, values: &Record<'_>, _ctx: Context<'_, S>) {
        values.record(&mut self.clone());
    }
}

#[tokio::test]
async fn employee_query_records_one_result() {
    let counts = ResultCounts::default();
    let subscriber = tracing_subscriber::registry().with(counts.clone());
    let _default = tracing::subscriber::set_default(subscriber);

    let store = InMemoryTraceStore::new();
    for order_id in [1, 2] {
        let base = "2026-03-01T10:00:00Z".parse::<chrono::DateTime<chrono::Utc>>().unwrap();
        store
            .save(NewOrderTrace::new(order_id, 10, "client@shop.test", OrderStatus::Pending).at(base))
            .await
            .unwrap();
        store
            .save(
                NewOrderTrace::new(order_id, 10, "client@shop.test", OrderStatus::Delivered)
                    .employee(200, "emp200@shop.test")
                    .at(base + chrono::Duration::minutes(20)),
            )
            .await
            .unwrap();
    }
    let engine = TraceEngine::new(Arc::new(store));

    let efficiency = engine.employee_efficiency(200).await.unwrap();
    assert_eq!(efficiency.processed_orders, 2);

    let ranking = engine.employees_efficiency_ranking().await.unwrap();
    assert_eq!(ranking.len(), 1);

    assert_eq!(*counts.0.lock().unwrap(), vec![1, 1]);
}
