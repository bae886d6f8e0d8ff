//! Per-order fulfillment durations.

use std::time::Instant;

use tracing::{Instrument, debug};

use super::TraceEngine;
use super::duration::{first_occurrence_minutes, last_occurrence_minutes};
use crate::error::Result;
use crate::model::{OrderEfficiency, OrderStatus};
use crate::store::TraceStore;
use crate::telemetry::analytics::{finish_query, record_discarded, start_query_span};

impl<S: TraceStore + ?Sized> TraceEngine<S> {
    /// Duration report over every DELIVERED trace, sorted by order id.
    ///
    /// Each delivery is measured from its order's first PENDING trace, so an
    /// order delivered twice shows up twice. Deliveries without a usable
    /// span are left out. Issues one history lookup per delivery.
    pub async fn all_orders_efficiency(&self) -> Result<Vec<OrderEfficiency>> {
        const OPERATION: &str = "all_orders_efficiency";
        let span = start_query_span(OPERATION);
        let started = Instant::now();

        async {
            let traces = self.store.find_all().await?;

            let mut report = Vec::new();
            let mut discarded = 0;
            for delivered in traces
                .iter()
                .filter(|t| t.new_status == OrderStatus::Delivered)
            {
                let history = self.store.find_by_order_id(delivered.order_id).await?;
                match first_occurrence_minutes(&history, delivered) {
                    Some(minutes) => report.push(OrderEfficiency {
                        order_id: delivered.order_id,
                        duration_in_minutes: Some(minutes),
                    }),
                    None => {
                        debug!(
                            order_id = delivered.order_id,
                            trace_id = delivered.id,
                            "delivery without resolvable duration"
                        );
                        discarded += 1;
                    }
                }
            }

            report.sort_by_key(|e| e.order_id);

            record_discarded(OPERATION, discarded);
            finish_query(&span, OPERATION, started, report.len());
            Ok(report)
        }
        .instrument(span.clone())
        .await
    }

    /// Duration of one order, from its last PENDING to its last DELIVERED.
    ///
    /// Always answers: an unknown order or an incomplete history yields
    /// `duration_in_minutes: None`.
    pub async fn order_efficiency(&self, order_id: i64) -> Result<OrderEfficiency> {
        const OPERATION: &str = "order_efficiency";
        let span = start_query_span(OPERATION);
        let started = Instant::now();

        async {
            let history = self.store.find_by_order_id(order_id).await?;
            let duration_in_minutes = last_occurrence_minutes(&history);
            if duration_in_minutes.is_none() {
                debug!(order_id, traces = history.len(), "order duration unavailable");
            }

            finish_query(&span, OPERATION, started, usize::from(duration_in_minutes.is_some()));
            Ok(OrderEfficiency {
                order_id,
                duration_in_minutes,
            })
        }
        .instrument(span.clone())
        .await
    }
}
