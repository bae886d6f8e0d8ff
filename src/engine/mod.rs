//! Trace analytics engine.
//!
//! Records traces and turns them into order and employee efficiency
//! figures. Holds no state besides the store handle; every query reads
//! through the store and builds its result from scratch.

pub mod duration;
pub mod employees;
pub mod orders;

use crate::error::Result;
use crate::model::{NewOrderTrace, OrderTrace};
use crate::store::TraceStore;
use crate::telemetry::metrics;
use chrono::Utc;
use opentelemetry::KeyValue;
use std::sync::Arc;
use tracing::info;

/// The analytics engine over a trace store.
pub struct TraceEngine<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> Clone for TraceEngine<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: TraceStore + ?Sized> TraceEngine<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Record a status transition, stamped with the current time.
    ///
    /// Any timestamp on `trace` is overridden. The caller's value is left
    /// untouched; a stamped copy is stored.
    pub async fn create_trace(&self, trace: &NewOrderTrace) -> Result<OrderTrace> {
        let stamped = NewOrderTrace {
            timestamp: Some(Utc::now()),
            ..trace.clone()
        };

        let saved = self.store.save(stamped).await?;

        metrics::traces_recorded().add(1, &[KeyValue::new("status", saved.new_status.as_str())]);
        info!(
            trace_id = saved.id,
            order_id = saved.order_id,
            status = %saved.new_status,
            "trace recorded"
        );
        Ok(saved)
    }

    /// All traces of an order, as the store returns them.
    pub async fn order_history(&self, order_id: i64) -> Result<Vec<OrderTrace>> {
        self.store.find_by_order_id(order_id).await
    }
}
