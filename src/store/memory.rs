use crate::error::Result;
use crate::model::{NewOrderTrace, OrderTrace};
use crate::store::TraceStore;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory trace store (for tests and embedded use).
///
/// Ids start at 1 and increase with every save.
#[derive(Clone, Default)]
pub struct InMemoryTraceStore {
    traces: Arc<RwLock<Vec<OrderTrace>>>,
}

impl InMemoryTraceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored traces.
    pub async fn len(&self) -> usize {
        self.traces.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.traces.read().await.is_empty()
    }
}

#[async_trait]
impl TraceStore for InMemoryTraceStore {
    async fn find_all(&self) -> Result<Vec<OrderTrace>> {
        Ok(self.traces.read().await.clone())
    }

    async fn find_by_order_id(&self, order_id: i64) -> Result<Vec<OrderTrace>> {
        let mut traces: Vec<OrderTrace> = self
            .traces
            .read()
            .await
            .iter()
            .filter(|t| t.order_id == order_id)
            .cloned()
            .collect();

        // Stable: equal timestamps keep insertion order
        traces.sort_by_key(|t| t.timestamp);
        Ok(traces)
    }

    async fn find_by_employee_id(&self, employee_id: i64) -> Result<Vec<OrderTrace>> {
        Ok(self
            .traces
            .read()
            .await
            .iter()
            .filter(|t| t.employee_id == Some(employee_id))
            .cloned()
            .collect())
    }

    async fn save(&self, trace: NewOrderTrace) -> Result<OrderTrace> {
        let mut traces = self.traces.write().await;
        let id = traces.len() as i64 + 1;
        let stored = trace.into_trace(id, Utc::now());
        traces.push(stored.clone());

        tracing::debug!(trace_id = stored.id, order_id = stored.order_id, "trace saved");
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OrderStatus;
    use chrono::{DateTime, Duration};

    fn base() -> DateTime<Utc> {
        "2026-03-01T10:00:00Z".parse().unwrap()
    }

    #[tokio::test]
    async fn save_assigns_increasing_ids() {
        let store = InMemoryTraceStore::new();
        let a = store
            .save(NewOrderTrace::new(1, 9, "c@shop.test", OrderStatus::Pending))
            .await
            .unwrap();
        let b = store
            .save(NewOrderTrace::new(2, 9, "c@shop.test", OrderStatus::Pending))
            .await
            .unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn order_history_is_sorted_by_timestamp() {
        let store = InMemoryTraceStore::new();
        store
            .save(
                NewOrderTrace::new(1, 9, "c@shop.test", OrderStatus::Delivered)
                    .at(base() + Duration::minutes(30)),
            )
            .await
            .unwrap();
        store
            .save(NewOrderTrace::new(1, 9, "c@shop.test", OrderStatus::Pending).at(base()))
            .await
            .unwrap();
        store
            .save(NewOrderTrace::new(2, 9, "c@shop.test", OrderStatus::Pending).at(base()))
            .await
            .unwrap();

        let history = store.find_by_order_id(1).await.unwrap();
        let statuses: Vec<_> = history.iter().map(|t| t.new_status).collect();
        assert_eq!(statuses, vec![OrderStatus::Pending, OrderStatus::Delivered]);
    }

    #[tokio::test]
    async fn employee_lookup_skips_unattributed_traces() {
        let store = InMemoryTraceStore::new();
        store
            .save(NewOrderTrace::new(1, 9, "c@shop.test", OrderStatus::Pending))
            .await
            .unwrap();
        store
            .save(
                NewOrderTrace::new(1, 9, "c@shop.test", OrderStatus::Ready)
                    .employee(200, "cook@shop.test"),
            )
            .await
            .unwrap();

        let traces = store.find_by_employee_id(200).await.unwrap();
        assert_eq!(traces.len(), 1);
        assert_eq!(traces[0].new_status, OrderStatus::Ready);
    }
}
