//! Order trace persistence: append and the three lookups the engine needs.

use crate::error::Result;
use crate::model::{NewOrderTrace, OrderTrace};
use crate::store::TraceStore;
use crate::telemetry::metrics;
use async_trait::async_trait;
use opentelemetry::KeyValue;

const TRACE_COLUMNS: &str = "id, order_id, client_id, client_email, previous_status, new_status, employee_id, employee_email, timestamp";

fn count_query(query: &'static str) {
    metrics::store_queries().add(1, &[KeyValue::new("query", query)]);
}

#[async_trait]
impl TraceStore for super::Db {
    async fn find_all(&self) -> Result<Vec<OrderTrace>> {
        let rows: Vec<OrderTraceRow> =
            sqlx::query_as(&format!("SELECT {TRACE_COLUMNS} FROM order_traces ORDER BY id ASC"))
                .fetch_all(self.pool())
                .await?;
        count_query("find_all");

        rows.into_iter().map(OrderTraceRow::try_into_trace).collect()
    }

    async fn find_by_order_id(&self, order_id: i64) -> Result<Vec<OrderTrace>> {
        let rows: Vec<OrderTraceRow> = sqlx::query_as(&format!(
            "SELECT {TRACE_COLUMNS} FROM order_traces
             WHERE order_id = $1
             ORDER BY timestamp ASC, id ASC"
        ))
        .bind(order_id)
        .fetch_all(self.pool())
        .await?;
        count_query("find_by_order_id");

        rows.into_iter().map(OrderTraceRow::try_into_trace).collect()
    }

    async fn find_by_employee_id(&self, employee_id: i64) -> Result<Vec<OrderTrace>> {
        let rows: Vec<OrderTraceRow> = sqlx::query_as(&format!(
            "SELECT {TRACE_COLUMNS} FROM order_traces
             WHERE employee_id = $1
             ORDER BY id ASC"
        ))
        .bind(employee_id)
        .fetch_all(self.pool())
        .await?;
        count_query("find_by_employee_id");

        rows.into_iter().map(OrderTraceRow::try_into_trace).collect()
    }

    async fn save(&self, trace: NewOrderTrace) -> Result<OrderTrace> {
        let timestamp = trace.timestamp.unwrap_or_else(chrono::Utc::now);

        let row: OrderTraceRow = sqlx::query_as(&format!(
            "INSERT INTO order_traces (order_id, client_id, client_email, previous_status, new_status, employee_id, employee_email, timestamp)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {TRACE_COLUMNS}"
        ))
        .bind(trace.order_id)
        .bind(trace.client_id)
        .bind(&trace.client_email)
        .bind(trace.previous_status.map(|s| s.as_str()))
        .bind(trace.new_status.as_str())
        .bind(trace.employee_id)
        .bind(&trace.employee_email)
        .bind(timestamp)
        .fetch_one(self.pool())
        .await?;
        count_query("save");

        row.try_into_trace()
    }
}

/// Internal row type for sqlx::FromRow.
#[derive(sqlx::FromRow)]
struct OrderTraceRow {
    id: i64,
    order_id: i64,
    client_id: i64,
    client_email: String,
    previous_status: Option<String>,
    new_status: String,
    employee_id: Option<i64>,
    employee_email: Option<String>,
    timestamp: chrono::DateTime<chrono::Utc>,
}

impl OrderTraceRow {
    fn try_into_trace(self) -> Result<OrderTrace> {
        Ok(OrderTrace {
            id: self.id,
            order_id: self.order_id,
            client_id: self.client_id,
            client_email: self.client_email,
            previous_status: self.previous_status.map(|s| s.parse()).transpose()?,
            new_status: self.new_status.parse()?,
            employee_id: self.employee_id,
            employee_email: self.employee_email,
            timestamp: self.timestamp,
        })
    }
}
