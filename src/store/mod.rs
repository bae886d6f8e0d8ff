//! Trace storage gateway.
//!
//! The analytics engine reads and writes traces only through [`TraceStore`].
//! [`crate::db::Db`] is the Postgres implementation; [`InMemoryTraceStore`]
//! backs tests and embedded use.

pub mod memory;

pub use memory::InMemoryTraceStore;

use crate::error::Result;
use crate::model::{NewOrderTrace, OrderTrace};
use async_trait::async_trait;

/// Storage operations the engine depends on.
#[async_trait]
pub trait TraceStore: Send + Sync {
    /// Every stored trace.
    async fn find_all(&self) -> Result<Vec<OrderTrace>>;

    /// All traces of one order, oldest first.
    async fn find_by_order_id(&self, order_id: i64) -> Result<Vec<OrderTrace>>;

    /// All traces attributed to one employee.
    async fn find_by_employee_id(&self, employee_id: i64) -> Result<Vec<OrderTrace>>;

    /// Persist a trace and return it with its assigned id.
    async fn save(&self, trace: NewOrderTrace) -> Result<OrderTrace>;
}
