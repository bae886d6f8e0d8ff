//! Per-employee processing efficiency and the ranking across employees.
//!
//! An employee is credited with every DELIVERED trace carrying their id.
//! Each such delivery is measured from the order's first PENDING trace.

use std::collections::BTreeMap;
use std::time::Instant;

use tracing::{Instrument, debug};

use super::TraceEngine;
use super::duration::{average_minutes, first_occurrence_minutes};
use crate::error::Result;
use crate::model::{EmployeeEfficiency, OrderStatus, OrderTrace};
use crate::store::TraceStore;
use crate::telemetry::analytics::{finish_query, record_discarded, start_query_span};

impl<S: TraceStore + ?Sized> TraceEngine<S> {
    /// Employees with at least one measured delivery, fastest average first.
    ///
    /// Traces without an employee are ignored. Equal averages keep
    /// ascending employee id order.
    pub async fn employees_efficiency_ranking(&self) -> Result<Vec<EmployeeEfficiency>> {
        const OPERATION: &str = "employees_efficiency_ranking";
        let span = start_query_span(OPERATION);
        let started = Instant::now();

        async {
            let traces = self.store.find_all().await?;

            let mut by_employee: BTreeMap<i64, Vec<OrderTrace>> = BTreeMap::new();
            for trace in traces {
                if let Some(employee_id) = trace.employee_id {
                    by_employee.entry(employee_id).or_default().push(trace);
                }
            }

            let mut ranking = Vec::with_capacity(by_employee.len());
            for (employee_id, traces) in &by_employee {
                let efficiency = self.summarize_employee(*employee_id, traces, OPERATION).await?;
                if efficiency.processed_orders > 0 {
                    ranking.push(efficiency);
                }
            }

            ranking.sort_by(|a, b| {
                a.average_duration_in_minutes
                    .total_cmp(&b.average_duration_in_minutes)
            });

            finish_query(&span, OPERATION, started, ranking.len());
            Ok(ranking)
        }
        .instrument(span.clone())
        .await
    }

    /// Efficiency of one employee. Zeroed when the store has no traces for
    /// them.
    pub async fn employee_efficiency(&self, employee_id: i64) -> Result<EmployeeEfficiency> {
        const OPERATION: &str = "employee_efficiency";
        let span = start_query_span(OPERATION);
        let started = Instant::now();

        async {
            let traces = self.store.find_by_employee_id(employee_id).await?;

            let efficiency = if traces.is_empty() {
                debug!(employee_id, "no traces for employee");
                EmployeeEfficiency::empty(employee_id)
            } else {
                self.summarize_employee(employee_id, &traces, OPERATION)
                    .await?
            };

            finish_query(&span, OPERATION, started, 1);
            Ok(efficiency)
        }
        .instrument(span.clone())
        .await
    }

    /// Reduce one employee's traces to an efficiency figure.
    ///
    /// Looks up the full history of every order the employee delivered.
    async fn summarize_employee(
        &self,
        employee_id: i64,
        traces: &[OrderTrace],
        operation: &'static str,
    ) -> Result<EmployeeEfficiency> {
        let employee_email = traces
            .iter()
            .find_map(|t| t.employee_email.clone())
            .unwrap_or_default();

        let mut durations = Vec::new();
        let mut discarded = 0;
        for delivered in traces
            .iter()
            .filter(|t| t.new_status == OrderStatus::Delivered)
        {
            let history = self.store.find_by_order_id(delivered.order_id).await?;
            match first_occurrence_minutes(&history, delivered) {
                Some(minutes) => durations.push(minutes),
                None => discarded += 1,
            }
        }
        record_discarded(operation, discarded);

        Ok(EmployeeEfficiency {
            employee_id,
            employee_email: Some(employee_email),
            average_duration_in_minutes: average_minutes(&durations),
            processed_orders: durations.len() as u64,
        })
    }
}
