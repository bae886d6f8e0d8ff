//! Derived efficiency figures. Built fresh per query, never persisted.

use serde::{Deserialize, Serialize};

/// Fulfillment duration of one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderEfficiency {
    pub order_id: i64,
    /// None when the span cannot be computed.
    pub duration_in_minutes: Option<i64>,
}

/// Processing efficiency of one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeEfficiency {
    pub employee_id: i64,
    /// None only when the employee has no traces at all.
    pub employee_email: Option<String>,
    pub average_duration_in_minutes: f64,
    /// Orders with a resolvable duration, not traces.
    pub processed_orders: u64,
}

impl EmployeeEfficiency {
    /// Zeroed figure for an employee the store knows nothing about.
    pub fn empty(employee_id: i64) -> Self {
        Self {
            employee_id,
            employee_email: None,
            average_duration_in_minutes: 0.0,
            processed_orders: 0,
        }
    }
}
