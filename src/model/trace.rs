//! Order trace types.
//!
//! A trace records one status transition of an order. Traces are
//! append-only: once stored they are never updated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

// ---------------------------------------------------------------------------
// Order Status
// ---------------------------------------------------------------------------

/// Pipeline stage of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Order entered the pipeline.
    Pending,
    /// Kitchen/warehouse is working on it.
    InPreparation,
    /// Waiting for pickup.
    Ready,
    /// Handed over to the client. Marks completion.
    Delivered,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::InPreparation => "IN_PREPARATION",
            OrderStatus::Ready => "READY",
            OrderStatus::Delivered => "DELIVERED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(OrderStatus::Pending),
            "IN_PREPARATION" => Ok(OrderStatus::InPreparation),
            "READY" => Ok(OrderStatus::Ready),
            "DELIVERED" => Ok(OrderStatus::Delivered),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Order Trace
// ---------------------------------------------------------------------------

/// A stored status transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTrace {
    /// Assigned by the store on save.
    pub id: i64,
    pub order_id: i64,
    pub client_id: i64,
    pub client_email: String,

    /// None on the first trace of an order.
    pub previous_status: Option<OrderStatus>,
    pub new_status: OrderStatus,

    /// None for client-initiated transitions.
    pub employee_id: Option<i64>,
    pub employee_email: Option<String>,

    pub timestamp: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// A trace that has not been stored yet.
///
/// `timestamp` stays `None` on values built by callers; the engine stamps
/// a copy with the current time when recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderTrace {
    pub order_id: i64,
    pub client_id: i64,
    pub client_email: String,
    pub previous_status: Option<OrderStatus>,
    pub new_status: OrderStatus,
    pub employee_id: Option<i64>,
    pub employee_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl NewOrderTrace {
    pub fn new(
        order_id: i64,
        client_id: i64,
        client_email: impl Into<String>,
        new_status: OrderStatus,
    ) -> Self {
        Self {
            order_id,
            client_id,
            client_email: client_email.into(),
            previous_status: None,
            new_status,
            employee_id: None,
            employee_email: None,
            timestamp: None,
        }
    }

    pub fn previous_status(mut self, status: OrderStatus) -> Self {
        self.previous_status = Some(status);
        self
    }

    pub fn employee(mut self, id: i64, email: impl Into<String>) -> Self {
        self.employee_id = Some(id);
        self.employee_email = Some(email.into());
        self
    }

    pub fn employee_id(mut self, id: i64) -> Self {
        self.employee_id = Some(id);
        self
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Attach the store-assigned id, falling back to `now` when no
    /// timestamp was set.
    pub fn into_trace(self, id: i64, now: DateTime<Utc>) -> OrderTrace {
        OrderTrace {
            id,
            order_id: self.order_id,
            client_id: self.client_id,
            client_email: self.client_email,
            previous_status: self.previous_status,
            new_status: self.new_status,
            employee_id: self.employee_id,
            employee_email: self.employee_email,
            timestamp: self.timestamp.unwrap_or(now),
        }
    }
}
