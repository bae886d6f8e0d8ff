//! Duration resolution: elapsed minutes between an order entering the
//! pipeline (PENDING) and being delivered (DELIVERED).
//!
//! Two pairing rules exist and they can disagree when an order has more
//! than one PENDING or DELIVERED trace:
//!
//! - [`last_occurrence_minutes`] pairs the last PENDING with the last
//!   DELIVERED. Used for single-order lookups.
//! - [`first_occurrence_minutes`] pairs the first PENDING with one given
//!   DELIVERED trace. Used by the report and employee paths, so every
//!   delivery is measured from the order's original entry.
//!
//! Both expect the order's history oldest first, as returned by
//! [`crate::store::TraceStore::find_by_order_id`]. Negative spans resolve
//! to `None`.

use chrono::{DateTime, Utc};

use crate::model::{OrderStatus, OrderTrace};

/// Whole minutes from `start` to `end`, truncated toward zero.
pub fn minutes_between(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    (end - start).num_minutes()
}

/// Last PENDING to last DELIVERED.
pub fn last_occurrence_minutes(history: &[OrderTrace]) -> Option<i64> {
    let mut pending = None;
    let mut delivered = None;

    for trace in history {
        match trace.new_status {
            OrderStatus::Pending => pending = Some(trace.timestamp),
            OrderStatus::Delivered => delivered = Some(trace.timestamp),
            _ => {}
        }
    }

    non_negative(minutes_between(pending?, delivered?))
}

/// First PENDING in `history` to the timestamp of `completion`.
pub fn first_occurrence_minutes(history: &[OrderTrace], completion: &OrderTrace) -> Option<i64> {
    let pending = history
        .iter()
        .find(|t| t.new_status == OrderStatus::Pending)?
        .timestamp;

    non_negative(minutes_between(pending, completion.timestamp))
}

/// Arithmetic mean, 0.0 for an empty slice.
pub fn average_minutes(durations: &[i64]) -> f64 {
    if durations.is_empty() {
        return 0.0;
    }
    durations.iter().sum::<i64>() as f64 / durations.len() as f64
}

fn non_negative(minutes: i64) -> Option<i64> {
    (minutes >= 0).then_some(minutes)
}
