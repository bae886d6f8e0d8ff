//! Core data model.
//!
//! A trace is one status transition of an order. Efficiency figures are
//! derived from traces on every query.

pub mod efficiency;
pub mod trace;

pub use efficiency::{EmployeeEfficiency, OrderEfficiency};
pub use trace::{NewOrderTrace, OrderStatus, OrderTrace};
