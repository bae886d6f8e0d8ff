//! # order-traces
//!
//! Records order status transitions ("traces") and derives fulfillment
//! metrics from them: per-order durations, per-employee averages and an
//! employee ranking.
//!
//! Storage sits behind [`store::TraceStore`], with a Postgres adapter in
//! [`db`] and an in-memory store for tests.

pub mod config;
pub mod db;
pub mod engine;
pub mod error;
pub mod model;
pub mod store;
pub mod telemetry;

pub use engine::TraceEngine;
pub use error::{Error, Result};
