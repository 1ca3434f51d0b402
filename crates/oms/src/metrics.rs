//! Metrics emitted by the order tracker
//!
//! Series go through the `metrics` facade and are dropped unless the host
//! process installs a recorder (see the `observability` crate).

use metrics::{counter, gauge};

/// Names of the series this crate emits
pub const EVENTS_TOTAL: &str = "tracker_events_total";
pub const EVENT_ERRORS_TOTAL: &str = "tracker_event_errors_total";
pub const ORDERS_TRACKED: &str = "tracker_orders_tracked";
pub const PENDING_REPLACES: &str = "tracker_pending_replaces";

/// Handle for recording tracker activity
#[derive(Debug, Clone, Copy, Default)]
pub struct TrackerMetrics;

impl TrackerMetrics {
    pub fn new() -> Self {
        Self
    }

    /// Record an event that was applied
    pub fn record_event(&self, event: &'static str) {
        counter!(EVENTS_TOTAL, "event" => event).increment(1);
    }

    /// Record an event that was refused
    pub fn record_error(&self, event: &'static str, error: &'static str) {
        counter!(EVENT_ERRORS_TOTAL, "event" => event, "error" => error).increment(1);
    }

    /// Publish index sizes after a mutation
    pub fn set_index_sizes(&self, orders: usize, pending_replaces: usize) {
        gauge!(ORDERS_TRACKED).set(orders as f64);
        gauge!(PENDING_REPLACES).set(pending_replaces as f64);
    }
}
