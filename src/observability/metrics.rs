//! Metrics collection.
//!
//! # Metrics
//! - `bridge_requests_total` (counter): completed requests by action, status
//! - `bridge_upgrades_total` (counter): protocol upgrades by protocol
//! - `bridge_connection_events_total` (counter): connection events by kind
//!
//! # Design Decisions
//! - Low-overhead metric updates (atomic operations)
//! - Counters only; latency histograms belong to the engine layer
//! - Recording is a no-op until the host installs a metrics recorder

use metrics::counter;

/// Records a completed request with its terminal action and status.
pub fn record_request(action: &'static str, status: u16) {
    counter!(
        "bridge_requests_total",
        "action" => action,
        "status" => status.to_string(),
    )
    .increment(1);
}

/// Records an accepted protocol upgrade.
pub fn record_upgrade(protocol: &'static str) {
    counter!("bridge_upgrades_total", "protocol" => protocol).increment(1);
}

/// Records a connection lifecycle event.
pub fn record_connection_event(event: &'static str) {
    counter!("bridge_connection_events_total", "event" => event).increment(1);
}
