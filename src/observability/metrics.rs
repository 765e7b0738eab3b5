//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by status
//! - `gateway_request_duration_seconds` (histogram): latency distribution
//! - `gateway_guard_decisions_total` (counter): continue / redirect
//! - `gateway_geocode_total` (counter): ok / invalid / not_found / upstream
//! - `gateway_failures_total` (counter): reported errors by kind
//!
//! Recording is a no-op until a recorder is installed, so tests and library
//! users pay nothing.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_request(status: u16, start: Instant) {
    metrics::counter!("gateway_requests_total", "status" => status.to_string()).increment(1);
    metrics::histogram!("gateway_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_guard(decision: &'static str) {
    metrics::counter!("gateway_guard_decisions_total", "decision" => decision).increment(1);
}

pub fn record_geocode(outcome: &'static str) {
    metrics::counter!("gateway_geocode_total", "outcome" => outcome).increment(1);
}

pub fn record_failure(kind: &'static str) {
    metrics::counter!("gateway_failures_total", "kind" => kind).increment(1);
}
