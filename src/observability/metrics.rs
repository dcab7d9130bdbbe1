//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_decisions_total` (counter): access decisions by outcome
//! - `gateway_excluded_total` (counter): requests that bypassed the gateway
//! - `gateway_upstream_requests_total` (counter): forwarded requests by status
//! - `gateway_upstream_duration_seconds` (histogram): upstream latency
//!
//! Recording is a no-op until [`init_metrics`] installs the Prometheus recorder.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::security::Decision;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_decision(decision: &Decision) {
    metrics::counter!("gateway_decisions_total", "decision" => decision.label()).increment(1);
}

pub fn record_excluded() {
    metrics::counter!("gateway_excluded_total").increment(1);
}

pub fn record_upstream(status: u16, start: Instant) {
    metrics::counter!("gateway_upstream_requests_total", "status" => status.to_string())
        .increment(1);
    metrics::histogram!("gateway_upstream_duration_seconds")
        .record(start.elapsed().as_secs_f64());
}
