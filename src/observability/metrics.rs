//! Metrics collection and exposition.
//!
//! # Metrics
//! - `redirect_gate_requests_total` (counter): requests seen by the gate,
//!   by outcome (`filtered`, `no_match`, `unresolved`, `redirected`, `failed`)
//! - `redirect_gate_redirects_total` (counter): redirects issued, by status
//!
//! # Design Decisions
//! - Recording without an installed exporter is a no-op
//! - Prometheus exporter serves its own HTTP listener

use std::net::SocketAddr;

use metrics::counter;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint started");
    Ok(())
}

/// Count one gate evaluation.
pub fn record_outcome(outcome: &'static str) {
    counter!("redirect_gate_requests_total", "outcome" => outcome).increment(1);
}

/// Count one issued redirect.
pub fn record_redirect(status: u16) {
    counter!("redirect_gate_redirects_total", "status" => status.to_string()).increment(1);
}
