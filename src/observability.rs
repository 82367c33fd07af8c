use std::net::SocketAddr;

use crate::http::Op;

// ── RED metrics (request-driven) ────────────────────────────────

/// Counter: total HTTP requests handled. Labels: op, status.
pub const REQUESTS_TOTAL: &str = "slotkeeper_requests_total";

/// Histogram: request latency in seconds. Labels: op.
pub const REQUEST_DURATION_SECONDS: &str = "slotkeeper_request_duration_seconds";

/// Counter: creates/updates rejected because they overlap a booking.
pub const CONFLICTS_TOTAL: &str = "slotkeeper_conflicts_total";

// ── USE metrics (resource utilization) ──────────────────────────

/// Gauge: live bookings in the store.
pub const BOOKINGS_ACTIVE: &str = "slotkeeper_bookings_active";

/// Histogram: time a create/update spent waiting for the mutation serializer.
pub const SERIALIZER_WAIT_SECONDS: &str = "slotkeeper_serializer_wait_seconds";

/// Install Prometheus metrics exporter on the given port. No-op if port is None.
pub fn init(port: Option<u16>) -> Result<(), metrics_exporter_prometheus::BuildError> {
    let Some(port) = port else { return Ok(()) };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
    Ok(())
}

/// Map an HTTP operation to a short label for metrics.
pub fn op_label(op: Op) -> &'static str {
    match op {
        Op::List => "list_bookings",
        Op::Get => "get_booking",
        Op::Create => "create_booking",
        Op::Update => "update_booking",
        Op::Delete => "delete_booking",
        Op::Health => "health",
    }
}
