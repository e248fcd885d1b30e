use std::net::SocketAddr;

use crate::engine::EngineError;

// ── Booking outcome counters ────────────────────────────────────

/// Counter: reservations confirmed.
pub const BOOKINGS_CONFIRMED_TOTAL: &str = "maitre_bookings_confirmed_total";

/// Counter: reservation requests rejected. Labels: reason.
pub const BOOKINGS_REJECTED_TOTAL: &str = "maitre_bookings_rejected_total";

/// Counter: reservations cancelled.
pub const CANCELLATIONS_TOTAL: &str = "maitre_cancellations_total";

/// Counter: outbound notifications dropped (missing recipient or closed sink).
pub const NOTIFICATIONS_DROPPED_TOTAL: &str = "maitre_notifications_dropped_total";

/// Install the global tracing subscriber. Call once from the hosting layer.
pub fn init_tracing() {
    tracing_subscriber::fmt::init();
}

/// Install the Prometheus metrics exporter on the given port. No-op if port
/// is None.
pub fn init_metrics(port: Option<u16>) {
    let Some(port) = port else { return };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .expect("failed to install Prometheus metrics exporter");
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
}

/// Map a rejection to a short label for metrics.
pub fn rejection_label(err: &EngineError) -> &'static str {
    match err {
        EngineError::Validation(_) => "validation",
        EngineError::NotFound(_) => "not_found",
        EngineError::Conflict { .. } => "conflict",
        EngineError::AlreadyCancelled(_) => "already_cancelled",
        EngineError::Unauthorized => "unauthorized",
        EngineError::Storage(_) => "storage",
    }
}
