//! Per-request tracing.

use std::time::Instant;

use http::StatusCode;
use tracing::{Span, error, info, info_span, warn};

pub(crate) fn span(method: &http::Method, path: &str) -> Span {
    info_span!("request", %method, path)
}

/// Logs the outcome of a request inside its span.
pub(crate) fn completed(status: StatusCode, started: Instant) {
    let latency_ms = started.elapsed().as_secs_f64() * 1000.0;
    let status = status.as_u16();
    match status {
        500.. => error!(status, latency_ms, "request failed"),
        400..=499 => warn!(status, latency_ms, "request rejected"),
        _ => info!(status, latency_ms, "request completed"),
    }
}
