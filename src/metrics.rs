//! Request and store metrics.
//!
//! Recorded through the `metrics` facade; with no recorder installed every
//! call here is a no-op.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use tracing::debug;

// === Metric Name Constants ===

/// HTTP requests counter metric name.
pub const METRIC_HTTP_REQUESTS: &str = "http_requests_total";
/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// Store query latency metric name.
pub const METRIC_STORE_QUERY_LATENCY: &str = "store_query_latency_ms";
/// Store errors counter metric name.
pub const METRIC_STORE_ERRORS: &str = "store_errors_total";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_counter!(
        METRIC_HTTP_REQUESTS,
        "Total number of HTTP requests by method, resource and status"
    );
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );
    describe_histogram!(
        METRIC_STORE_QUERY_LATENCY,
        "Store statement latency in milliseconds"
    );
    describe_counter!(
        METRIC_STORE_ERRORS,
        "Total number of failed store statements"
    );

    debug!("Metrics initialized");
}

/// Record a completed HTTP request.
pub fn record_request(start: Instant, method: &str, resource: &str, status: u16) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_HTTP_REQUEST_LATENCY, "method" => method.to_string()).record(latency_ms);
    counter!(
        METRIC_HTTP_REQUESTS,
        "method" => method.to_string(),
        "resource" => resource.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Increment store errors counter.
pub fn inc_store_errors() {
    counter!(METRIC_STORE_ERRORS).increment(1);
}

/// RAII guard for timing operations.
/// Automatically records latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    metric_name: &'static str,
    op: &'static str,
}

impl LatencyTimer {
    /// Create a new latency timer for the given metric and operation label.
    pub fn new(metric_name: &'static str, op: &'static str) -> Self {
        Self {
            start: Instant::now(),
            metric_name,
            op,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        let latency_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        histogram!(self.metric_name, "op" => self.op).record(latency_ms);
    }
}

/// Create a latency timer for a store statement.
pub fn timer_store_query(op: &'static str) -> LatencyTimer {
    LatencyTimer::new(METRIC_STORE_QUERY_LATENCY, op)
}
