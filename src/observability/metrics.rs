//! Metrics collection.
//!
//! # Metrics
//! - `nav_navigations_total` (counter): navigations by outcome
//! - `nav_redirects_total` (counter): redirect hops followed
//! - `nav_view_loads_total` (counter): loader invocations by outcome
//! - `http_requests_total` (counter): facade calls by method, outcome
//! - `http_request_duration_seconds` (histogram): facade round trip latency
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; without an installed recorder
//!   every call is a no-op
//! - Outcome labels are static strings to keep cardinality bounded

use std::time::Duration;

pub fn record_navigation(outcome: &'static str) {
    metrics::counter!("nav_navigations_total", "outcome" => outcome).increment(1);
}

pub fn record_redirect() {
    metrics::counter!("nav_redirects_total").increment(1);
}

pub fn record_view_load(outcome: &'static str) {
    metrics::counter!("nav_view_loads_total", "outcome" => outcome).increment(1);
}

pub fn record_request(method: &'static str, outcome: &'static str, elapsed: Duration) {
    metrics::counter!("http_requests_total", "method" => method, "outcome" => outcome)
        .increment(1);
    metrics::histogram!("http_request_duration_seconds", "method" => method)
        .record(elapsed.as_secs_f64());
}
