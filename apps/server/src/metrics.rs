//! Metrics collection for the Aarogya server
//!
//! Prometheus metrics for HTTP traffic, catalog searches and upstream
//! provider calls.

use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, register_int_gauge_vec, HistogramVec,
    IntCounterVec, IntGaugeVec,
};
use std::time::Duration;

lazy_static! {
    // HTTP Request Metrics

    /// Total HTTP requests by method, route, and status
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "aarogya_http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .expect("Failed to register HTTP_REQUESTS_TOTAL");

    /// HTTP request duration in seconds
    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "aarogya_http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("Failed to register HTTP_REQUEST_DURATION_SECONDS");

    /// In-flight HTTP requests
    pub static ref HTTP_REQUESTS_IN_FLIGHT: IntGaugeVec = register_int_gauge_vec!(
        "aarogya_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
        &["method", "path"]
    )
    .expect("Failed to register HTTP_REQUESTS_IN_FLIGHT");

    // Catalog Metrics

    /// Catalog searches by catalog and outcome
    pub static ref CATALOG_SEARCHES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "aarogya_catalog_searches_total",
        "Total number of catalog searches",
        &["catalog", "status"]
    )
    .expect("Failed to register CATALOG_SEARCHES_TOTAL");

    /// Records returned per search
    pub static ref CATALOG_SEARCH_RESULTS: HistogramVec = register_histogram_vec!(
        "aarogya_catalog_search_results",
        "Number of records returned by a catalog search",
        &["catalog"],
        vec![0.0, 1.0, 5.0, 10.0, 20.0, 50.0, 100.0]
    )
    .expect("Failed to register CATALOG_SEARCH_RESULTS");

    /// Records loaded per catalog
    pub static ref CATALOG_RECORDS: IntGaugeVec = register_int_gauge_vec!(
        "aarogya_catalog_records",
        "Number of records held by each catalog",
        &["catalog"]
    )
    .expect("Failed to register CATALOG_RECORDS");

    // Upstream Provider Metrics

    /// Outbound provider calls by outcome
    pub static ref UPSTREAM_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "aarogya_upstream_requests_total",
        "Total number of requests to third-party providers",
        &["provider", "outcome"]
    )
    .expect("Failed to register UPSTREAM_REQUESTS_TOTAL");

    /// Outbound provider call duration
    pub static ref UPSTREAM_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "aarogya_upstream_request_duration_seconds",
        "Third-party provider request duration in seconds",
        &["provider"],
        vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]
    )
    .expect("Failed to register UPSTREAM_REQUEST_DURATION_SECONDS");
}

/// Search outcome label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Ok,
    Empty,
    Error,
}

impl SearchStatus {
    fn as_str(self) -> &'static str {
        match self {
            SearchStatus::Ok => "ok",
            SearchStatus::Empty => "empty",
            SearchStatus::Error => "error",
        }
    }
}

pub fn record_catalog_search(catalog: &str, results: usize) {
    let status = if results == 0 {
        SearchStatus::Empty
    } else {
        SearchStatus::Ok
    };
    CATALOG_SEARCHES_TOTAL
        .with_label_values(&[catalog, status.as_str()])
        .inc();
    CATALOG_SEARCH_RESULTS
        .with_label_values(&[catalog])
        .observe(results as f64);
}

pub fn record_catalog_search_error(catalog: &str) {
    CATALOG_SEARCHES_TOTAL
        .with_label_values(&[catalog, SearchStatus::Error.as_str()])
        .inc();
}

pub fn set_catalog_records(catalog: &str, count: usize) {
    CATALOG_RECORDS
        .with_label_values(&[catalog])
        .set(count as i64);
}

/// `outcome` is one of `ok`, `http_error`, `transport_error`, `decode_error`,
/// `skipped`.
pub fn record_upstream(provider: &str, outcome: &str, elapsed: Duration) {
    UPSTREAM_REQUESTS_TOTAL
        .with_label_values(&[provider, outcome])
        .inc();
    UPSTREAM_REQUEST_DURATION_SECONDS
        .with_label_values(&[provider])
        .observe(elapsed.as_secs_f64());
}

/// Route label for requests that matched no route. Raw paths are never used
/// as labels.
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// Catalog (API area) a route belongs to, e.g. `/api/locations/:id` ->
/// `locations`.
pub fn extract_catalog(route: &str) -> Option<String> {
    let rest = route.strip_prefix("/api/")?;
    let first = rest.split('/').find(|s| !s.is_empty())?;
    if first.starts_with(':') {
        return None;
    }
    Some(first.to_string())
}

/// Coarse operation name from method and route template.
pub fn extract_operation(method: &str, route: &str) -> Option<String> {
    if !route.starts_with("/api/") {
        return None;
    }
    let last = route.rsplit('/').find(|s| !s.is_empty())?;

    let op = match method {
        "GET" if last == "search" || last == "nearby" => "search",
        "GET" if last.starts_with(':') => "read",
        "GET" => "list",
        "POST" if last == "search" => "search",
        "POST" => "create",
        "PUT" | "PATCH" => "update",
        "DELETE" => "delete",
        _ => return None,
    };
    Some(op.to_string())
}
