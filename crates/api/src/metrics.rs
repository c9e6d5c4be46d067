// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Prometheus metrics module
//!
//! Provides global metrics using the default Prometheus registry via macros and
//! an Axum-compatible metrics handler.

use std::sync::LazyLock;

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use prometheus::{
    Encoder, HistogramVec, IntCounterVec, TextEncoder, register_histogram_vec,
    register_int_counter_vec,
};
use shared_types::Provider;

/// Label used for requests that name no source and go through fallback
pub const FALLBACK_SOURCE: &str = "auto";

/// Total number of social operations, labeled by `operation` and `source`.
pub static REQUESTS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "social_api_requests_total",
        "Total number of social operations, labeled by operation and source",
        &["operation", "source"]
    )
    .expect("Failed to create social_api_requests_total counter vec")
});

/// Histogram for social operation durations in seconds.
pub static REQUEST_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    register_histogram_vec!(
        "social_api_request_duration_seconds",
        "Social operation durations in seconds",
        &["operation", "result"],
        vec![0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]
    )
    .expect("Failed to create social_api_request_duration_seconds histogram")
});

/// HTTP responses by matched route and status code
pub static HTTP_RESPONSES: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "social_api_http_responses_total",
        "Total number of HTTP responses, labeled by route and status",
        &["route", "status"]
    )
    .expect("Failed to create social_api_http_responses_total counter vec")
});

/// Increment the requests counter
///
/// # Arguments
/// * `operation` - Name of the social operation
/// * `source` - Requested provider, `None` for fallback
pub fn inc_requests(operation: &str, source: Option<Provider>) {
    let source = source.map_or(FALLBACK_SOURCE, Provider::name);
    REQUESTS_TOTAL.with_label_values(&[operation, source]).inc();
}

/// Observe the duration of a social operation
///
/// # Arguments
/// * `operation` - Name of the social operation
/// * `result` - `ok` or the error kind
/// * `duration_secs` - The duration of the operation in seconds
pub fn observe_request_duration(operation: &str, result: &str, duration_secs: f64) {
    REQUEST_DURATION
        .with_label_values(&[operation, result])
        .observe(duration_secs);
}

/// Record one HTTP response
pub fn record_http_response(route: &str, status: StatusCode) {
    HTTP_RESPONSES
        .with_label_values(&[route, status.as_str()])
        .inc();
}

/// Axum handler that exports metrics in Prometheus text format
pub async fn metrics_handler() -> Response {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = vec![];
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "failed to encode metrics");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    (
        [(header::CONTENT_TYPE, encoder.format_type().to_string())],
        buffer,
    )
        .into_response()
}
