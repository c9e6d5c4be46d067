// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Middleware module for HTTP request processing
//!
//! Records per-route response metrics and opens a span tagged with the matched
//! route and the requested source.

use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::{Instrument, Level, debug, span};

use crate::metrics;

const UNMATCHED_ROUTE: &str = "unmatched";

/// Read the raw `source` query parameter, if any
fn source_param(query: Option<&str>) -> Option<&str> {
    query?
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find_map(|(key, value)| (key == "source").then_some(value))
}

/// Middleware that records the response status of every request by matched route
pub async fn http_metrics_middleware(req: Request<Body>, next: Next) -> Response {
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| UNMATCHED_ROUTE.to_string(), |p| p.as_str().to_string());
    let source = source_param(req.uri().query())
        .unwrap_or(metrics::FALLBACK_SOURCE)
        .to_string();

    let span = span!(Level::INFO, "social_request", route = %route, source = %source);
    let started = Instant::now();
    let response = next.run(req).instrument(span).await;

    let status = response.status();
    metrics::record_http_response(&route, status);
    debug!(
        route = %route,
        status = status.as_u16(),
        elapsed_ms = started.elapsed().as_millis(),
        "request completed"
    );

    response
}
