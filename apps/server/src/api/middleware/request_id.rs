//! Request id middleware and the per-request tracing span.

use axum::{
    extract::{MatchedPath, Request},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use opentelemetry::trace::TraceContextExt;
use std::time::Instant;
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;
use uuid::Uuid;

use crate::{metrics, request_context::RequestContext};

fn route_of(req: &Request) -> String {
    req.extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| metrics::UNMATCHED_ROUTE.to_string())
}

/// Opens the `http_request` span and assigns a fresh `x-request-id`.
///
/// A client-supplied `x-request-id` is echoed back as `x-correlation-id`;
/// the OpenTelemetry trace id is returned as `x-trace-id`.
#[tracing::instrument(
    name = "http_request",
    skip_all,
    fields(
        http.method = %req.method(),
        http.route = tracing::field::Empty,
        otel.kind = "server",
        http.response.status_code = tracing::field::Empty,
        aarogya.catalog = tracing::field::Empty,
        aarogya.operation = tracing::field::Empty,
        request_id = tracing::field::Empty,
    )
)]
pub async fn request_id_middleware(mut req: Request, next: Next) -> Response {
    let span = Span::current();
    let start = Instant::now();

    let client_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(String::from);

    let request_id = Uuid::new_v4().to_string();
    span.record("request_id", request_id.as_str());

    let method = req.method().clone();
    let route = route_of(&req);
    span.record("http.route", route.as_str());
    if let Some(catalog) = metrics::extract_catalog(&route) {
        span.record("aarogya.catalog", catalog.as_str());
    }
    if let Some(operation) = metrics::extract_operation(method.as_str(), &route) {
        span.record("aarogya.operation", operation.as_str());
    }

    req.extensions_mut().insert(RequestContext {
        request_id: request_id.clone(),
        correlation_id: client_id.clone(),
    });

    let mut response = next.run(req).await;

    let status = response.status();
    span.record("http.response.status_code", status.as_u16());
    tracing::info!(
        method = %method,
        route = %route,
        status = status.as_u16(),
        duration_ms = start.elapsed().as_millis(),
        "Request completed"
    );

    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        headers.insert("x-request-id", value);
    }

    let trace_id = span.context().span().span_context().trace_id().to_string();
    if let Ok(value) = HeaderValue::from_str(&trace_id) {
        headers.insert("x-trace-id", value);
    }

    if let Some(client_id) = client_id {
        if let Ok(value) = HeaderValue::from_str(&client_id) {
            headers.insert("x-correlation-id", value);
        }
    }

    response
}
