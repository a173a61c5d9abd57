//! Per-request access logging
//!
//! One line per request under the `phonebook::access` target:
//! `METHOD URL STATUS SIZE - LATENCY ms BODY`

use axum::{
    body::{Body, Bytes, HttpBody},
    extract::{Request, State},
    http::{header, Method, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Instant;

use super::routes::AppState;
use crate::error::Error;

/// Buffer the request body, run the request and log the outcome
pub async fn log_requests(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let (parts, body) = req.into_parts();
    let bytes = match axum::body::to_bytes(body, state.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!("Rejected request body: {}", e);
            let response = Error::PayloadTooLarge.into_response();
            log_response(&method, &uri, &response, start, "-");
            return response;
        }
    };

    let logged_body = if state.log_request_body {
        format_body(&bytes)
    } else {
        "-".to_string()
    };

    let response = next.run(Request::from_parts(parts, Body::from(bytes))).await;
    log_response(&method, &uri, &response, start, &logged_body);
    response
}

fn log_response(method: &Method, uri: &Uri, response: &Response, start: Instant, body: &str) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    tracing::info!(
        target: "phonebook::access",
        "{}",
        format_line(method, uri, response.status().as_u16(), response_size(response), latency_ms, body)
    );
}

fn format_line(
    method: &Method,
    uri: &Uri,
    status: u16,
    size: Option<u64>,
    latency_ms: f64,
    body: &str,
) -> String {
    let size = size.map_or_else(|| "-".to_string(), |s| s.to_string());
    format!("{} {} {} {} - {:.3} ms {}", method, uri, status, size, latency_ms, body)
}

/// Response size from `content-length`, or the body's exact size hint.
/// Bodiless statuses carry no length.
fn response_size(response: &Response) -> Option<u64> {
    if matches!(response.status(), StatusCode::NO_CONTENT | StatusCode::NOT_MODIFIED) {
        return None;
    }

    response
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .or_else(|| response.body().size_hint().exact())
}

/// Compact JSON rendering of a request body; `{}` when empty or not JSON
fn format_body(bytes: &Bytes) -> String {
    serde_json::from_slice::<serde_json::Value>(bytes)
        .map(|v| v.to_string())
        .unwrap_or_else(|_| "{}".to_string())
}
