//! Request and trace identifiers.
//!
//! Every response carries `X-Request-ID` (fresh UUID v4) and `X-Trace-ID`
//! (taken from the request header, else the request ID). The handler runs
//! inside a span carrying both, so every log line of a request correlates.

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{Instrument, debug, info_span};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";
pub const TRACE_ID_HEADER: &str = "x-trace-id";

/// Middleware attaching request/trace IDs and a per-request span.
pub async fn trace_ids(req: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let trace_id = req
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map_or_else(|| request_id.clone(), String::from);

    let span = info_span!(
        "request",
        method = %req.method(),
        path = %req.uri().path(),
        request_id = %request_id,
        trace_id = %trace_id,
    );

    let mut response = next.run(req).instrument(span.clone()).await;
    span.in_scope(|| debug!(status = response.status().as_u16(), "Request completed"));

    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        headers.insert(REQUEST_ID_HEADER, value);
    }
    if let Ok(value) = HeaderValue::from_str(&trace_id) {
        headers.insert(TRACE_ID_HEADER, value);
    }
    response
}
