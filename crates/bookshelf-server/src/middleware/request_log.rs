//! One log line per inbound request.

use axum::{
    extract::{OriginalUri, Request},
    middleware::Next,
    response::Response,
};
use chrono::{SecondsFormat, Utc};

use super::request_id::REQUEST_ID_HEADER;

/// Log timestamp, method and original path, then hand the request on.
///
/// Runs before routing; never rejects a request.
pub async fn log_request(request: Request, next: Next) -> Response {
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let path = request
        .extensions()
        .get::<OriginalUri>()
        .map_or_else(|| request.uri().to_string(), |uri| uri.0.to_string());
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    tracing::info!(
        timestamp = %timestamp,
        method = %request.method(),
        path = %path,
        request_id = %request_id,
        "[{}] {} {}",
        timestamp,
        request.method(),
        path
    );

    next.run(request).await
}
