//! Appends reported errors to the error log before the response is sent.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::error::ErrorReport;
use crate::error_log::{ErrorLogEntry, ErrorSink};
use crate::state::AppState;

/// Take the [`ErrorReport`] left by the central error responder, if any, and
/// append it to the error log.
///
/// The append only enqueues the entry, so the response is never held up by
/// log I/O and never fails because of it.
pub async fn log_errors(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let mut response = next.run(request).await;

    if let Some(report) = response.extensions_mut().remove::<ErrorReport>() {
        tracing::error!(
            method = %method,
            path = %path,
            status = report.status.as_u16(),
            "Unhandled error: {}",
            report.description
        );
        state
            .error_log()
            .append(ErrorLogEntry::now(report.description));
    }

    response
}
