//! API error types and the central error responder.
//!
//! Route handlers return [`ApiError`]. Its `IntoResponse` impl is the only
//! place an error turns into a client response:
//!
//! - Book routes answer with the envelope `{status, msg, book: null}`.
//! - Errors outside a book route answer with `{status, msg}`.
//!
//! Errors that are not a local short circuit (validation, unknown book id)
//! also attach an [`ErrorReport`] to the response. The error-logging
//! middleware removes it and appends it to the error log before the response
//! leaves the server.

use std::error::Error as StdError;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bookshelf_core::ValidationError;
use bookshelf_store::{CompoundError, StoreError};
use serde::Serialize;

use crate::routes::books::BookEnvelope;

/// Message for a body failing the required-field rule.
pub const MSG_FIELDS_REQUIRED: &str = "Title, author, and genre are required.";
/// Message for an id with no matching book.
pub const MSG_BOOK_NOT_FOUND: &str = "Book not found.";
/// Message for the add-then-delete pair failing.
pub const MSG_COMPOUND_FAILED: &str = "Error create and delete process.";
/// Message for a request that matched no route.
pub const MSG_ENDPOINT_NOT_FOUND: &str = "Endpoint not found";
/// Message for a body that is not a JSON object of scalar fields.
pub const MSG_MALFORMED_BODY: &str = "Invalid JSON body.";
/// Message for a path segment that cannot be decoded.
pub const MSG_MALFORMED_PATH: &str = "Invalid request path.";
/// Fallback message for anything else.
pub const MSG_INTERNAL: &str = "Internal Server Error";

/// API error that can be returned from handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Body missing title, author or genre (400).
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// No book with the requested id (404).
    #[error("book not found: {0}")]
    BookNotFound(String),

    /// Store failure inside a book route (500). `context` is the client message.
    #[error("{context}")]
    Store {
        context: &'static str,
        #[source]
        source: StoreError,
    },

    /// One half of add-then-delete failed (500).
    #[error("Error create and delete process.")]
    Compound(#[source] CompoundError),

    /// No route matched (404).
    #[error("no route for {method} {path}")]
    RouteNotFound { method: String, path: String },

    /// Request body is not a JSON object of scalar fields (400).
    #[error("malformed body: {0}")]
    MalformedBody(String),

    /// A path parameter could not be decoded (400).
    #[error("malformed path: {0}")]
    MalformedPath(String),

    /// Anything else (500).
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Map a store failure inside a book route, turning `BookNotFound` into a 404.
    pub fn from_store(context: &'static str, source: StoreError) -> Self {
        match source {
            StoreError::BookNotFound(id) => Self::BookNotFound(id),
            source => Self::Store { context, source },
        }
    }

    /// Get the error code string for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BookNotFound(_) => "BOOK_NOT_FOUND",
            Self::Store { .. } => "STORAGE_ERROR",
            Self::Compound(_) => "COMPOUND_OPERATION_ERROR",
            Self::RouteNotFound { .. } => "ROUTE_NOT_FOUND",
            Self::MalformedBody(_) => "MALFORMED_BODY",
            Self::MalformedPath(_) => "MALFORMED_PATH",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MalformedBody(_) | Self::MalformedPath(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::BookNotFound(_) | Self::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Store { .. } | Self::Compound(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The message shown to the client. Never carries internal detail.
    pub fn client_message(&self) -> String {
        match self {
            Self::Validation(_) => MSG_FIELDS_REQUIRED.to_string(),
            Self::BookNotFound(_) => MSG_BOOK_NOT_FOUND.to_string(),
            Self::Store { context, .. } => (*context).to_string(),
            Self::Compound(_) => MSG_COMPOUND_FAILED.to_string(),
            Self::RouteNotFound { .. } => MSG_ENDPOINT_NOT_FOUND.to_string(),
            Self::MalformedBody(_) => MSG_MALFORMED_BODY.to_string(),
            Self::MalformedPath(_) => MSG_MALFORMED_PATH.to_string(),
            Self::Internal(_) => MSG_INTERNAL.to_string(),
        }
    }

    /// Whether the response belongs to a book route and uses the envelope.
    fn uses_envelope(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::BookNotFound(_) | Self::Store { .. } | Self::Compound(_)
        )
    }

    /// Whether the error goes to the error log. Local short circuits do not.
    pub fn is_reported(&self) -> bool {
        !matches!(self, Self::Validation(_) | Self::BookNotFound(_))
    }

    /// Code, display and the full `source()` chain, one cause per line.
    pub fn describe(&self) -> String {
        let mut description = format!("{}: {}", self.code(), self);
        let mut source = self.source();
        while let Some(cause) = source {
            description.push_str("\n    caused by: ");
            description.push_str(&cause.to_string());
            source = cause.source();
        }
        description
    }
}

/// Error description handed from the responder to the error-logging middleware
/// through response extensions.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub status: StatusCode,
    pub description: String,
}

/// JSON body for errors outside the book routes.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub msg: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let msg = self.client_message();

        let mut response = if self.uses_envelope() {
            let body: BookEnvelope<()> = BookEnvelope::new(status, msg, None);
            (status, Json(body)).into_response()
        } else {
            let body = ErrorBody {
                status: status.as_u16(),
                msg,
            };
            (status, Json(body)).into_response()
        };

        if self.is_reported() {
            response.extensions_mut().insert(ErrorReport {
                status,
                description: self.describe(),
            });
        }

        response
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_is_local_envelope() {
        let err = ApiError::Validation(ValidationError::MissingFields(vec!["title"]));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.extensions().get::<ErrorReport>().is_none());

        let json = body_json(response).await;
        assert_eq!(json["status"], 400);
        assert_eq!(json["msg"], MSG_FIELDS_REQUIRED);
        assert!(json["book"].is_null());
    }

    #[tokio::test]
    async fn test_store_error_hides_detail_but_reports_it() {
        let err = ApiError::from_store(
            "Error retrieving books.",
            StoreError::Unavailable("disk on fire".into()),
        );
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let report = response.extensions().get::<ErrorReport>().cloned().unwrap();
        assert!(report.description.starts_with("STORAGE_ERROR: Error retrieving books."));
        assert!(report.description.contains("caused by: store unavailable: disk on fire"));

        let json = body_json(response).await;
        assert_eq!(json["status"], 500);
        assert_eq!(json["msg"], "Error retrieving books.");
        assert!(json["book"].is_null());
        assert!(!json.to_string().contains("disk on fire"));
    }

    #[tokio::test]
    async fn test_from_store_maps_not_found() {
        let err = ApiError::from_store("ctx", StoreError::BookNotFound("abc".into()));
        assert!(matches!(err, ApiError::BookNotFound(ref id) if id == "abc"));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert!(!err.is_reported());
    }

    #[tokio::test]
    async fn test_compound_error_is_suppressed() {
        let err = ApiError::Compound(CompoundError::Delete(StoreError::BookNotFound(
            "abc".into(),
        )));
        let description = err.describe();
        assert!(description.contains("error deleting book"));

        let json = body_json(err.into_response()).await;
        assert_eq!(json["status"], 500);
        assert_eq!(json["msg"], MSG_COMPOUND_FAILED);
        assert!(json["book"].is_null());
    }

    #[tokio::test]
    async fn test_route_not_found_has_no_envelope() {
        let err = ApiError::RouteNotFound {
            method: "GET".into(),
            path: "/nope".into(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let report = response.extensions().get::<ErrorReport>().cloned().unwrap();
        assert_eq!(report.description, "ROUTE_NOT_FOUND: no route for GET /nope");

        let json = body_json(response).await;
        assert_eq!(json, serde_json::json!({"status": 404, "msg": "Endpoint not found"}));
    }

    #[tokio::test]
    async fn test_malformed_body_hides_parser_detail() {
        let err = ApiError::MalformedBody("expected value at line 1 column 2".into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let report = response.extensions().get::<ErrorReport>().cloned().unwrap();
        assert!(report.description.contains("expected value at line 1 column 2"));

        let json = body_json(response).await;
        assert_eq!(json, serde_json::json!({"status": 400, "msg": MSG_MALFORMED_BODY}));
    }

    #[tokio::test]
    async fn test_internal_uses_default_message() {
        let json = body_json(ApiError::Internal("boom".into()).into_response()).await;
        assert_eq!(json, serde_json::json!({"status": 500, "msg": MSG_INTERNAL}));
    }
}
