//! Request extraction for the book routes.
//!
//! Both extractors reject with [`ApiError`], so a bad request goes through
//! the central responder and the error log like any other failure.

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use bookshelf_core::BookInput;

use crate::error::ApiError;

/// The `{title, author, genre}` body of create, update and add-then-delete.
///
/// - An empty body is read as `{}`, so the required-field rule answers it.
/// - Content-Type is not checked.
/// - Anything that is not a JSON object with optional scalar fields is
///   rejected as [`ApiError::MalformedBody`].
#[derive(Debug, Clone, Default)]
pub struct BookPayload(pub BookInput);

impl BookPayload {
    /// Parse raw body bytes.
    pub fn parse(bytes: &[u8]) -> Result<Self, ApiError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        let value: serde_json::Value =
            serde_json::from_slice(bytes).map_err(|e| ApiError::MalformedBody(e.to_string()))?;
        if !value.is_object() {
            return Err(ApiError::MalformedBody("expected a JSON object".to_string()));
        }
        serde_json::from_value(value)
            .map(Self)
            .map_err(|e| ApiError::MalformedBody(e.to_string()))
    }
}

impl<S> FromRequest<S> for BookPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(request, state).await.map_err(|e| {
            tracing::debug!(error = %e, "Failed to read request body");
            ApiError::MalformedBody(format!("unreadable request body: {e}"))
        })?;
        Self::parse(&bytes)
    }
}

/// The `{id}` segment of an edit, delete or add-then-delete path, decoded
/// but not yet parsed as a [`bookshelf_core::BookId`].
#[derive(Debug, Clone)]
pub struct BookIdPath(pub String);

impl<S> FromRequestParts<S> for BookIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::MalformedPath(e.body_text()))?;
        Ok(Self(id))
    }
}
