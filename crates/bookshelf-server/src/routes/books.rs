//! Book CRUD routes.
//!
//! This module implements the book-related HTTP endpoints:
//! - GET /book - List all books
//! - POST /book - Create a book
//! - POST /book/edit/{id} - Replace a book's fields
//! - POST /book/delete/{id} - Delete a book
//! - POST /book/add/then/delete/{id} - Create one book and delete another, concurrently
//!
//! Every response, success or failure, is wrapped in [`BookEnvelope`].

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use bookshelf_core::{Book, BookId};
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::extract::{BookIdPath, BookPayload};
use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

/// Uniform wrapper for every `/book*` response.
///
/// `status` always equals the HTTP status code of the response.
#[derive(Debug, Serialize)]
pub struct BookEnvelope<T> {
    pub status: u16,
    pub msg: String,
    pub book: Option<T>,
}

impl<T: Serialize> BookEnvelope<T> {
    pub fn new(status: StatusCode, msg: impl Into<String>, book: Option<T>) -> Self {
        Self {
            status: status.as_u16(),
            msg: msg.into(),
            book,
        }
    }
}

/// Serializes as `{}`.
#[derive(Debug, Default, Serialize)]
pub struct Empty {}

type EnvelopeResponse<T> = (StatusCode, Json<BookEnvelope<T>>);

fn respond<T: Serialize>(status: StatusCode, msg: &str, book: T) -> EnvelopeResponse<T> {
    (status, Json(BookEnvelope::new(status, msg, Some(book))))
}

// Client messages for store failures, one per route.
const MSG_LIST_FAILED: &str = "Error retrieving books.";
const MSG_CREATE_FAILED: &str = "Error adding a new book.";
const MSG_UPDATE_FAILED: &str = "Error updating the book.";
const MSG_DELETE_FAILED: &str = "Error deleting the book.";

/// Parse a path id. A malformed id cannot name any book.
fn parse_id(raw: &str) -> ApiResult<BookId> {
    raw.parse()
        .map_err(|_| ApiError::BookNotFound(raw.to_string()))
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /book - List all books.
///
/// # Response
///
/// - 200 OK: `{ "status": 200, "msg": "...", "book": [...] }`
/// - 500 Internal Server Error: store failure, `book` is null
async fn list_books(State(state): State<AppState>) -> ApiResult<EnvelopeResponse<Vec<Book>>> {
    let books = state
        .repository()
        .list_books()
        .await
        .map_err(|e| ApiError::from_store(MSG_LIST_FAILED, e))?;

    Ok(respond(StatusCode::OK, "books get Successfully", books))
}

/// POST /book - Create a book.
///
/// # Request
///
/// Body: `{ "title": "...", "author": "...", "genre": "..." }`
///
/// # Response
///
/// - 201 Created: the new book, including its id
/// - 400 Bad Request: a field is missing or empty; nothing is stored
/// - 500 Internal Server Error: store failure
async fn create_book(
    State(state): State<AppState>,
    BookPayload(input): BookPayload,
) -> ApiResult<EnvelopeResponse<Book>> {
    let new_book = input.validate()?;

    let book = state
        .repository()
        .create_book(&new_book)
        .await
        .map_err(|e| ApiError::from_store(MSG_CREATE_FAILED, e))?;

    Ok(respond(StatusCode::CREATED, "Book created successfully.", book))
}

/// POST /book/edit/{id} - Replace title, author and genre of a book.
///
/// The body is validated before the id is looked at.
///
/// # Response
///
/// - 200 OK: the updated book
/// - 400 Bad Request: a field is missing or empty
/// - 404 Not Found: no book with this id
/// - 500 Internal Server Error: store failure
async fn update_book(
    State(state): State<AppState>,
    BookIdPath(id): BookIdPath,
    BookPayload(input): BookPayload,
) -> ApiResult<EnvelopeResponse<Book>> {
    let new_book = input.validate()?;
    let id = parse_id(&id)?;

    let book = state
        .repository()
        .update_book(id, &new_book)
        .await
        .map_err(|e| ApiError::from_store(MSG_UPDATE_FAILED, e))?;

    Ok(respond(StatusCode::OK, "Book updated successfully.", book))
}

/// POST /book/delete/{id} - Delete a book.
///
/// # Response
///
/// - 200 OK: the deleted book's last state
/// - 400 Bad Request: the id segment is not valid percent-encoded UTF-8
/// - 404 Not Found: no book with this id
/// - 500 Internal Server Error: store failure
async fn delete_book(
    State(state): State<AppState>,
    BookIdPath(id): BookIdPath,
) -> ApiResult<EnvelopeResponse<Book>> {
    let id = parse_id(&id)?;

    let book = state
        .repository()
        .delete_book(id)
        .await
        .map_err(|e| ApiError::from_store(MSG_DELETE_FAILED, e))?;

    Ok(respond(StatusCode::OK, "Book deleted successfully.", book))
}

/// POST /book/add/then/delete/{id} - Create the body's book and delete `id`.
///
/// Both run concurrently and both finish before the response. Either failing
/// fails the request; the other half's effect stays.
///
/// # Response
///
/// - 200 OK: `book` is `{}`
/// - 400 Bad Request: a field is missing or empty; neither half runs
/// - 500 Internal Server Error: either half failed, including an unknown id
async fn add_then_delete(
    State(state): State<AppState>,
    BookIdPath(id): BookIdPath,
    BookPayload(input): BookPayload,
) -> ApiResult<EnvelopeResponse<Empty>> {
    let new_book = input.validate()?;

    state
        .repository()
        .add_then_delete(&new_book, &id)
        .await
        .map_err(ApiError::Compound)?;

    Ok(respond(
        StatusCode::OK,
        "Book add then delete successfully.",
        Empty::default(),
    ))
}

/// Build book routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/book", get(list_books).post(create_book))
        .route("/book/edit/{id}", post(update_book))
        .route("/book/delete/{id}", post(delete_book))
        .route("/book/add/then/delete/{id}", post(add_then_delete))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_serializes_null_book() {
        let envelope: BookEnvelope<Book> =
            BookEnvelope::new(StatusCode::NOT_FOUND, "Book not found.", None);
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": 404, "msg": "Book not found.", "book": null})
        );
    }

    #[test]
    fn test_empty_payload_serializes_as_object() {
        let (status, Json(envelope)) = respond(StatusCode::OK, "ok", Empty::default());
        assert_eq!(status, StatusCode::OK);
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["book"], serde_json::json!({}));
    }

    #[test]
    fn test_parse_id_rejects_as_not_found() {
        assert!(parse_id(&BookId::new().to_string()).is_ok());
        assert!(matches!(parse_id("42"), Err(ApiError::BookNotFound(ref id)) if id == "42"));
    }
}
