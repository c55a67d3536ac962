//! The persistence seam.
//!
//! Route handlers never talk to a database directly; they go through
//! [`crate::Repository`], which holds an `Arc<dyn BookStore>`. Production uses
//! [`crate::PgBookStore`], tests use [`crate::MemoryBookStore`].

use async_trait::async_trait;
use bookshelf_core::{Book, BookId, NewBook};

use crate::error::StoreResult;

/// Storage operations for books.
///
/// `update` and `delete` return `Ok(None)` when no record has the given id;
/// `Err` is reserved for the store itself failing.
#[async_trait]
pub trait BookStore: Send + Sync + 'static {
    /// All books, in whatever order the store yields them.
    async fn list(&self) -> StoreResult<Vec<Book>>;

    /// Insert a book; the store assigns the id.
    async fn insert(&self, book: &NewBook) -> StoreResult<Book>;

    /// Replace the business fields of the book with `id`, returning the new state.
    async fn update(&self, id: BookId, book: &NewBook) -> StoreResult<Option<Book>>;

    /// Remove the book with `id`, returning its last state.
    async fn delete(&self, id: BookId) -> StoreResult<Option<Book>>;
}
