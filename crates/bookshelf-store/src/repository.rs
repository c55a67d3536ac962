//! Repository layer providing the book operations used by the HTTP routes.
//!
//! This module wraps a [`BookStore`] and turns its raw results into the
//! outcomes the application cares about:
//!
//! - A missing record on update or delete becomes [`StoreError::BookNotFound`]
//! - Create and delete can be run as one concurrent pair ([`Repository::add_then_delete`])
//!
//! Every operation here is a plain in-process call; nothing goes back out
//! over HTTP.

use std::sync::Arc;

use bookshelf_core::{Book, BookId, NewBook};

use crate::backend::BookStore;
use crate::error::{CompoundError, StoreError, StoreResult};

/// Repository providing domain-level access to a book store.
#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn BookStore>,
}

impl Repository {
    /// Create a new repository wrapping the given store.
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    /// List every book.
    pub async fn list_books(&self) -> StoreResult<Vec<Book>> {
        let books = self.store.list().await?;
        tracing::debug!(count = books.len(), "Listed books");
        Ok(books)
    }

    /// Insert a new book and return it with its assigned id.
    pub async fn create_book(&self, book: &NewBook) -> StoreResult<Book> {
        let created = self.store.insert(book).await?;
        tracing::info!(book_id = %created.id, title = %created.title, "Book created");
        Ok(created)
    }

    /// Replace the business fields of an existing book.
    ///
    /// Returns `BookNotFound` when no book has this id.
    pub async fn update_book(&self, id: BookId, book: &NewBook) -> StoreResult<Book> {
        let updated = self
            .store
            .update(id, book)
            .await?
            .ok_or_else(|| StoreError::not_found(id))?;
        tracing::info!(book_id = %id, "Book updated");
        Ok(updated)
    }

    /// Remove a book and return its last known state.
    ///
    /// Returns `BookNotFound` when no book has this id.
    pub async fn delete_book(&self, id: BookId) -> StoreResult<Book> {
        let deleted = self
            .store
            .delete(id)
            .await?
            .ok_or_else(|| StoreError::not_found(id))?;
        tracing::info!(book_id = %id, "Book deleted");
        Ok(deleted)
    }

    /// Create `book` and delete the book with id `delete_id`, concurrently.
    ///
    /// Both halves always run to completion before this returns. If either
    /// fails the pair fails; a create failure is reported in preference to a
    /// delete failure. The half that succeeded is not undone.
    ///
    /// `delete_id` is taken as a raw string: an id that does not parse can
    /// never match a book, so it fails the delete half with `BookNotFound`.
    pub async fn add_then_delete(
        &self,
        book: &NewBook,
        delete_id: &str,
    ) -> Result<(), CompoundError> {
        let delete = async {
            match delete_id.parse::<BookId>() {
                Ok(id) => self.delete_book(id).await,
                Err(_) => Err(StoreError::BookNotFound(delete_id.to_string())),
            }
        };

        let (created, deleted) = tokio::join!(self.create_book(book), delete);

        match (created, deleted) {
            (Ok(_), Ok(_)) => Ok(()),
            (Ok(created), Err(e)) => {
                tracing::warn!(
                    book_id = %created.id,
                    error = %e,
                    "Delete half failed; created book is kept"
                );
                Err(CompoundError::Delete(e))
            }
            (Err(e), Ok(deleted)) => {
                tracing::warn!(
                    book_id = %deleted.id,
                    error = %e,
                    "Create half failed; deleted book is not restored"
                );
                Err(CompoundError::Create(e))
            }
            (Err(create_err), Err(delete_err)) => {
                tracing::warn!(error = %delete_err, "Delete half failed as well");
                Err(CompoundError::Create(create_err))
            }
        }
    }
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryBookStore;

    fn setup() -> (Arc<MemoryBookStore>, Repository) {
        let store = Arc::new(MemoryBookStore::new());
        let repo = Repository::new(store.clone());
        (store, repo)
    }

    fn book(title: &str) -> NewBook {
        NewBook::new(title, "Author", "Genre").unwrap()
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let (_, repo) = setup();
        let created = repo.create_book(&book("Dune")).await.unwrap();
        let books = repo.list_books().await.unwrap();
        assert_eq!(books, vec![created]);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let (store, repo) = setup();
        let err = repo.update_book(BookId::new(), &book("x")).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let (_, repo) = setup();
        let created = repo.create_book(&book("Dune")).await.unwrap();
        let deleted = repo.delete_book(created.id).await.unwrap();
        assert_eq!(deleted, created);
        assert!(repo.delete_book(created.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_add_then_delete_success() {
        let (store, repo) = setup();
        let victim = repo.create_book(&book("Old")).await.unwrap();

        repo.add_then_delete(&book("New"), &victim.id.to_string())
            .await
            .unwrap();

        let books = store.list().await.unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "New");
    }

    #[tokio::test]
    async fn test_add_then_delete_missing_id_keeps_created() {
        let (store, repo) = setup();

        let err = repo
            .add_then_delete(&book("New"), &BookId::new().to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, CompoundError::Delete(StoreError::BookNotFound(_))));
        let books = store.list().await.unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "New");
    }

    #[tokio::test]
    async fn test_add_then_delete_malformed_id() {
        let (store, repo) = setup();
        let err = repo
            .add_then_delete(&book("New"), "not-an-id")
            .await
            .unwrap_err();
        assert!(matches!(err, CompoundError::Delete(StoreError::BookNotFound(ref id)) if id == "not-an-id"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_add_then_delete_store_down_reports_create() {
        let (store, repo) = setup();
        store.set_unavailable(true);
        let err = repo
            .add_then_delete(&book("New"), &BookId::new().to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, CompoundError::Create(StoreError::Unavailable(_))));
    }
}
