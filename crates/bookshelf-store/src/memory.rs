//! In-memory implementation of [`BookStore`].
//!
//! Used by tests and by the server's `memory` backend. Books are kept in
//! insertion order.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use bookshelf_core::{Book, BookId, NewBook};
use tokio::sync::RwLock;

use crate::backend::BookStore;
use crate::error::{StoreError, StoreResult};

/// Book store held entirely in process memory.
#[derive(Debug, Default)]
pub struct MemoryBookStore {
    books: RwLock<Vec<Book>>,
    unavailable: AtomicBool,
}

impl MemoryBookStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail with [`StoreError::Unavailable`]
    /// until switched back.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored books.
    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }

    /// Whether the store holds no books.
    pub async fn is_empty(&self) -> bool {
        self.books.read().await.is_empty()
    }

    /// Look up a single book.
    pub async fn get(&self, id: BookId) -> Option<Book> {
        self.books.read().await.iter().find(|b| b.id == id).cloned()
    }

    fn check_available(&self, operation: &str) -> StoreResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!("{operation} refused")));
        }
        Ok(())
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn list(&self) -> StoreResult<Vec<Book>> {
        self.check_available("list")?;
        Ok(self.books.read().await.clone())
    }

    async fn insert(&self, book: &NewBook) -> StoreResult<Book> {
        self.check_available("insert")?;
        let book = Book::from_parts(BookId::new(), book.clone());
        self.books.write().await.push(book.clone());
        Ok(book)
    }

    async fn update(&self, id: BookId, book: &NewBook) -> StoreResult<Option<Book>> {
        self.check_available("update")?;
        let mut books = self.books.write().await;
        Ok(books.iter_mut().find(|b| b.id == id).map(|existing| {
            existing.apply(book);
            existing.clone()
        }))
    }

    async fn delete(&self, id: BookId) -> StoreResult<Option<Book>> {
        self.check_available("delete")?;
        let mut books = self.books.write().await;
        let index = books.iter().position(|b| b.id == id);
        Ok(index.map(|i| books.remove(i)))
    }
}
