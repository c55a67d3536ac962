//! Database models for the storage layer.
//!
//! These types map directly to database rows and are used for
//! sqlx queries. They are kept apart from the domain types in
//! bookshelf-core so the table can carry bookkeeping columns.

use bookshelf_core::{Book, BookId};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row for the `books` table.
#[derive(Debug, Clone, FromRow)]
pub struct BookRow {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub created: DateTime<Utc>,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Self {
            id: BookId::from_uuid(row.id),
            title: row.title,
            author: row.author,
            genre: row.genre,
        }
    }
}
