//! bookshelf-store: Storage layer for the bookshelf service
//!
//! This crate provides:
//! - The `BookStore` trait, the seam between the service and its database
//! - A PostgreSQL implementation (`PgBookStore`) with embedded migrations
//! - An in-memory implementation (`MemoryBookStore`) for tests and local runs
//! - The `Repository` holding the operations the HTTP routes call
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use bookshelf_store::{PgBookStore, Repository, StoreConfig};
//!
//! let config = StoreConfig::from_env()?;
//! let store = PgBookStore::connect(config).await?;
//! let repo = Repository::new(Arc::new(store));
//!
//! let book = repo.create_book(&new_book).await?;
//! let books = repo.list_books().await?;
//! ```

pub mod backend;
pub mod error;
pub mod memory;
pub mod models;
pub mod repository;
pub mod schema;
pub mod store;

pub use backend::BookStore;
pub use error::{CompoundError, StoreError, StoreResult};
pub use memory::MemoryBookStore;
pub use models::BookRow;
pub use repository::Repository;
pub use store::{DEFAULT_DATABASE_URL, PgBookStore, StoreConfig};

// Re-export bookshelf-core for downstream crates
pub use bookshelf_core;
