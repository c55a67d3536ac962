//! bookshelf-core: Core types for the bookshelf service
//!
//! This crate provides:
//! - The `Book` entity and its `BookId`
//! - The raw request shape `BookInput` and the validated `NewBook`
//! - The required-field rule (`BookInput::validate`)
//!
//! It performs no I/O; storage and HTTP live in `bookshelf-store` and
//! `bookshelf-server`.

pub mod types;
pub mod validation;

pub use types::{Book, BookId, BookInput, NewBook};
pub use validation::ValidationError;
