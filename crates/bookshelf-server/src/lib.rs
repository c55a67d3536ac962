//! bookshelf-server: HTTP API server for the bookshelf service
//!
//! This crate provides:
//! - REST endpoints for listing, creating, updating and deleting books
//! - A compound endpoint that creates one book and deletes another concurrently
//! - Request logging, and a durable error log fed by the central error responder
//!
//! # Architecture
//!
//! The server is built on Axum. A request passes through, in order:
//! - Tracing, CORS and request-id layers (added in `main`)
//! - The request-logging middleware
//! - The error-logging middleware
//! - A route handler, or the not-found fallback
//!
//! Handlers return [`ApiError`] on failure; its `IntoResponse` impl is the
//! central error responder.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use bookshelf_server::{AppState, ServerConfig, error_log::MemoryErrorLog, routes};
//! use bookshelf_store::MemoryBookStore;
//!
//! let state = AppState::new(
//!     Arc::new(MemoryBookStore::new()),
//!     Arc::new(MemoryErrorLog::new()),
//!     ServerConfig::default(),
//! );
//! let app = routes::build_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod error_log;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod state;

// Re-exports for convenience
pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use error_log::{ErrorSink, FileErrorLog, MemoryErrorLog};
pub use state::AppState;

// Re-export dependent crates
pub use bookshelf_core;
pub use bookshelf_store;
