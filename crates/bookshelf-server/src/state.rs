//! Application state shared across handlers.

use std::sync::Arc;

use bookshelf_store::{BookStore, Repository};

use crate::config::ServerConfig;
use crate::error_log::ErrorSink;

/// Application state shared across all handlers.
///
/// The store and the error log are built once at startup and injected here,
/// so tests can swap in `MemoryBookStore` and `MemoryErrorLog`.
#[derive(Clone)]
pub struct AppState {
    /// Book operations.
    repository: Repository,
    /// Where unhandled errors are appended.
    error_log: Arc<dyn ErrorSink>,
    /// Server configuration.
    config: Arc<ServerConfig>,
}

impl AppState {
    /// Create new application state.
    pub fn new(
        store: Arc<dyn BookStore>,
        error_log: Arc<dyn ErrorSink>,
        config: ServerConfig,
    ) -> Self {
        Self {
            repository: Repository::new(store),
            error_log,
            config: Arc::new(config),
        }
    }

    /// Get a reference to the book repository.
    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    /// Get a reference to the error log sink.
    pub fn error_log(&self) -> &Arc<dyn ErrorSink> {
        &self.error_log
    }

    /// Get a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
