//! Plain-text pages and the health probe.

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

use crate::state::AppState;

/// GET /
async fn home() -> &'static str {
    "Home Root Route"
}

/// GET /about
async fn about() -> &'static str {
    "About Us"
}

/// GET /contact
async fn contact() -> &'static str {
    "Contact Us"
}

/// GET /health - liveness only; does not touch the store.
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Build page routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/about", get(about))
        .route("/contact", get(contact))
        .route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health() {
        let Json(body) = health().await;
        assert_eq!(body["status"], "ok");
    }
}
