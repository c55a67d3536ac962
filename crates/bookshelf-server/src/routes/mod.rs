//! Route definitions for the HTTP API.

pub mod books;
pub mod pages;

use std::any::Any;

use axum::{
    Router,
    http::{Method, Uri},
    middleware,
    response::{IntoResponse, Response},
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::error::ApiError;
use crate::middleware::{error_logger::log_errors, request_log::log_request};
use crate::state::AppState;

/// Build the complete router with all routes.
pub fn build_router(state: AppState) -> Router {
    let routes = Router::new()
        .merge(pages::routes())
        .merge(books::routes());
    with_error_chain(routes, state)
}

/// Wrap routes in the not-found fallback, the panic guard, the
/// error-logging middleware and the request-logging middleware.
///
/// A panicking handler is answered by [`ApiError::Internal`], so it is
/// logged like any other error.
fn with_error_chain(routes: Router<AppState>, state: AppState) -> Router {
    routes
        .fallback(route_not_found)
        .method_not_allowed_fallback(route_not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn_with_state(state.clone(), log_errors))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// Anything no route matched.
async fn route_not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::RouteNotFound {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "non-string panic payload".to_string()
    };
    ApiError::Internal(format!("handler panicked: {detail}")).into_response()
}
