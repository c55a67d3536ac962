//! Middleware stack.
//!
//! Order for a request, outermost first: trace, CORS, request id,
//! [`request_log::log_request`], [`error_logger::log_errors`], then the router.

pub mod error_logger;
pub mod request_id;
pub mod request_log;
