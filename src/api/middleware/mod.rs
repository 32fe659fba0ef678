//! Middleware for authentication, request IDs, logging and error
//! rendering.

mod auth;
mod error_handler;
mod logging;
mod request_id;

pub use auth::{auth_middleware, AuthUser};
pub use error_handler::{error_to_code, error_to_status_code};
pub use logging::logging_middleware;
pub use request_id::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
