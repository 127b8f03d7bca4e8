//! EmailCraft HTTP presentation layer
//!
//! axum routes for drafting and sending emails, the error-to-status
//! mapping, and the OpenAPI document.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use error::{ApiError, ErrorResponse, set_expose_internal_errors};
pub use middleware::ValidatedJson;
pub use routes::{create_app, create_router};
pub use state::AppState;
