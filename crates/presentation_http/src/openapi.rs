//! OpenAPI documentation module
//!
//! Describes the EmailCraft HTTP API. The document is served as JSON at
//! `/api-docs/openapi.json`.

// Allow clippy warnings from macro-generated code in utoipa derive
#![allow(clippy::needless_for_each)]

use axum::{Json, Router, routing::get};
use utoipa::OpenApi;

use crate::{handlers, state::AppState};

/// Path of the generated document
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// OpenAPI documentation for EmailCraft
#[derive(OpenApi)]
#[openapi(
    info(
        title = "EmailCraft API",
        description = "Drafts ready-to-send emails with a hosted language model and relays them over SMTP",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    tags(
        (name = "health", description = "Liveness endpoints"),
        (name = "email", description = "Email drafting and delivery")
    ),
    paths(
        handlers::health::root,
        handlers::health::health_check,
        handlers::email::generate_email,
        handlers::email::send_email,
    ),
    components(
        schemas(
            handlers::health::HealthResponse,
            handlers::email::GenerateEmailRequest,
            handlers::email::GenerateEmailResponse,
            handlers::email::SendEmailRequest,
            handlers::email::SendEmailResponse,
            crate::error::ErrorResponse,
        )
    )
)]
#[derive(Debug)]
pub struct ApiDoc;

/// Create OpenAPI documentation routes
pub fn create_openapi_routes() -> Router<AppState> {
    let doc = ApiDoc::openapi();
    Router::new().route(OPENAPI_PATH, get(move || async move { Json(doc) }))
}
