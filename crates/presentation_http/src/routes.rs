//! Route definitions

use axum::{
    Router,
    http::{Method, header},
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::{handlers, openapi, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health_check))
        // Email API
        .route("/api/generate-email", post(handlers::email::generate_email))
        .route("/api/send-email", post(handlers::email::send_email))
        // API documentation
        .merge(openapi::create_openapi_routes())
        // Attach state
        .with_state(state)
}

/// Router wrapped in the cross-cutting layers used by the server
///
/// Any origin may call the API with GET, POST or OPTIONS and a
/// `Content-Type` header; bodies above `max_body_bytes` are refused.
pub fn create_app(state: AppState, max_body_bytes: usize) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    // First added = innermost
    create_router(state)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
}
