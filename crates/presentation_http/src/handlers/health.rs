//! Health check handlers

use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `healthy` while the process serves requests
    pub status: String,
    /// ISO-8601 UTC time of the check
    pub timestamp: String,
    pub version: String,
}

impl HealthResponse {
    fn now() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Service banner at the root path
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses((status = 200, description = "Service is running", body = HealthResponse))
)]
pub async fn root() -> Json<HealthResponse> {
    Json(HealthResponse::now())
}

/// Liveness check - is the server running?
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is running", body = HealthResponse))
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_reports_healthy() {
        let Json(resp) = health_check().await;
        assert_eq!(resp.status, "healthy");
        assert_eq!(resp.version, env!("CARGO_PKG_VERSION"));
        assert!(resp.timestamp.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&resp.timestamp).is_ok());
    }

    #[tokio::test]
    async fn root_matches_health() {
        let Json(resp) = root().await;
        assert_eq!(resp.status, "healthy");
    }
}
