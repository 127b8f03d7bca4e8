//! API error handling
//!
//! The single place where failures become status codes. In production
//! mode, provider and transport internals stay out of response bodies.

use std::sync::atomic::{AtomicBool, Ordering};

use application::ApplicationError;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};
use utoipa::ToSchema;

/// Global flag to control error detail exposure
/// Set to false in production to prevent information leakage
static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(true);

/// Configure whether internal error details are included in responses
pub fn set_expose_internal_errors(expose: bool) {
    EXPOSE_INTERNAL_ERRORS.store(expose, Ordering::SeqCst);
}

fn should_expose_details() -> bool {
    EXPOSE_INTERNAL_ERRORS.load(Ordering::SeqCst)
}

const GENERIC_BAD_REQUEST: &str = "Request body could not be read";

/// Hide parser output that points into server internals
fn sanitize_error_message(msg: &str, expose: bool) -> String {
    if expose {
        return msg.to_string();
    }

    let sensitive_patterns = ["/home/", "/Users/", "/var/", "/etc/", "C:\\", ".rs:", "panicked at"];
    if sensitive_patterns.iter().any(|p| msg.contains(p)) {
        return GENERIC_BAD_REQUEST.to_string();
    }

    msg.to_string()
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body was not readable JSON
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Body exceeded the configured size limit
    #[error("Request body too large")]
    PayloadTooLarge,

    /// A field failed validation
    #[error("{message}")]
    Validation {
        field: Option<String>,
        message: String,
    },

    #[error("Provider credential is not configured")]
    CredentialMissing,

    #[error("Provider timed out after {attempts} attempt(s)")]
    ProviderTimeout { attempts: u32 },

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Email service not configured")]
    MailNotConfigured,

    #[error("Failed to send email: {0}")]
    MailDelivery(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,
    /// Machine-readable classification
    pub code: String,
    /// Offending request field, for validation failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Internal details, development mode only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Machine-readable classification
    pub const fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::PayloadTooLarge => "payload_too_large",
            Self::Validation { .. } => "validation_error",
            Self::CredentialMissing => "credential_missing",
            Self::ProviderTimeout { .. } => "provider_timeout",
            Self::Provider(_) => "provider_error",
            Self::Transport(_) => "transport_error",
            Self::MailNotConfigured => "mail_not_configured",
            Self::MailDelivery(_) => "mail_delivery_failed",
            Self::Internal(_) => "internal_error",
        }
    }

    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::ProviderTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            Self::CredentialMissing
            | Self::Provider(_)
            | Self::Transport(_)
            | Self::MailNotConfigured
            | Self::MailDelivery(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Build the response body
    pub fn to_body(&self, expose: bool) -> ErrorResponse {
        let details = |msg: &String| expose.then(|| msg.clone());

        let (error, field, details) = match self {
            Self::BadRequest(msg) => (sanitize_error_message(msg, expose), None, None),
            Self::PayloadTooLarge => ("Request body too large".to_string(), None, None),
            Self::Validation { field, message } => (message.clone(), field.clone(), None),
            Self::CredentialMissing => (
                "Email generation is not configured".to_string(),
                None,
                None,
            ),
            Self::ProviderTimeout { attempts } => (
                "The language model provider did not respond in time".to_string(),
                None,
                expose.then(|| format!("{attempts} attempt(s) timed out")),
            ),
            Self::Provider(msg) => (
                "The language model provider returned an error".to_string(),
                None,
                details(msg),
            ),
            Self::Transport(msg) => (
                "The language model provider could not be reached".to_string(),
                None,
                details(msg),
            ),
            Self::MailNotConfigured => ("Email service not configured".to_string(), None, None),
            Self::MailDelivery(msg) => ("Failed to send email".to_string(), None, details(msg)),
            Self::Internal(msg) => (
                "An internal error occurred".to_string(),
                None,
                details(msg),
            ),
        };

        ErrorResponse {
            error,
            code: self.code().to_string(),
            field,
            details,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(code = self.code(), error = %self, "Request failed");
        } else {
            warn!(code = self.code(), error = %self, "Request rejected");
        }

        (status, Json(self.to_body(should_expose_details()))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge
        } else {
            Self::BadRequest(rejection.body_text())
        }
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => Self::Validation {
                field: e.field().map(ToString::to_string),
                message: e.to_string(),
            },
            ApplicationError::CredentialMissing => Self::CredentialMissing,
            ApplicationError::ProviderTimeout { attempts } => Self::ProviderTimeout { attempts },
            provider @ ApplicationError::Provider { .. } => Self::Provider(provider.to_string()),
            ApplicationError::Transport(msg) => Self::Transport(msg),
            ApplicationError::MailNotConfigured => Self::MailNotConfigured,
            ApplicationError::MailDelivery(msg) => Self::MailDelivery(msg),
            ApplicationError::Configuration(msg) | ApplicationError::Internal(msg) => {
                Self::Internal(msg)
            },
        }
    }
}
