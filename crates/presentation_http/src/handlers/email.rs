//! Email drafting and delivery handlers

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use chrono::{DateTime, Utc};
use domain::EmailDraftResponse;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument};
use utoipa::ToSchema;
use validator::Validate;

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// Generation request
///
/// The handler reads the raw JSON so that each field can be checked and
/// reported individually; this type documents the accepted shape.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "context": "Follow up on our meeting about the Q4 planning and next steps",
    "tone": "professional",
    "recipient_name": "John Smith"
}))]
pub struct GenerateEmailRequest {
    /// What the email is about (10 to 1000 characters after trimming)
    pub context: String,
    /// professional, friendly, formal or casual (default: professional)
    #[serde(default)]
    pub tone: Option<String>,
    /// Who the email is addressed to (at most 100 characters)
    #[serde(default)]
    pub recipient_name: Option<String>,
    /// Extra facts to weave in (at most 500 characters)
    #[serde(default)]
    pub additional_details: Option<String>,
}

/// Generated draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GenerateEmailResponse {
    pub subject: String,
    pub body: String,
    pub tone: String,
    pub generated_at: DateTime<Utc>,
    /// Fixed advisory hints for the user
    pub suggestions: Vec<String>,
}

impl From<EmailDraftResponse> for GenerateEmailResponse {
    fn from(draft: EmailDraftResponse) -> Self {
        Self {
            subject: draft.subject,
            body: draft.body,
            tone: draft.tone.to_string(),
            generated_at: draft.generated_at,
            suggestions: draft.suggestions,
        }
    }
}

/// Generate an email draft from a short description
#[utoipa::path(
    post,
    path = "/api/generate-email",
    tag = "email",
    request_body = GenerateEmailRequest,
    responses(
        (status = 200, description = "Draft generated", body = GenerateEmailResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 413, description = "Request body too large"),
        (status = 500, description = "Provider or configuration failure", body = crate::error::ErrorResponse),
        (status = 504, description = "Provider timed out", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn generate_email(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<GenerateEmailResponse>, ApiError> {
    let Json(input) = payload?;

    let draft = state.draft_service.generate(&input).await?;

    info!(tone = %draft.tone, subject_len = draft.subject.len(), "Draft generated");
    Ok(Json(draft.into()))
}

/// Email to relay
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "recipient_email": "john.smith@example.com",
    "subject": "Meeting Follow-up - Q4 Planning",
    "body": "Hi John,\n\nThank you for the meeting today.\n\nBest regards",
    "sender_name": "Jane Doe"
}))]
pub struct SendEmailRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub recipient_email: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub subject: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub body: String,
    /// Display name in the From header (default: EmailCraft AI)
    #[serde(default)]
    pub sender_name: Option<String>,
}

/// Delivery confirmation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SendEmailResponse {
    pub success: bool,
    pub message: String,
    pub recipient: String,
    pub subject: String,
    /// Message-ID header of the sent email
    pub message_id: String,
}

/// Send a finished email through the configured SMTP relay
#[utoipa::path(
    post,
    path = "/api/send-email",
    tag = "email",
    request_body = SendEmailRequest,
    responses(
        (status = 200, description = "Email sent", body = SendEmailResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 413, description = "Request body too large"),
        (status = 500, description = "SMTP not configured or delivery failed", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn send_email(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SendEmailRequest>,
) -> Result<Json<SendEmailResponse>, ApiError> {
    let receipt = state
        .delivery_service
        .send(
            &request.recipient_email,
            &request.subject,
            &request.body,
            request.sender_name,
        )
        .await?;

    Ok(Json(SendEmailResponse {
        success: true,
        message: format!("Email sent successfully to {}", receipt.recipient),
        recipient: receipt.recipient,
        subject: receipt.subject,
        message_id: receipt.message_id,
    }))
}
