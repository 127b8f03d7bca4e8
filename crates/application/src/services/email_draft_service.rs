//! Email draft service
//!
//! Runs the generation pipeline: validate, compile, generate, parse,
//! assemble. Any stage failure is returned unchanged.

use std::{fmt, sync::Arc};

use chrono::Utc;
use domain::EmailDraftResponse;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::GenerationPort,
    services::{PromptCompiler, RequestValidator, ResponseParser},
};

/// Orchestrates one email draft per call
pub struct EmailDraftService {
    generator: Arc<dyn GenerationPort>,
}

impl fmt::Debug for EmailDraftService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailDraftService")
            .field("model", &self.generator.model())
            .finish_non_exhaustive()
    }
}

impl EmailDraftService {
    /// Create a new draft service
    pub fn new(generator: Arc<dyn GenerationPort>) -> Self {
        Self { generator }
    }

    /// Generate a draft from a raw request body
    #[instrument(skip(self, input))]
    pub async fn generate(&self, input: &Value) -> Result<EmailDraftResponse, ApplicationError> {
        let request = RequestValidator::validate(input).inspect_err(|e| {
            debug!(error = %e, "Rejected generation request");
        })?;

        info!(
            tone = %request.tone(),
            context_len = request.context().chars().count(),
            has_recipient = request.recipient_name().is_some(),
            "Email generation requested"
        );

        if !self.generator.has_credential() {
            warn!("Generation requested but no provider credential is configured");
            return Err(ApplicationError::CredentialMissing);
        }

        let prompt = PromptCompiler::compile(&request);
        let reply = self.generator.generate(&prompt).await?;

        let draft = ResponseParser::parse(&reply.content, request.context());
        info!(
            model = %reply.model,
            attempts = reply.attempts,
            body_len = draft.body.len(),
            "Email generated"
        );

        Ok(EmailDraftResponse::assemble(draft, request.tone(), Utc::now()))
    }
}
