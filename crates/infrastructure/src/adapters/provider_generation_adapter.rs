//! Provider generation adapter - Implements GenerationPort using ai_core
//!
//! Wraps a single-attempt [`GenerationEngine`] with bounded retry and maps
//! engine failures onto the application error taxonomy.

use std::{fmt, sync::Arc};

use ai_core::{
    ChatCompletionEngine, ChatRequest, GenerationEngine, GenerationError, ProviderConfig,
};
use application::{
    error::ApplicationError,
    ports::{GenerationPort, ModelReply},
};
use async_trait::async_trait;
use domain::CompiledPrompt;
use tracing::{debug, info, instrument, warn};

use crate::retry::{RetryConfig, with_retry};

/// Adapter for OpenAI-compatible chat-completion providers
pub struct ProviderGenerationAdapter {
    engine: Arc<dyn GenerationEngine>,
    retry: RetryConfig,
}

impl fmt::Debug for ProviderGenerationAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderGenerationAdapter")
            .field("model", &self.engine.model())
            .field("has_credential", &self.engine.has_credential())
            .field("retry", &self.retry)
            .finish()
    }
}

impl ProviderGenerationAdapter {
    /// Wrap an engine; the retry count is clamped to the ceiling
    pub fn new(engine: Arc<dyn GenerationEngine>, retry: RetryConfig) -> Self {
        Self {
            engine,
            retry: retry.clamped(),
        }
    }

    /// Build the HTTP engine from provider settings
    pub fn from_config(
        provider: ProviderConfig,
        retry: RetryConfig,
    ) -> Result<Self, ApplicationError> {
        let engine = ChatCompletionEngine::new(provider)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self::new(Arc::new(engine), retry))
    }

    /// Convert an ai_core error to an application error
    fn map_error(err: GenerationError, attempts: u32) -> ApplicationError {
        match err {
            GenerationError::MissingCredential => ApplicationError::CredentialMissing,
            GenerationError::Timeout(_) => ApplicationError::ProviderTimeout { attempts },
            GenerationError::Provider { status, message } => {
                ApplicationError::provider(Some(status), message)
            },
            GenerationError::InvalidResponse(message) => ApplicationError::provider(None, message),
            GenerationError::Transport(message) => ApplicationError::Transport(message),
        }
    }
}

#[async_trait]
impl GenerationPort for ProviderGenerationAdapter {
    #[instrument(
        skip(self, prompt),
        fields(model = %self.engine.model(), prompt_len = prompt.user_prompt.len())
    )]
    async fn generate(&self, prompt: &CompiledPrompt) -> Result<ModelReply, ApplicationError> {
        // Every attempt sends the same request
        let request = ChatRequest::from(prompt);
        let engine = &self.engine;

        let outcome = with_retry(&self.retry, || engine.complete(&request)).await;
        let attempts = outcome.attempts;
        let duration_ms = u64::try_from(outcome.total_duration.as_millis()).unwrap_or(u64::MAX);

        match outcome.result {
            Ok(completion) => {
                info!(
                    attempts,
                    duration_ms,
                    response_len = completion.content.len(),
                    "Generation completed"
                );
                Ok(ModelReply {
                    content: completion.content,
                    model: completion.model,
                    attempts,
                })
            },
            Err(err) => {
                warn!(attempts, duration_ms, error = %err, "Generation failed");
                Err(Self::map_error(err, attempts))
            },
        }
    }

    fn has_credential(&self) -> bool {
        let present = self.engine.has_credential();
        if !present {
            debug!("Provider credential not configured");
        }
        present
    }

    fn model(&self) -> String {
        self.engine.model().to_string()
    }
}
