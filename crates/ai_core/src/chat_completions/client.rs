//! Chat-completions client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::api_error::extract_api_error;
use crate::config::ProviderConfig;
use crate::error::GenerationError;
use crate::ports::{ChatCompletion, ChatMessage, ChatRequest, GenerationEngine};

/// Largest provider response body that is buffered
pub const MAX_RESPONSE_BYTES: usize = 1024 * 1024;

/// Single-attempt client for OpenAI-compatible providers
pub struct ChatCompletionEngine {
    client: Client,
    config: ProviderConfig,
}

impl std::fmt::Debug for ChatCompletionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatCompletionEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ChatCompletionEngine {
    /// Create a new engine
    ///
    /// The HTTP client enforces `timeout_ms` on every request. A missing
    /// credential is accepted here and reported on the first call.
    pub fn new(config: ProviderConfig) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        info!(
            base_url = %config.base_url,
            model = %config.model,
            timeout_ms = config.timeout_ms,
            credential = config.has_api_key(),
            "Initialized chat-completion engine"
        );

        Ok(Self { client, config })
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[async_trait]
impl GenerationEngine for ChatCompletionEngine {
    #[instrument(skip(self, request), fields(model = %self.config.model))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatCompletion, GenerationError> {
        let api_key = match self.config.api_key.as_ref() {
            Some(key) if !key.expose_secret().trim().is_empty() => key,
            _ => return Err(GenerationError::MissingCredential),
        };

        let body = CompletionRequest {
            model: &self.config.model,
            messages: &request.messages,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        debug!("Sending chat-completion request");

        let response = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::from_reqwest(&e, self.config.timeout_ms))?;

        let status = response.status();
        let payload = read_capped(response, self.config.timeout_ms).await?;

        if !status.is_success() {
            let message = payload
                .as_deref()
                .map_or_else(oversized_body, extract_api_error);
            warn!(status = %status, error = %message, "Chat-completion request failed");
            return Err(GenerationError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let payload = payload.ok_or_else(|| GenerationError::InvalidResponse(oversized_body()))?;
        let parsed: CompletionResponse = serde_json::from_str(&payload)
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                GenerationError::InvalidResponse("no message content in first choice".to_string())
            })?;

        debug!(content_len = content.len(), "Chat-completion succeeded");

        Ok(ChatCompletion {
            content,
            model: parsed.model.unwrap_or_else(|| self.config.model.clone()),
        })
    }

    fn has_credential(&self) -> bool {
        self.config.has_api_key()
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

/// Buffer the body, giving up once it exceeds [`MAX_RESPONSE_BYTES`]
///
/// `None` means the limit was hit; the rest of the body is left unread.
async fn read_capped(
    mut response: Response,
    timeout_ms: u64,
) -> Result<Option<String>, GenerationError> {
    if response
        .content_length()
        .is_some_and(|len| len > MAX_RESPONSE_BYTES as u64)
    {
        return Ok(None);
    }

    let mut body = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| GenerationError::from_reqwest(&e, timeout_ms))?
    {
        if body.len() + chunk.len() > MAX_RESPONSE_BYTES {
            return Ok(None);
        }
        body.extend_from_slice(&chunk);
    }

    Ok(Some(String::from_utf8_lossy(&body).into_owned()))
}

fn oversized_body() -> String {
    format!("response body exceeds {MAX_RESPONSE_BYTES} bytes")
}
