//! Port definitions for generation engines
//!
//! Defines the trait that chat-completion clients implement.

use async_trait::async_trait;
use domain::CompiledPrompt;
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// A single chat message in OpenAI-compatible format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    /// System-role message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// User-role message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Messages for one completion call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

impl From<&CompiledPrompt> for ChatRequest {
    fn from(prompt: &CompiledPrompt) -> Self {
        Self {
            messages: vec![
                ChatMessage::system(&prompt.system_instructions),
                ChatMessage::user(&prompt.user_prompt),
            ],
        }
    }
}

/// Completion returned by the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatCompletion {
    /// Text of the first choice
    pub content: String,
    /// Model reported by the provider, or the requested one
    pub model: String,
}

/// Port for single-attempt completion engines
///
/// Retry policy is layered on top by callers; one call is one request.
#[async_trait]
pub trait GenerationEngine: Send + Sync {
    /// Send one completion request
    async fn complete(&self, request: &ChatRequest) -> Result<ChatCompletion, GenerationError>;

    /// Whether a credential is configured
    fn has_credential(&self) -> bool;

    /// Configured model identifier
    fn model(&self) -> &str;
}
