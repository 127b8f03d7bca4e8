//! Generation port - Interface for the language model provider

use async_trait::async_trait;
use domain::CompiledPrompt;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Raw text produced by the provider for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelReply {
    /// Reply text, unparsed
    pub content: String,
    /// Model that produced the reply
    pub model: String,
    /// Attempts used, including the successful one
    pub attempts: u32,
}

/// Port for drafting text with an external model
///
/// Implementations own timeout and retry handling. A call either yields a
/// reply or one of the provider failures of [`ApplicationError`].
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GenerationPort: Send + Sync {
    /// Run the prompt against the provider
    async fn generate(&self, prompt: &CompiledPrompt) -> Result<ModelReply, ApplicationError>;

    /// Whether a provider credential is available
    fn has_credential(&self) -> bool;

    /// Configured model identifier
    fn model(&self) -> String;
}
