//! Configuration for the chat-completion provider

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Connection and sampling settings for an OpenAI-compatible provider
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL up to and including the API version segment
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer credential (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Model identifier sent with every request
    #[serde(default = "default_model")]
    pub model: String,

    /// Per-attempt timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Sampling temperature (0.0 - 2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_model() -> String {
    "openai/gpt-3.5-turbo".to_string()
}

const fn default_timeout_ms() -> u64 {
    30_000
}

const fn default_temperature() -> f32 {
    0.7
}

const fn default_max_tokens() -> u32 {
    1024
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            model: default_model(),
            timeout_ms: default_timeout_ms(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("timeout_ms", &self.timeout_ms)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl ProviderConfig {
    /// Set the API key
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(key.into()));
        self
    }

    /// Point the config at a different endpoint
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Whether a credential is present
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().trim().is_empty())
    }

    /// Full URL of the chat-completions endpoint
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_targets_openrouter() {
        let config = ProviderConfig::default();
        assert_eq!(config.base_url, "https://openrouter.ai/api/v1");
        assert_eq!(config.model, "openai/gpt-3.5-turbo");
        assert_eq!(config.timeout_ms, 30_000);
        assert_eq!(config.max_tokens, 1024);
        assert!((config.temperature - 0.7).abs() < 0.01);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn completions_url_handles_trailing_slash() {
        let config = ProviderConfig::default().with_base_url("http://localhost:9000/v1/");
        assert_eq!(config.completions_url(), "http://localhost:9000/v1/chat/completions");
    }

    #[test]
    fn blank_key_does_not_count() {
        assert!(!ProviderConfig::default().has_api_key());
        assert!(!ProviderConfig::default().with_api_key("   ").has_api_key());
        assert!(ProviderConfig::default().with_api_key("sk-test").has_api_key());
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = ProviderConfig::default().with_api_key("sk-very-secret");
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("sk-very-secret"));
    }

    #[test]
    fn api_key_is_never_serialized() {
        let config = ProviderConfig::default().with_api_key("sk-very-secret");
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("api_key"));
        assert!(!json.contains("sk-very-secret"));
    }

    #[test]
    fn deserialization_with_defaults() {
        let config: ProviderConfig =
            serde_json::from_str(r#"{"model":"anthropic/claude-3-haiku","api_key":"k"}"#).unwrap();
        assert_eq!(config.model, "anthropic/claude-3-haiku");
        assert_eq!(config.base_url, "https://openrouter.ai/api/v1");
        assert!(config.has_api_key());
    }
}
