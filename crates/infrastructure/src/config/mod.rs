//! Application configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! `config.toml`, then `EMAILCRAFT_*` environment variables. The variable
//! names used by earlier deployments (`OPENROUTER_API_KEY`, `SMTP_*`,
//! `SENDER_EMAIL`) are applied last.

mod server;

use std::{collections::HashMap, fmt};

use ai_core::ProviderConfig;
use integration_smtp::{SmtpConfig, TlsMode};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::retry::RetryConfig;

pub use server::ServerConfig;

/// Prefix for structured environment overrides
pub const ENV_PREFIX: &str = "EMAILCRAFT";

/// Application environment (development or production)
///
/// Production hides internal error details from API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment - error details are exposed
    #[default]
    Development,
    /// Production environment - error details are hidden
    Production,
}

impl Environment {
    /// Whether API error bodies may carry internal details
    pub const fn exposes_error_details(self) -> bool {
        matches!(self, Self::Development)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Language model provider
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Backoff for provider calls
    #[serde(default)]
    pub retry: RetryConfig,

    /// Outgoing mail relay
    #[serde(default)]
    pub smtp: SmtpConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and the process environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Some("config"), std::env::vars().collect())
    }

    /// Load configuration from an optional file and an explicit environment
    ///
    /// Nested keys in `EMAILCRAFT_*` variables are separated by a double
    /// underscore, e.g. `EMAILCRAFT_SERVER__LOG_FORMAT=json`.
    pub fn load_from(
        file: Option<&str>,
        env: HashMap<String, String>,
    ) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        if let Some(name) = file {
            builder = builder.add_source(config::File::with_name(name).required(false));
        }

        let builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(Some(env.clone())),
        );

        let mut config: Self = builder.build()?.try_deserialize()?;
        config.apply_well_known_env(&env)?;
        Ok(config)
    }

    /// Apply the unprefixed variables of earlier deployments
    fn apply_well_known_env(
        &mut self,
        env: &HashMap<String, String>,
    ) -> Result<(), config::ConfigError> {
        let value = |key: &str| {
            env.get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(key) = value("OPENROUTER_API_KEY") {
            self.provider.api_key = Some(SecretString::from(key));
        }
        if let Some(host) = value("SMTP_HOST") {
            self.smtp.host = host;
        }
        if let Some(port) = value("SMTP_PORT") {
            self.smtp.port = port.parse().map_err(|_| {
                config::ConfigError::Message(format!("Invalid SMTP_PORT: {port}"))
            })?;
        }
        if let Some(username) = value("SMTP_USERNAME") {
            self.smtp.username = username;
        }
        if let Some(password) = value("SMTP_PASSWORD") {
            self.smtp.password = SecretString::from(password);
        }
        if let Some(sender) = value("SENDER_EMAIL") {
            self.smtp.sender_email = Some(sender);
        }

        Ok(())
    }

    /// Non-fatal problems worth reporting at startup
    pub fn startup_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if !self.provider.has_api_key() {
            warnings.push(
                "Provider API key is not configured; generation requests will fail".to_string(),
            );
        }
        if !self.smtp.is_configured() {
            warnings.push("SMTP credentials are not configured; email sending is disabled".to_string());
        }
        if self.smtp.tls.mode == TlsMode::None {
            warnings.push("SMTP TLS is disabled; credentials travel in clear text".to_string());
        }
        if self.environment == Environment::Production && !self.smtp.tls.should_verify() {
            warnings.push("SMTP certificate verification is disabled in production".to_string());
        }

        warnings
    }

    /// Log the effective configuration without secrets
    pub fn log_summary(&self) {
        info!(
            environment = %self.environment,
            bind = %self.server.bind_address(),
            log_format = %self.server.log_format,
            provider_url = %self.provider.base_url,
            model = %self.provider.model,
            timeout_ms = self.provider.timeout_ms,
            max_retries = self.retry.max_retries,
            provider_credential = self.provider.has_api_key(),
            smtp_server = %self.smtp.address(),
            smtp_configured = self.smtp.is_configured(),
            "Configuration loaded"
        );
    }
}
